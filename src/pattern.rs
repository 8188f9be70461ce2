use std::fmt;

use crate::error::{Error, Result};
use crate::spec::{Spec, SpecKind};
use crate::value::Value;

/// A pattern in a rule head or a call's argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches anything and names it in the local scope (e.g. `X`)
    Var(String),
    /// Splits a non-empty list into head and tail (e.g. `[X|L]`)
    Cons(Box<Pattern>, Box<Pattern>),
    /// Matches an equal value (e.g. `3`, `[]`)
    Literal(Value),
}

impl Pattern {
    /// Builds a pattern from an untyped spec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognisedSpec`] if the spec (or part of a cons
    /// split) has no pattern form, e.g. a pair nested inside a list literal.
    pub fn from_spec(spec: &Spec) -> Result<Self> {
        match (spec.classify(), spec) {
            (SpecKind::Variable, Spec::Str(name)) => Ok(Pattern::Var(name.clone())),
            (SpecKind::Cons, Spec::Pair(head, tail)) => Ok(Pattern::cons(
                Pattern::from_spec(head)?,
                Pattern::from_spec(tail)?,
            )),
            (SpecKind::Literal, _) => {
                spec.to_value()
                    .map(Pattern::Literal)
                    .ok_or_else(|| Error::UnrecognisedSpec {
                        what: "arg",
                        spec: spec.to_string(),
                    })
            }
            _ => Err(Error::UnrecognisedSpec {
                what: "arg",
                spec: spec.to_string(),
            }),
        }
    }

    /// A variable pattern
    #[must_use]
    pub fn var(name: &str) -> Self {
        Pattern::Var(name.to_string())
    }

    /// A head/tail split pattern
    #[must_use]
    pub fn cons(head: Pattern, tail: Pattern) -> Self {
        Pattern::Cons(Box::new(head), Box::new(tail))
    }

    /// A literal pattern
    pub fn literal(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }
}

impl TryFrom<Spec> for Pattern {
    type Error = Error;

    fn try_from(spec: Spec) -> Result<Self> {
        Pattern::from_spec(&spec)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Var(name) => write!(f, "{name}"),
            Pattern::Cons(head, tail) => write!(f, "[{head}|{tail}]"),
            Pattern::Literal(value) => write!(f, "{value}"),
        }
    }
}
