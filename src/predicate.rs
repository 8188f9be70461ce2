use std::fmt;
use std::iter;

use log::trace;

use crate::bindings::Bindings;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::solve::Stream;
use crate::term::Term;

/// Handle to a predicate stored in a [`Database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(pub(crate) usize);

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Predicates implemented by the engine rather than by rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Never succeeds
    Fail,
    /// Succeeds once without binding anything
    Succeed,
    /// Negation as failure of one wrapped call
    Not,
}

impl Builtin {
    /// Name the built-in is registered under
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Fail => "fail",
            Builtin::Succeed => "true",
            Builtin::Not => "not",
        }
    }
}

#[derive(Debug, Clone)]
enum Clauses {
    Rules(Vec<Rule>),
    Builtin(Builtin),
}

/// A named, ordered disjunction of rules, or a built-in.
#[derive(Debug, Clone)]
pub struct Predicate {
    name: String,
    clauses: Clauses,
}

impl Predicate {
    pub(crate) fn user(name: &str) -> Self {
        Self {
            name: name.to_string(),
            clauses: Clauses::Rules(Vec::new()),
        }
    }

    pub(crate) fn builtin(builtin: Builtin) -> Self {
        Self {
            name: builtin.name().to_string(),
            clauses: Clauses::Builtin(builtin),
        }
    }

    /// The predicate's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order; empty for built-ins
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        match &self.clauses {
            Clauses::Rules(rules) => rules,
            Clauses::Builtin(_) => &[],
        }
    }

    /// Which built-in this is, if any
    #[must_use]
    pub fn as_builtin(&self) -> Option<Builtin> {
        match self.clauses {
            Clauses::Rules(_) => None,
            Clauses::Builtin(builtin) => Some(builtin),
        }
    }

    pub(crate) fn push_rule(&mut self, rule: Rule) -> Result<()> {
        match &mut self.clauses {
            Clauses::Rules(rules) => {
                rules.push(rule);
                Ok(())
            }
            Clauses::Builtin(_) => Err(Error::BuiltinPredicate(self.name.clone())),
        }
    }

    /// Concatenates the solutions of every rule, in declaration order.
    pub(crate) fn solve<'a>(
        &'a self,
        db: &'a Database,
        args: &[Term],
        bindings: Bindings,
    ) -> Stream<'a, Bindings> {
        match &self.clauses {
            Clauses::Rules(rules) => {
                let args = args.to_vec();
                Box::new(rules.iter().enumerate().flat_map(move |(index, rule)| {
                    trace!("{}: trying rule {index}", self.name);
                    rule.solve(db, &args, bindings.clone())
                }))
            }
            Clauses::Builtin(Builtin::Fail) => Box::new(iter::empty()),
            Clauses::Builtin(Builtin::Succeed) => Box::new(iter::once(bindings)),
            // `Call::not` drives negation; plain `not` calls and queries are
            // rejected when they are built.
            Clauses::Builtin(Builtin::Not) => {
                unreachable!("`not` solved without its wrapped call")
            }
        }
    }
}
