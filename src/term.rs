use std::fmt;

use crate::value::Value;

/// Identity of a logic variable: its index in the [`Bindings`](crate::Bindings)
/// arena of the query that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Arena index of this variable
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_G{}", self.0)
    }
}

/// A runtime term: what call arguments evaluate to during resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A ground value
    Literal(Value),
    /// A variable cell, possibly bound through the arena
    Var(VarId),
    /// A list split whose head or tail is not yet ground
    Cons(Box<Term>, Box<Term>),
}

impl Term {
    /// Builds `[head|tail]`, collapsing to a literal list when both parts are
    /// ground and the tail is a list.
    #[must_use]
    pub fn cons(head: Term, tail: Term) -> Self {
        match (head, tail) {
            (Term::Literal(head), Term::Literal(Value::List(mut items))) => {
                items.insert(0, head);
                Term::Literal(Value::List(items))
            }
            (head, tail) => Term::Cons(Box::new(head), Box::new(tail)),
        }
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Literal(value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(value) => write!(f, "{value}"),
            Term::Var(var) => write!(f, "{var}"),
            Term::Cons(head, tail) => write!(f, "[{head}|{tail}]"),
        }
    }
}
