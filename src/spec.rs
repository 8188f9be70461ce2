//! Untyped specs used to declare rules, calls and queries.
//!
//! A spec is what the notation layer hands us: integers, strings, lists and
//! 2-tuples. It is classified into a pattern or term variant with a fixed
//! priority order: variable name, then cons pair, then literal.

use std::fmt;

use crate::value::Value;

/// An unclassified argument spec.
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    /// An integer literal
    Int(i64),
    /// A floating-point literal
    Float(f64),
    /// A boolean literal
    Bool(bool),
    /// A string: a variable name if it starts with an uppercase letter,
    /// otherwise an atom
    Str(String),
    /// A list literal; its elements are always values
    List(Vec<Spec>),
    /// A `(head, tail)` pair splitting a list
    Pair(Box<Spec>, Box<Spec>),
}

/// The variant a spec classifies as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// Uppercase-leading string
    Variable,
    /// `(head, tail)` pair
    Cons,
    /// Anything else
    Literal,
}

type Recogniser = fn(&Spec) -> bool;

/// Classification priority. The first recogniser that accepts a spec wins.
const CLASSIFICATION_ORDER: [(SpecKind, Recogniser); 3] = [
    (SpecKind::Variable, Spec::is_variable_name),
    (SpecKind::Cons, Spec::is_cons_pair),
    (SpecKind::Literal, Spec::is_anything),
];

impl Spec {
    /// A `(head, tail)` cons spec, written `[H|T]` in clause notation
    #[must_use]
    pub fn cons(head: impl Into<Spec>, tail: impl Into<Spec>) -> Self {
        Spec::Pair(Box::new(head.into()), Box::new(tail.into()))
    }

    /// The empty list spec `[]`
    #[must_use]
    pub fn nil() -> Self {
        Spec::List(Vec::new())
    }

    /// A list literal spec
    pub fn list<T: Into<Spec>>(items: impl IntoIterator<Item = T>) -> Self {
        Spec::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether this is a variable name (a string starting with an uppercase
    /// character)
    #[must_use]
    pub fn is_variable_name(&self) -> bool {
        match self {
            Spec::Str(s) => s.chars().next().is_some_and(char::is_uppercase),
            _ => false,
        }
    }

    /// Whether this is a `(head, tail)` split
    #[must_use]
    pub fn is_cons_pair(&self) -> bool {
        matches!(self, Spec::Pair(..))
    }

    fn is_anything(&self) -> bool {
        true
    }

    /// Classifies the spec using the fixed priority order.
    #[must_use]
    pub fn classify(&self) -> SpecKind {
        CLASSIFICATION_ORDER
            .iter()
            .find(|(_, recognise)| recognise(self))
            .map_or(SpecKind::Literal, |(kind, _)| *kind)
    }

    /// The value this spec denotes when read as a literal.
    ///
    /// Strings become atoms whatever their case. Returns `None` if a pair
    /// appears anywhere inside, since a split has no value form.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Spec::Int(n) => Some(Value::Int(*n)),
            Spec::Float(x) => Some(Value::Float(*x)),
            Spec::Bool(b) => Some(Value::Bool(*b)),
            Spec::Str(s) => Some(Value::Atom(s.clone())),
            Spec::List(items) => items
                .iter()
                .map(Spec::to_value)
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            Spec::Pair(..) => None,
        }
    }
}

impl From<i64> for Spec {
    fn from(n: i64) -> Self {
        Spec::Int(n)
    }
}

impl From<i32> for Spec {
    fn from(n: i32) -> Self {
        Spec::Int(i64::from(n))
    }
}

impl From<f64> for Spec {
    fn from(x: f64) -> Self {
        Spec::Float(x)
    }
}

impl From<bool> for Spec {
    fn from(b: bool) -> Self {
        Spec::Bool(b)
    }
}

impl From<&str> for Spec {
    fn from(s: &str) -> Self {
        Spec::Str(s.to_string())
    }
}

impl From<String> for Spec {
    fn from(s: String) -> Self {
        Spec::Str(s)
    }
}

impl<T: Into<Spec>> From<Vec<T>> for Spec {
    fn from(items: Vec<T>) -> Self {
        Spec::list(items)
    }
}

impl<H: Into<Spec>, T: Into<Spec>> From<(H, T)> for Spec {
    fn from((head, tail): (H, T)) -> Self {
        Spec::cons(head, tail)
    }
}

impl From<&Value> for Spec {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(n) => Spec::Int(*n),
            Value::Float(x) => Spec::Float(*x),
            Value::Bool(b) => Spec::Bool(*b),
            Value::Atom(s) => Spec::Str(s.clone()),
            Value::List(items) => Spec::List(items.iter().map(Spec::from).collect()),
        }
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spec::Int(n) => write!(f, "{n}"),
            Spec::Float(x) => write!(f, "{x:?}"),
            Spec::Bool(b) => write!(f, "{b}"),
            Spec::Str(s) => write!(f, "{s:?}"),
            Spec::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Spec::Pair(head, tail) => write!(f, "({head}, {tail})"),
        }
    }
}
