use std::fmt;

/// A ground value: an atomic constant or a finite list of values.
///
/// Lists are structural literals here. Head/tail decomposition only happens
/// while matching a [`Pattern::Cons`](crate::Pattern::Cons).
///
/// Equality is structural and follows `f64` for floats, so `Int(1)` and
/// `Float(1.0)` differ and a NaN equals nothing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    /// An integer (e.g. `1`, `-7`)
    Int(i64),
    /// A floating-point number (e.g. `1.2`)
    Float(f64),
    /// A boolean
    Bool(bool),
    /// A symbolic constant (e.g. `"alice"`)
    Atom(String),
    /// An ordered list of values (e.g. `[1, 2, 3]`)
    List(Vec<Value>),
}

impl Value {
    /// The empty list `[]`
    #[must_use]
    pub fn nil() -> Self {
        Value::List(Vec::new())
    }

    /// Splits a non-empty list into its head and the list of the remaining
    /// elements. Returns `None` for the empty list and for non-lists.
    #[must_use]
    pub fn split_first(&self) -> Option<(Value, Value)> {
        match self {
            Value::List(items) => items
                .split_first()
                .map(|(head, tail)| (head.clone(), Value::List(tail.to_vec()))),
            Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Atom(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Atom(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Atom(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
