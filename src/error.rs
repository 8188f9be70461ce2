use thiserror::Error;

use crate::predicate::PredicateId;

/// Errors raised while building a program or starting a query.
///
/// Failing to find a solution is never an error: an exhausted search is just
/// an empty [`Solutions`](crate::Solutions) stream.
#[derive(Debug, Error)]
pub enum Error {
    /// A spec that none of the pattern or term variants recognise
    #[error("unexpected {what} spec: {spec}")]
    UnrecognisedSpec {
        /// What was being built (`"arg"` or `"term"`)
        what: &'static str,
        /// Rendering of the offending spec
        spec: String,
    },

    /// Rules can only be added to user predicates
    #[error("cannot add rules to built-in predicate `{0}`")]
    BuiltinPredicate(String),

    /// A predicate id that this database never issued
    #[error("unknown predicate {0}")]
    UnknownPredicate(PredicateId),

    /// `not` takes exactly one wrapped call and no argument patterns
    #[error("`not` must wrap exactly one call")]
    NegationArity,

    /// Rendering a solution as JSON failed
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
