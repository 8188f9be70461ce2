use std::fmt;

use indexmap::IndexMap;
use log::debug;
use smallvec::SmallVec;

use crate::bindings::{Bindings, Scope};
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::solve::Stream;
use crate::spec::Spec;
use crate::term::Term;
use crate::value::Value;

/// One answer to a query: the final value of each of the query's own
/// variable names.
///
/// Names that are still unbound, or only partly bound, are left out.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Variable bindings in order of first mention in the query
    pub bindings: IndexMap<String, Value>,
}

impl Solution {
    fn project(scope: &Scope, bindings: &Bindings) -> Self {
        let bindings = scope
            .iter()
            .filter_map(|(name, var)| {
                bindings
                    .reify(&Term::Var(var))
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self { bindings }
    }

    /// The value bound to `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Whether nothing was bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Renders the bindings as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.bindings)?)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Lazy stream of a query's solutions.
///
/// Each call to `next` resumes the search from the last choice point.
/// Dropping the stream abandons the search; nothing needs undoing.
pub struct Solutions<'a> {
    scope: Scope,
    stream: Stream<'a, Bindings>,
}

impl<'a> Solutions<'a> {
    /// Evaluates the term specs in a fresh query scope and hands the
    /// resulting arguments to `solve`.
    pub(crate) fn start<S: Into<Spec>>(
        terms: impl IntoIterator<Item = S>,
        solve: impl FnOnce(&[Term], Bindings) -> Stream<'a, Bindings>,
    ) -> Result<Self> {
        let patterns = terms
            .into_iter()
            .map(|spec| {
                let spec = spec.into();
                Pattern::from_spec(&spec).map_err(|_| Error::UnrecognisedSpec {
                    what: "term",
                    spec: spec.to_string(),
                })
            })
            .collect::<Result<SmallVec<[Pattern; 4]>>>()?;

        let mut scope = Scope::new();
        let mut bindings = Bindings::new();
        let args: SmallVec<[Term; 4]> = patterns
            .iter()
            .map(|pattern| scope.instantiate(pattern, &mut bindings))
            .collect();
        let stream = solve(&args, bindings);
        Ok(Self { scope, stream })
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        let bindings = self.stream.next()?;
        let solution = Solution::project(&self.scope, &bindings);
        debug!("solution {solution}");
        Some(solution)
    }
}

impl fmt::Debug for Solutions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solutions")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
