use std::fmt;
use std::iter;

use log::trace;
use smallvec::SmallVec;

use crate::bindings::Bindings;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::predicate::PredicateId;
use crate::solve::{Frame, Stream};
use crate::spec::Spec;
use crate::term::Term;
use crate::trace::ShowArgs;

#[derive(Debug, Clone)]
enum Goal {
    Args(SmallVec<[Pattern; 4]>),
    Negate(Box<Call>),
}

/// One invocation of a predicate inside a rule body.
///
/// Argument patterns are evaluated against the enclosing rule's scope each
/// time the call runs, not when the rule is built.
#[derive(Debug, Clone)]
pub struct Call {
    target: PredicateId,
    goal: Goal,
}

impl Call {
    /// A call to `target` with the given argument specs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognisedSpec`] for a malformed argument spec, and
    /// [`Error::NegationArity`] if `target` is `not` (use [`Call::not`]).
    pub fn new<S: Into<Spec>>(
        target: PredicateId,
        args: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let patterns = args
            .into_iter()
            .map(|spec| Pattern::from_spec(&spec.into()))
            .collect::<Result<Vec<_>>>()?;
        Self::with_patterns(target, patterns)
    }

    /// A call to `target` with pre-built argument patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegationArity`] if `target` is `not`.
    pub fn with_patterns(
        target: PredicateId,
        patterns: impl IntoIterator<Item = Pattern>,
    ) -> Result<Self> {
        if target == Database::NOT {
            return Err(Error::NegationArity);
        }
        Ok(Self {
            target,
            goal: Goal::Args(patterns.into_iter().collect()),
        })
    }

    /// `not inner`: succeeds once, binding nothing, iff `inner` has no
    /// solution.
    #[must_use]
    pub fn not(inner: Call) -> Self {
        Self {
            target: Database::NOT,
            goal: Goal::Negate(Box::new(inner)),
        }
    }

    /// A call to the `fail` built-in
    #[must_use]
    pub fn fail() -> Self {
        Self {
            target: Database::FAIL,
            goal: Goal::Args(SmallVec::new()),
        }
    }

    /// A call to the `true` built-in
    #[must_use]
    pub fn succeed() -> Self {
        Self {
            target: Database::SUCCEED,
            goal: Goal::Args(SmallVec::new()),
        }
    }

    /// The called predicate
    #[must_use]
    pub fn target(&self) -> PredicateId {
        self.target
    }

    /// Argument patterns; empty for `not`
    #[must_use]
    pub fn args(&self) -> &[Pattern] {
        match &self.goal {
            Goal::Args(patterns) => patterns,
            Goal::Negate(_) => &[],
        }
    }

    /// The wrapped call of a `not`
    #[must_use]
    pub fn negated(&self) -> Option<&Call> {
        match &self.goal {
            Goal::Args(_) => None,
            Goal::Negate(inner) => Some(inner.as_ref()),
        }
    }

    /// Every predicate this call can reach directly, including through `not`.
    pub(crate) fn targets(&self) -> Vec<PredicateId> {
        let mut targets = vec![self.target];
        if let Some(inner) = self.negated() {
            targets.extend(inner.targets());
        }
        targets
    }

    pub(crate) fn solve<'a>(&'a self, db: &'a Database, frame: Frame) -> Stream<'a, Frame> {
        let Frame {
            mut scope,
            mut bindings,
        } = frame;
        match &self.goal {
            Goal::Negate(inner) => {
                let probe = Frame::new(scope.clone(), bindings.clone());
                let proved = inner.solve(db, probe).next().is_some();
                trace!(
                    "not {}: inner {}",
                    db.name(inner.target).unwrap_or("?"),
                    if proved { "succeeded" } else { "failed" }
                );
                if proved {
                    Box::new(iter::empty())
                } else {
                    Box::new(iter::once(Frame::new(scope, bindings)))
                }
            }
            Goal::Args(patterns) => {
                let args: SmallVec<[Term; 4]> = patterns
                    .iter()
                    .map(|pattern| scope.instantiate(pattern, &mut bindings))
                    .collect();
                trace!(
                    "call {}({})",
                    db.name(self.target).unwrap_or("?"),
                    ShowArgs::new(&args, &bindings)
                );
                match db.get(self.target) {
                    Some(predicate) => Box::new(
                        predicate
                            .solve(db, &args, bindings)
                            .map(move |bindings: Bindings| Frame::new(scope.clone(), bindings)),
                    ),
                    None => unreachable!(
                        "{} is checked before the rule is added or queried",
                        self.target
                    ),
                }
            }
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.goal {
            Goal::Negate(inner) => write!(f, "not {inner}"),
            Goal::Args(patterns) => {
                write!(f, "{}(", self.target)?;
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{pattern}")?;
                }
                write!(f, ")")
            }
        }
    }
}
