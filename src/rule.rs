use std::fmt;
use std::iter;

use log::trace;
use smallvec::SmallVec;

use crate::bindings::{Bindings, Scope};
use crate::call::Call;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::query::Solutions;
use crate::solve::{solve_conjunction, Frame, Stream};
use crate::spec::Spec;
use crate::term::Term;
use crate::unify::match_pattern;

/// One clause: head patterns and a body conjunction.
///
/// A rule with an empty body is a fact.
#[derive(Debug, Clone)]
pub struct Rule {
    head: SmallVec<[Pattern; 4]>,
    body: Vec<Call>,
}

impl Rule {
    /// Builds a rule from pre-built head patterns
    pub fn new(head: impl IntoIterator<Item = Pattern>, body: Vec<Call>) -> Self {
        Self {
            head: head.into_iter().collect(),
            body,
        }
    }

    /// Builds a rule from head specs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognisedSpec`] if a head spec has no pattern form.
    pub fn from_specs<S: Into<Spec>>(
        head: impl IntoIterator<Item = S>,
        body: Vec<Call>,
    ) -> Result<Self> {
        let head = head
            .into_iter()
            .map(|spec| Pattern::from_spec(&spec.into()))
            .collect::<Result<SmallVec<_>>>()?;
        Ok(Self { head, body })
    }

    /// Formal parameter patterns
    #[must_use]
    pub fn head(&self) -> &[Pattern] {
        &self.head
    }

    /// Body calls, solved left to right
    #[must_use]
    pub fn body(&self) -> &[Call] {
        &self.body
    }

    /// Number of formal parameters
    #[must_use]
    pub fn arity(&self) -> usize {
        self.head.len()
    }

    /// Lazily enumerates this rule's solutions for the given argument specs,
    /// reported against the names used in `terms`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPredicate`] if a body call targets a predicate
    /// `db` does not hold, and [`Error::UnrecognisedSpec`] if a term spec
    /// cannot be classified.
    pub fn possibles<'a, S: Into<Spec>>(
        &'a self,
        db: &'a Database,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Solutions<'a>> {
        self.check_targets(db)?;
        Solutions::start(terms, |args, bindings| self.solve(db, args, bindings))
    }

    /// Checks that every predicate the body reaches, including through
    /// `not`, exists in `db`.
    pub(crate) fn check_targets(&self, db: &Database) -> Result<()> {
        match self
            .body
            .iter()
            .flat_map(Call::targets)
            .find(|target| db.get(*target).is_none())
        {
            Some(unknown) => Err(Error::UnknownPredicate(unknown)),
            None => Ok(()),
        }
    }

    /// Matches the head against `args` in a fresh scope, then solves the body.
    pub(crate) fn solve<'a>(
        &'a self,
        db: &'a Database,
        args: &[Term],
        mut bindings: Bindings,
    ) -> Stream<'a, Bindings> {
        if self.head.len() != args.len() {
            trace!("arity {} != {}", self.head.len(), args.len());
            return Box::new(iter::empty());
        }

        let mut scope = Scope::new();
        let matched = self
            .head
            .iter()
            .zip(args)
            .all(|(pattern, term)| match_pattern(pattern, term, &mut scope, &mut bindings));
        trace!("head {self}: {}", if matched { "matched" } else { "no match" });
        if !matched {
            return Box::new(iter::empty());
        }

        Box::new(
            solve_conjunction(db, &self.body, Frame::new(scope, bindings))
                .map(|frame| frame.bindings),
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, pattern) in self.head.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pattern}")?;
        }
        write!(f, ")")?;
        for (i, call) in self.body.iter().enumerate() {
            write!(f, "{}{call}", if i == 0 { " :- " } else { ", " })?;
        }
        Ok(())
    }
}
