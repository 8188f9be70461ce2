//! Depth-first resolution of rule bodies.
//!
//! Every component answers with a lazy [`Stream`] of solutions. A conjunction
//! is nested iteration: each solution of the first call drives a fresh
//! enumeration of the remaining calls, so solutions come out in rule order
//! (outer) and left-to-right call order (inner).

use std::iter;

use crate::bindings::{Bindings, Scope};
use crate::call::Call;
use crate::database::Database;

/// A lazy sequence of solutions.
pub(crate) type Stream<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// The state threaded through one rule body: the rule's local names and the
/// query's variable cells.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) scope: Scope,
    pub(crate) bindings: Bindings,
}

impl Frame {
    pub(crate) fn new(scope: Scope, bindings: Bindings) -> Self {
        Self { scope, bindings }
    }
}

/// Enumerates every way to satisfy `calls` in order, starting from `frame`.
pub(crate) fn solve_conjunction<'a>(
    db: &'a Database,
    calls: &'a [Call],
    frame: Frame,
) -> Stream<'a, Frame> {
    match calls.split_first() {
        None => Box::new(iter::once(frame)),
        Some((call, rest)) => Box::new(
            call.solve(db, frame)
                .flat_map(move |next| solve_conjunction(db, rest, next)),
        ),
    }
}
