//! Readable rendering of runtime terms for the debug trace.
//!
//! Enable with `RUST_LOG=hornlog=trace`.

use std::fmt;

use crate::bindings::Bindings;
use crate::term::Term;

/// A term rendered through the bindings it lives in: bound variables show
/// their values, unbound ones their fresh names (`X_3`).
#[derive(Debug, Clone, Copy)]
pub struct Show<'b> {
    term: &'b Term,
    bindings: &'b Bindings,
}

impl Bindings {
    /// Renders `term` against these bindings
    #[must_use]
    pub fn show<'b>(&'b self, term: &'b Term) -> Show<'b> {
        Show {
            term,
            bindings: self,
        }
    }
}

impl fmt::Display for Show<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bindings.resolve(self.term) {
            Term::Literal(value) => write!(f, "{value}"),
            Term::Var(var) => match self.bindings.name(var) {
                Some(name) => write!(f, "{name}"),
                None => write!(f, "{var}"),
            },
            Term::Cons(head, tail) => write!(
                f,
                "[{}|{}]",
                self.bindings.show(&head),
                self.bindings.show(&tail)
            ),
        }
    }
}

/// A comma-separated argument list rendered with [`Show`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ShowArgs<'b> {
    args: &'b [Term],
    bindings: &'b Bindings,
}

impl<'b> ShowArgs<'b> {
    pub(crate) fn new(args: &'b [Term], bindings: &'b Bindings) -> Self {
        Self { args, bindings }
    }
}

impl fmt::Display for ShowArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.bindings.show(arg))?;
        }
        Ok(())
    }
}
