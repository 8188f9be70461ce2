//! Variable arena and local scopes.
//!
//! Every variable of a query lives in one [`Bindings`] arena, identified by
//! its index. A slot is bound at most once; a bound slot holds the next term
//! of its binding chain. Allocating a fresh variable is pushing a new slot, so
//! the arena length doubles as the fresh-variable counter of the query.
//!
//! Alternatives are explored on clones of the arena, so abandoning a branch
//! needs no undo step. Slots are shared between clones until one of them
//! binds, so a clone costs one pointer per variable whatever the slots hold.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::pattern::Pattern;
use crate::term::{Term, VarId};
use crate::value::Value;

#[derive(Debug, Clone)]
struct Slot {
    /// Source name plus arena index, e.g. `X_3`
    name: String,
    value: Option<Term>,
}

/// The variable cells of one query.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    slots: Vec<Rc<Slot>>,
}

impl Bindings {
    /// Create an empty arena
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an unbound variable named after `base`.
    pub(crate) fn fresh(&mut self, base: &str) -> VarId {
        let id = VarId(self.slots.len());
        self.slots.push(Rc::new(Slot {
            name: format!("{base}_{}", id.0),
            value: None,
        }));
        id
    }

    /// Binds an unbound variable to `term`.
    pub(crate) fn bind(&mut self, var: VarId, term: Term) {
        if let Some(slot) = self.slots.get_mut(var.index()) {
            debug_assert!(slot.value.is_none(), "{} bound twice", slot.name);
            Rc::make_mut(slot).value = Some(term);
        }
    }

    /// Number of variables allocated so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no variable has been allocated yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The term a variable is directly bound to, if any
    #[must_use]
    pub fn value(&self, var: VarId) -> Option<&Term> {
        self.slots.get(var.index()).and_then(|slot| slot.value.as_ref())
    }

    /// Display name of a variable (`X_3`), or `None` for a foreign id
    #[must_use]
    pub fn name(&self, var: VarId) -> Option<&str> {
        self.slots.get(var.index()).map(|slot| slot.name.as_str())
    }

    /// Follows a binding chain to its end: a non-variable term or the last,
    /// still unbound variable.
    #[must_use]
    pub fn walk(&self, term: &Term) -> Term {
        let mut current = term;
        while let Term::Var(var) = current {
            match self.value(*var) {
                Some(next) => current = next,
                None => break,
            }
        }
        current.clone()
    }

    /// Walks `term` and every part of it, collapsing list splits whose parts
    /// became ground.
    #[must_use]
    pub fn resolve(&self, term: &Term) -> Term {
        match self.walk(term) {
            Term::Cons(head, tail) => Term::cons(self.resolve(&head), self.resolve(&tail)),
            other => other,
        }
    }

    /// The final value of `term`, or `None` if any part of it is unbound.
    #[must_use]
    pub fn reify(&self, term: &Term) -> Option<Value> {
        match self.resolve(term) {
            Term::Literal(value) => Some(value),
            Term::Var(_) | Term::Cons(..) => None,
        }
    }
}

/// Maps the variable names of one rule invocation (or of the query itself)
/// to their arena cells, in order of first mention.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    vars: IndexMap<String, VarId>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, name: &str) -> Option<VarId> {
        self.vars.get(name).copied()
    }

    pub(crate) fn insert(&mut self, name: &str, var: VarId) {
        self.vars.insert(name.to_string(), var);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, VarId)> + '_ {
        self.vars.iter().map(|(name, var)| (name.as_str(), *var))
    }

    /// The cell for `name`, allocated on first mention.
    pub(crate) fn var_for(&mut self, name: &str, bindings: &mut Bindings) -> VarId {
        if let Some(var) = self.get(name) {
            return var;
        }
        let var = bindings.fresh(name);
        self.insert(name, var);
        var
    }

    /// Evaluates an argument pattern into the term passed to a predicate.
    pub(crate) fn instantiate(&mut self, pattern: &Pattern, bindings: &mut Bindings) -> Term {
        match pattern {
            Pattern::Literal(value) => Term::Literal(value.clone()),
            Pattern::Var(name) => {
                let var = self.var_for(name, bindings);
                bindings.walk(&Term::Var(var))
            }
            Pattern::Cons(head, tail) => {
                let head = self.instantiate(head, bindings);
                let tail = self.instantiate(tail, bindings);
                Term::cons(head, tail)
            }
        }
    }
}
