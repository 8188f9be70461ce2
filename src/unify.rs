//! Matching patterns against terms.
//!
//! [`match_pattern`] is one-sided: the pattern comes from a rule head and the
//! term is an actual argument. New pattern names are allocated as fresh cells
//! in the local scope. When a name meets a caller variable the local cell is
//! linked to it, which is how bindings made inside the rule flow back out.
//!
//! There is no occurs check.

use log::trace;

use crate::bindings::{Bindings, Scope};
use crate::pattern::Pattern;
use crate::term::Term;
use crate::value::Value;

/// Matches `pattern` against `term`, binding local names into `scope` and
/// cells into `bindings`.
///
/// A `false` result leaves `scope` and `bindings` partially updated; callers
/// discard both.
pub(crate) fn match_pattern(
    pattern: &Pattern,
    term: &Term,
    scope: &mut Scope,
    bindings: &mut Bindings,
) -> bool {
    let term = bindings.walk(term);
    let matched = match pattern {
        Pattern::Var(name) => match_name(name, &term, scope, bindings),
        Pattern::Cons(head, tail) => match &term {
            Term::Literal(value) => match value.split_first() {
                Some((first, rest)) => {
                    match_pattern(head, &first.into(), scope, bindings)
                        && match_pattern(tail, &rest.into(), scope, bindings)
                }
                None => false,
            },
            // An unbound cell cannot be decomposed
            Term::Var(_) => false,
            Term::Cons(term_head, term_tail) => {
                match_pattern(head, term_head, scope, bindings)
                    && match_pattern(tail, term_tail, scope, bindings)
            }
        },
        Pattern::Literal(value) => match_literal(value, &term, scope, bindings),
    };
    trace!("match {pattern} ~ {term}: {matched}");
    matched
}

fn match_name(name: &str, term: &Term, scope: &mut Scope, bindings: &mut Bindings) -> bool {
    match (scope.get(name), term) {
        // A bare name never absorbs a list split
        (_, Term::Cons(..)) => false,
        (None, term) => {
            let var = bindings.fresh(name);
            scope.insert(name, var);
            bindings.bind(var, term.clone());
            true
        }
        (Some(local), term) => unify(&Term::Var(local), term, bindings),
    }
}

fn match_literal(value: &Value, term: &Term, scope: &mut Scope, bindings: &mut Bindings) -> bool {
    match term {
        Term::Literal(other) => value == other,
        Term::Var(var) => {
            bindings.bind(*var, Term::Literal(value.clone()));
            true
        }
        Term::Cons(term_head, term_tail) => match value.split_first() {
            Some((first, rest)) => {
                match_pattern(&Pattern::Literal(first), term_head, scope, bindings)
                    && match_pattern(&Pattern::Literal(rest), term_tail, scope, bindings)
            }
            None => false,
        },
    }
}

/// Two-sided unification of runtime terms.
///
/// Two bound variables unify by their final values: unequal values fail,
/// equal values change nothing.
pub(crate) fn unify(left: &Term, right: &Term, bindings: &mut Bindings) -> bool {
    match (bindings.walk(left), bindings.walk(right)) {
        (Term::Var(x), Term::Var(y)) if x == y => true,
        (Term::Var(var), other) | (other, Term::Var(var)) => {
            bindings.bind(var, other);
            true
        }
        (Term::Literal(a), Term::Literal(b)) => a == b,
        (Term::Cons(head, tail), Term::Literal(value))
        | (Term::Literal(value), Term::Cons(head, tail)) => match value.split_first() {
            Some((first, rest)) => {
                unify(&head, &first.into(), bindings) && unify(&tail, &rest.into(), bindings)
            }
            None => false,
        },
        (Term::Cons(head_a, tail_a), Term::Cons(head_b, tail_b)) => {
            unify(&head_a, &head_b, bindings) && unify(&tail_a, &tail_b, bindings)
        }
    }
}
