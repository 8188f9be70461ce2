use indexmap::IndexMap;
use log::debug;

use crate::call::Call;
use crate::error::{Error, Result};
use crate::predicate::{Builtin, Predicate, PredicateId};
use crate::query::{Solution, Solutions};
use crate::rule::Rule;
use crate::spec::Spec;

/// A program: named predicates and their rules.
///
/// Predicates refer to each other through [`PredicateId`] handles, so a
/// predicate can be declared first and given (possibly recursive) rules
/// afterwards. The database is read-only while queries run.
#[derive(Debug, Clone)]
pub struct Database {
    predicates: Vec<Predicate>,
    by_name: IndexMap<String, PredicateId>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// The `fail` built-in
    pub const FAIL: PredicateId = PredicateId(0);
    /// The `true` built-in
    pub const SUCCEED: PredicateId = PredicateId(1);
    /// The `not` built-in; invoke it through [`Call::not`]
    pub const NOT: PredicateId = PredicateId(2);

    /// Create a database holding only the built-ins
    #[must_use]
    pub fn new() -> Self {
        let mut db = Self {
            predicates: Vec::new(),
            by_name: IndexMap::new(),
        };
        for builtin in [Builtin::Fail, Builtin::Succeed, Builtin::Not] {
            db.insert(Predicate::builtin(builtin));
        }
        db
    }

    fn insert(&mut self, predicate: Predicate) -> PredicateId {
        let id = PredicateId(self.predicates.len());
        self.by_name.insert(predicate.name().to_string(), id);
        self.predicates.push(predicate);
        id
    }

    /// Declares a predicate, or returns the existing one with that name.
    pub fn predicate(&mut self, name: &str) -> PredicateId {
        match self.lookup(name) {
            Some(id) => id,
            None => self.insert(Predicate::user(name)),
        }
    }

    /// Looks up a predicate by name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<PredicateId> {
        self.by_name.get(name).copied()
    }

    /// The predicate behind `id`
    #[must_use]
    pub fn get(&self, id: PredicateId) -> Option<&Predicate> {
        self.predicates.get(id.0)
    }

    /// Name of the predicate behind `id`
    #[must_use]
    pub fn name(&self, id: PredicateId) -> Option<&str> {
        self.get(id).map(Predicate::name)
    }

    /// All predicates, built-ins first, in declaration order
    pub fn predicates(&self) -> impl Iterator<Item = (PredicateId, &Predicate)> + '_ {
        self.predicates
            .iter()
            .enumerate()
            .map(|(index, predicate)| (PredicateId(index), predicate))
    }

    /// Appends a rule built from head specs to a predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognisedSpec`] for a malformed head spec, plus
    /// everything [`Database::add_rule`] returns.
    pub fn add<S: Into<Spec>>(
        &mut self,
        id: PredicateId,
        head: impl IntoIterator<Item = S>,
        body: Vec<Call>,
    ) -> Result<()> {
        let rule = Rule::from_specs(head, body)?;
        self.add_rule(id, rule)
    }

    /// Appends a pre-built rule to a predicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPredicate`] if `id` or any body call target
    /// was not issued by this database, and [`Error::BuiltinPredicate`] if
    /// `id` is a built-in.
    pub fn add_rule(&mut self, id: PredicateId, rule: Rule) -> Result<()> {
        rule.check_targets(self)?;
        let predicate = self
            .predicates
            .get_mut(id.0)
            .ok_or(Error::UnknownPredicate(id))?;
        debug!("{}: adding rule {rule}", predicate.name());
        predicate.push_rule(rule)
    }

    /// Lazily enumerates the solutions of `id` applied to `terms`.
    ///
    /// Variable names in `terms` (uppercase-leading strings) are the names
    /// each [`Solution`] reports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPredicate`] for a foreign id,
    /// [`Error::NegationArity`] for `not`, and [`Error::UnrecognisedSpec`]
    /// for a malformed term spec.
    pub fn possibles<S: Into<Spec>>(
        &self,
        id: PredicateId,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Solutions<'_>> {
        let predicate = self.get(id).ok_or(Error::UnknownPredicate(id))?;
        if predicate.as_builtin() == Some(Builtin::Not) {
            return Err(Error::NegationArity);
        }
        debug!("query {}", predicate.name());
        Solutions::start(terms, |args, bindings| predicate.solve(self, args, bindings))
    }

    /// Returns every solution of `id` applied to `terms`, in search order.
    ///
    /// # Errors
    ///
    /// Same as [`Database::possibles`].
    pub fn query<S: Into<Spec>>(
        &self,
        id: PredicateId,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<Vec<Solution>> {
        Ok(self.possibles(id, terms)?.collect())
    }

    /// Returns whether `id` applied to `terms` has at least one solution.
    ///
    /// # Errors
    ///
    /// Same as [`Database::possibles`].
    pub fn ask<S: Into<Spec>>(
        &self,
        id: PredicateId,
        terms: impl IntoIterator<Item = S>,
    ) -> Result<bool> {
        Ok(self.possibles(id, terms)?.next().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// inlist(X, []) :- fail.
    /// inlist(X, [X|L]).
    /// inlist(X, [Y|L]) :- inlist(X, L).
    /// uniq([]).
    /// uniq([X|L]) :- not inlist(X, L), uniq(L).
    fn list_program() -> (Database, PredicateId, PredicateId) {
        init_logging();
        let mut db = Database::new();
        let inlist = db.predicate("inlist");
        db.add(inlist, [Spec::from("X"), Spec::nil()], vec![Call::fail()])
            .unwrap();
        db.add(inlist, [Spec::from("X"), Spec::cons("X", "L")], vec![])
            .unwrap();
        db.add(
            inlist,
            [Spec::from("X"), Spec::cons("Y", "L")],
            vec![Call::new(inlist, ["X", "L"]).unwrap()],
        )
        .unwrap();

        let uniq = db.predicate("uniq");
        db.add(uniq, [Spec::nil()], vec![]).unwrap();
        db.add(
            uniq,
            [Spec::cons("X", "L")],
            vec![
                Call::not(Call::new(inlist, ["X", "L"]).unwrap()),
                Call::new(uniq, ["L"]).unwrap(),
            ],
        )
        .unwrap();
        (db, inlist, uniq)
    }

    fn list(items: &[i64]) -> Spec {
        Spec::list(items.iter().copied())
    }

    #[test]
    fn test_builtins_are_registered() {
        let db = Database::new();
        assert_eq!(db.lookup("fail"), Some(Database::FAIL));
        assert_eq!(db.lookup("true"), Some(Database::SUCCEED));
        assert_eq!(db.lookup("not"), Some(Database::NOT));
        assert_eq!(db.predicates().count(), 3);
    }

    #[test]
    fn test_predicate_is_get_or_declare() {
        let mut db = Database::new();
        let a = db.predicate("edge");
        let b = db.predicate("edge");
        assert_eq!(a, b);
        assert_eq!(db.name(a), Some("edge"));
        assert_eq!(db.predicate("fail"), Database::FAIL);
    }

    #[test]
    fn test_inlist_member() {
        let (db, inlist, _) = list_program();
        let solutions = db.query(inlist, [Spec::from(2), list(&[1, 2, 3])]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_empty(), "ground query binds nothing");
    }

    #[test]
    fn test_inlist_non_member() {
        let (db, inlist, _) = list_program();
        assert!(!db.ask(inlist, [Spec::from(4), list(&[1, 2, 3])]).unwrap());
    }

    #[test]
    fn test_uniq() {
        let (db, _, uniq) = list_program();
        assert_eq!(db.query(uniq, [list(&[1, 2, 3])]).unwrap().len(), 1);
        assert_eq!(db.query(uniq, [list(&[1, 2, 1])]).unwrap().len(), 0);
        assert_eq!(db.query(uniq, [list(&[1, 2, 1, 3])]).unwrap().len(), 0);
        assert_eq!(db.query(uniq, [Spec::nil()]).unwrap().len(), 1);
    }

    #[test]
    fn test_inlist_enumerates_members_in_order() {
        let (db, inlist, _) = list_program();
        let values: Vec<Value> = db
            .possibles(inlist, [Spec::from("Q"), list(&[1, 2, 3])])
            .unwrap()
            .map(|s| s.get("Q").cloned().unwrap())
            .collect();
        assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        let (db, inlist, _) = list_program();
        let run = || db.query(inlist, [Spec::from("Q"), list(&[3, 1, 3])]).unwrap();
        assert_eq!(run(), run());
        assert_eq!(run().len(), 3);
    }

    #[test]
    fn test_recursive_frames_do_not_share_bindings() {
        // last(X, [X|[]]).
        // last(X, [Y|L]) :- last(X, L).
        let mut db = Database::new();
        let last = db.predicate("last");
        db.add(last, [Spec::from("X"), Spec::cons("X", Spec::nil())], vec![])
            .unwrap();
        db.add(
            last,
            [Spec::from("X"), Spec::cons("Y", "L")],
            vec![Call::new(last, ["X", "L"]).unwrap()],
        )
        .unwrap();

        let solutions = db.query(last, [Spec::from("Q"), list(&[1, 2, 3])]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("Q"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_head_decomposition_reported_to_caller() {
        // split([H|T], H, T).
        let mut db = Database::new();
        let split = db.predicate("split");
        db.add(split, [Spec::cons("H", "T"), "H".into(), "T".into()], vec![])
            .unwrap();

        let solutions = db
            .query(split, [list(&[1, 2, 3]), "X".into(), "L".into()])
            .unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].to_string(), "{X: 1, L: [2, 3]}");
    }

    #[test]
    fn test_variable_aliasing_through_rules() {
        // same(X, X).
        // seven(7).
        // both(A, B) :- same(A, B), seven(A).
        let mut db = Database::new();
        let same = db.predicate("same");
        db.add(same, ["X", "X"], vec![]).unwrap();
        let seven = db.predicate("seven");
        db.add(seven, [7], vec![]).unwrap();
        let both = db.predicate("both");
        db.add(
            both,
            ["A", "B"],
            vec![
                Call::new(same, ["A", "B"]).unwrap(),
                Call::new(seven, ["A"]).unwrap(),
            ],
        )
        .unwrap();

        let solutions = db.query(both, ["P", "Q"]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("P"), Some(&Value::Int(7)));
        assert_eq!(solutions[0].get("Q"), Some(&Value::Int(7)));

        // Unbound aliases are left out of the solution
        let unbound = db.query(same, ["P", "Q"]).unwrap();
        assert_eq!(unbound.len(), 1);
        assert!(unbound[0].is_empty());
    }

    #[test]
    fn test_bound_variables_unify_by_value() {
        let mut db = Database::new();
        let same = db.predicate("same");
        db.add(same, ["X", "X"], vec![]).unwrap();
        assert!(db.ask(same, [1, 1]).unwrap());
        assert!(!db.ask(same, [1, 2]).unwrap());
        assert!(db.ask(same, [list(&[1, 2]), list(&[1, 2])]).unwrap());
    }

    #[test]
    fn test_same_query_variable_twice() {
        let mut db = Database::new();
        let pair = db.predicate("pair");
        db.add(pair, ["a", "b"], vec![]).unwrap();
        db.add(pair, ["c", "c"], vec![]).unwrap();

        let solutions = db.query(pair, ["X", "X"]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("X"), Some(&Value::from("c")));
    }

    #[test]
    fn test_negation_laws() {
        let (mut db, inlist, _) = list_program();
        // absent(X, L) :- not inlist(X, L).
        let absent = db.predicate("absent");
        db.add(
            absent,
            ["X", "L"],
            vec![Call::not(Call::new(inlist, ["X", "L"]).unwrap())],
        )
        .unwrap();
        // never(Q) :- not fail.
        let never = db.predicate("never");
        db.add(never, ["Q"], vec![Call::not(Call::fail())]).unwrap();

        assert_eq!(db.query(absent, [Spec::from(9), list(&[1, 2])]).unwrap().len(), 1);
        // Three inner solutions still give none
        assert_eq!(db.query(absent, [Spec::from("Z"), list(&[1, 2, 3])]).unwrap().len(), 0);

        let solutions = db.query(never, ["Q"]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_empty(), "not binds nothing");
    }

    #[test]
    fn test_succeed_builtin_in_body() {
        let mut db = Database::new();
        let yes = db.predicate("yes");
        db.add(yes, ["X"], vec![Call::succeed(), Call::succeed()])
            .unwrap();
        assert_eq!(db.query(yes, [1]).unwrap().len(), 1);
        assert_eq!(db.query(Database::SUCCEED, Vec::<Spec>::new()).unwrap().len(), 1);
        assert_eq!(db.query(Database::FAIL, Vec::<Spec>::new()).unwrap().len(), 0);
    }

    #[test]
    fn test_add_to_builtin_is_an_error() {
        let mut db = Database::new();
        let err = db.add(Database::FAIL, ["X"], vec![]).unwrap_err();
        assert!(matches!(err, Error::BuiltinPredicate(ref name) if name == "fail"));
        let err = db.add(Database::NOT, ["X"], vec![]).unwrap_err();
        assert!(matches!(err, Error::BuiltinPredicate(_)));
    }

    #[test]
    fn test_unknown_predicates_are_rejected() {
        let mut db = Database::new();
        let p = db.predicate("p");
        let foreign = PredicateId(99);

        let err = db
            .add(p, ["X"], vec![Call::new(foreign, ["X"]).unwrap()])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPredicate(id) if id == foreign));

        let err = db.add(foreign, ["X"], vec![]).unwrap_err();
        assert!(matches!(err, Error::UnknownPredicate(_)));

        assert!(matches!(
            db.possibles(foreign, ["X"]).unwrap_err(),
            Error::UnknownPredicate(_)
        ));
    }

    #[test]
    fn test_querying_not_directly_is_an_error() {
        let db = Database::new();
        assert!(matches!(
            db.possibles(Database::NOT, ["X"]).unwrap_err(),
            Error::NegationArity
        ));
    }

    #[test]
    fn test_malformed_head_spec_is_an_error() {
        let mut db = Database::new();
        let p = db.predicate("p");
        let bad = Spec::list([Spec::cons("X", "L")]);
        assert!(matches!(
            db.add(p, [bad], vec![]).unwrap_err(),
            Error::UnrecognisedSpec { what: "arg", .. }
        ));
        assert!(db.get(p).unwrap().rules().is_empty());
    }

    #[test]
    fn test_float_and_bool_literals() {
        let mut db = Database::new();
        let weight = db.predicate("weight");
        db.add(weight, [Spec::from("apple"), Spec::from(1.2)], vec![])
            .unwrap();
        db.add(weight, [Spec::from("pear"), Spec::from(1)], vec![])
            .unwrap();
        let ripe = db.predicate("ripe");
        db.add(ripe, [Spec::from("apple"), Spec::from(true)], vec![])
            .unwrap();

        let solutions = db.query(weight, ["F", "W"]).unwrap();
        assert_eq!(solutions[0].to_string(), "{F: apple, W: 1.2}");
        assert!(db.ask(weight, [Spec::from("apple"), Spec::from(1.2)]).unwrap());
        // 1.0 is not the integer 1
        assert!(!db.ask(weight, [Spec::from("pear"), Spec::from(1.0)]).unwrap());
        assert!(db.ask(ripe, [Spec::from("apple"), Spec::from(true)]).unwrap());
        assert!(!db.ask(ripe, [Spec::from("apple"), Spec::from(false)]).unwrap());
    }

    #[test]
    fn test_recursion_over_long_list() {
        let mut db = Database::new();
        let last = db.predicate("last");
        db.add(last, [Spec::from("X"), Spec::cons("X", Spec::nil())], vec![])
            .unwrap();
        db.add(
            last,
            [Spec::from("X"), Spec::cons("Y", "L")],
            vec![Call::new(last, ["X", "L"]).unwrap()],
        )
        .unwrap();

        let items = Spec::list(0..250_i64);
        let solutions = db.query(last, [Spec::from("Q"), items]).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("Q"), Some(&Value::Int(249)));
    }

    #[test]
    fn test_solutions_can_be_abandoned() {
        // nat(0). nat(N) :- nat(N).  -- infinitely many solutions
        let mut db = Database::new();
        let nat = db.predicate("nat");
        db.add(nat, [0], vec![]).unwrap();
        db.add(nat, ["N"], vec![Call::new(nat, ["N"]).unwrap()])
            .unwrap();

        let first: Vec<Solution> = db.possibles(nat, ["Q"]).unwrap().take(5).collect();
        assert_eq!(first.len(), 5);
        assert!(first.iter().all(|s| s.get("Q") == Some(&Value::Int(0))));
    }
}
