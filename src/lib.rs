//! # Hornlog
//!
//! A minimal Horn-clause resolution engine in Rust.
//!
//! ## Features
//!
//! - Unification with variable aliasing and `[H|T]` list decomposition
//! - Fresh variables for every rule invocation
//! - Depth-first search with chronological backtracking
//! - Lazy solution streams that can be abandoned at any point
//! - Built-in `fail`, `true` and negation as failure
//!
//! ## Example
//!
//! ```rust
//! use hornlog::{Call, Database, Spec, Value};
//!
//! let mut db = Database::new();
//!
//! // inlist(X, [X|L]).
//! // inlist(X, [Y|L]) :- inlist(X, L).
//! let inlist = db.predicate("inlist");
//! db.add(inlist, [Spec::from("X"), Spec::cons("X", "L")], vec![])?;
//! db.add(
//!     inlist,
//!     [Spec::from("X"), Spec::cons("Y", "L")],
//!     vec![Call::new(inlist, ["X", "L"])?],
//! )?;
//!
//! let members: Vec<Value> = db
//!     .possibles(inlist, [Spec::from("Q"), Spec::list([1, 2, 3])])?
//!     .filter_map(|solution| solution.get("Q").cloned())
//!     .collect();
//! assert_eq!(members, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
//!
//! assert!(!db.ask(inlist, [Spec::from(4), Spec::list([1, 2, 3])])?);
//! # Ok::<(), hornlog::Error>(())
//! ```
//!
//! Set `RUST_LOG=hornlog=trace` to follow the search step by step.

mod bindings;
mod call;
mod database;
mod error;
mod pattern;
mod predicate;
mod query;
mod rule;
mod solve;
mod spec;
mod term;
mod unify;
mod value;

pub mod trace;

pub use bindings::Bindings;
pub use call::Call;
pub use database::Database;
pub use error::{Error, Result};
pub use pattern::Pattern;
pub use predicate::{Builtin, Predicate, PredicateId};
pub use query::{Solution, Solutions};
pub use rule::Rule;
pub use spec::{Spec, SpecKind};
pub use term::{Term, VarId};
pub use trace::Show;
pub use value::Value;
