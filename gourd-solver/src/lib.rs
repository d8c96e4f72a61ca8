//! # Gourd
//! Gourd is a constraint programming solver based on propagation and copying/recomputation
//! search. This crate re-exports the core of the solver, see [`gourd_core`], together with a
//! handful of benchmark [`models`] which are also available through the `gourd-solver` binary.
//!
//! # Example
//! ```rust
//! # use gourd_solver::models;
//! # use gourd_solver::models::Model;
//! # use gourd_solver::search;
//! # use gourd_solver::search::SearchOptions;
//! # use gourd_solver::Space;
//! let mut queens = models::queens(Space::default(), 6).unwrap();
//!
//! let mut engine = search::dfs(queens.space(), SearchOptions::default()).unwrap();
//!
//! let mut solutions = 0;
//! while let Some(solution) = engine.next() {
//!     println!("{}", queens.format_solution(&solution));
//!     solutions += 1;
//! }
//!
//! assert_eq!(solutions, 4);
//! ```
pub mod models;

pub use gourd_core::*;
