//! # Gourd
//! Gourd is a constraint programming solver based on propagation and copying/recomputation
//! search. A model is built in a [`Space`]: variables are created in it, constraints are posted
//! as propagators, and branchers describe the search tree. A search engine from [`search`] then
//! explores that tree.
//!
//! # Example
//! ```rust
//! # use gourd_core::Space;
//! # use gourd_core::branching::branchers::IntBrancher;
//! # use gourd_core::branching::value_selection::InDomainMin;
//! # use gourd_core::branching::variable_selection::InputOrder;
//! # use gourd_core::constraints;
//! # use gourd_core::search;
//! # use gourd_core::search::SearchOptions;
//! let mut space = Space::default();
//! let x = space.new_integer(0, 10).unwrap();
//! let y = space.new_integer(0, 10).unwrap();
//!
//! // x + y = 10, x < y
//! constraints::linear_equal(&mut space, [x, y], 10).unwrap();
//! constraints::less_than(&mut space, x, y).unwrap();
//!
//! // Maximise x.
//! space.maximise(x);
//! space.branch(IntBrancher::new(&[x, y], InputOrder, InDomainMin));
//!
//! let mut engine = search::bab(&mut space, SearchOptions::default()).unwrap();
//! let mut best = None;
//! while let Some(solution) = engine.next() {
//!     best = solution.value_of(x);
//! }
//!
//! assert_eq!(best, Some(4));
//! ```
#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;

pub mod branching;
pub mod constraints;
pub mod propagation;
pub mod propagators;
pub mod search;
pub mod statistics;
pub mod termination;

pub use convert_case;
pub use rand;

/// The variables of a space and the views over them.
pub mod variables {
    pub use crate::engine::variables::*;
}

pub use crate::basic_types::sequence_generators;
pub use crate::basic_types::EmptyDomain;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::Random;
pub use crate::engine::DomainEvent;
pub use crate::engine::DomainEvents;
pub use crate::engine::FloatDomain;
pub use crate::engine::IntDomain;
pub use crate::engine::Maximise;
pub use crate::engine::Minimise;
pub use crate::engine::ModEvent;
pub use crate::engine::Objective;
pub use crate::engine::SchedulingPolicy;
pub use crate::engine::SetDomain;
pub use crate::engine::Space;
pub use crate::engine::SpaceStatus;
pub use crate::engine::VariableStore;
pub use crate::engine::WatchLists;
