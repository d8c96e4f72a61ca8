//! Defines the constraints that Gourd provides out of the box.
//!
//! A constraint is a relation over variables; posting it adds the propagators which enforce it
//! to a [`Space`](crate::Space). Posting into a failed space is reported as
//! [`ModelError::InfeasibleState`](crate::ModelError::InfeasibleState).
//!
//! # Example
//! ```
//! # use gourd_core::constraints;
//! # use gourd_core::Space;
//! # use gourd_core::SpaceStatus;
//! let mut space = Space::default();
//!
//! let a = space.new_integer(0, 3).unwrap();
//! let b = space.new_integer(0, 3).unwrap();
//!
//! constraints::linear_equal(&mut space, [a, b], 6).unwrap();
//!
//! assert_eq!(space.status(), SpaceStatus::Solved);
//! assert_eq!(space.value_of(a), Some(3));
//! ```
mod all_different;
mod arithmetic;
mod clause;
mod float;
mod set;

pub use all_different::*;
pub use arithmetic::*;
pub use clause::*;
pub use float::*;
pub use set::*;
