//! A small library of propagators on which the search engines can be exercised.
//!
//! Each propagator comes with a `...PropagatorArgs` struct which implements
//! [`PropagatorConstructor`](crate::propagation::PropagatorConstructor); the functions in
//! [`crate::constraints`] post them into a [`Space`](crate::Space).
mod all_different;
pub mod arithmetic;
mod clause;
mod float_less_or_equal;
mod nogoods;
mod set_cardinality;

pub use all_different::*;
pub use clause::*;
pub use float_less_or_equal::*;
pub use nogoods::*;
pub use set_cardinality::*;
