//! The contract between the fixpoint loop of a [`Space`](crate::Space) and the propagators
//! posted into it.
//!
//! A propagator is created through a [`PropagatorConstructor`], which subscribes it to the
//! variables it reads through a [`PropagatorConstructorContext`]. Whenever one of those variables
//! changes in a way which matches the subscription, the propagator is scheduled, and the fixpoint
//! loop eventually calls [`Propagator::propagate`] with a [`PropagationContext`]. The
//! [`ExecStatus`] returned by the propagator tells the loop whether the propagator is at
//! fixpoint, subsumed, or wants to be replaced by a different propagator.
mod constructor;
mod contexts;
mod domains;
mod propagator;
mod propagator_id;

pub use constructor::*;
pub use contexts::*;
pub use domains::*;
pub use propagator::*;
pub use propagator_id::PropagatorId;

pub use crate::engine::DomainEvents;
