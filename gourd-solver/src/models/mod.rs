//! Benchmark models which exercise the different kinds of variables and engines.
//!
//! Every model is built on top of a given [`Space`], so the caller decides how the space
//! schedules its propagators.
mod golomb;
mod partition;
mod queens;

use std::fmt::Debug;

pub use golomb::golomb;
pub use golomb::Golomb;
pub use partition::partition;
pub use partition::Partition;
pub use queens::queens;
pub use queens::Queens;

use crate::Space;

/// A model with its variables, constraints and branchers posted into a space.
pub trait Model: Debug {
    /// The space holding the model; search engines are created from it.
    fn space(&mut self) -> &mut Space;

    /// A human-readable rendering of the variables of the model in `solution`.
    fn format_solution(&self, solution: &Space) -> String;
}
