use std::fmt::Debug;

use downcast_rs::impl_downcast;
use downcast_rs::Downcast;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::DynPropagatorConstructor;
use super::PropagationContext;
use super::PropagatorConstructor;
use crate::basic_types::PropagationStatus;

// Allows tests and tooling to inspect the concrete type of a `Box<dyn Propagator>`.
impl_downcast!(Propagator);

// Cloning a space clones every propagator it owns.
clone_trait_object!(Propagator);

/// All propagators implement the [`Propagator`] trait.
///
/// Propagators are created through a [`PropagatorConstructor`], which registers the variables the
/// propagator depends on. A propagator is only ever called by the fixpoint loop of the space that
/// owns it, and never on a failed space.
///
/// See the [`crate::propagation`] documentation for more details.
pub trait Propagator: Downcast + DynClone + Debug + Send {
    /// Return the name of the propagator, used for logging.
    fn name(&self) -> &str;

    /// The cost class of the propagator; cheaper propagators are executed first.
    fn cost(&self) -> PropagationCost {
        PropagationCost::LinearLo
    }

    /// Narrow the domains of the variables of the propagator.
    ///
    /// Returns an [`Inconsistency`](crate::Inconsistency) if the constraint cannot be satisfied
    /// anymore. Otherwise, the [`ExecStatus`] describes what the fixpoint loop should do with the
    /// propagator:
    /// - [`ExecStatus::Fix`]: the propagator is at fixpoint, even if it changed its own variables.
    /// - [`ExecStatus::NoFix`]: the propagator is rescheduled if it changed one of its own
    ///   variables.
    /// - [`ExecStatus::Subsumed`]: the propagator is entailed and removed from the space.
    /// - [`ExecStatus::Rewrite`]: the propagator is replaced by the given one.
    fn propagate(&mut self, context: PropagationContext) -> PropagationStatus<ExecStatus>;

    /// Called when the propagator leaves the space because it is subsumed or rewritten.
    fn dispose(&mut self) {}
}

/// What the fixpoint loop does with a propagator after it has executed.
pub enum ExecStatus {
    Fix,
    NoFix,
    Subsumed,
    Rewrite(Box<dyn DynPropagatorConstructor>),
}

impl ExecStatus {
    /// Replace the running propagator with the propagator created by `constructor`.
    pub fn rewrite<Constructor>(constructor: Constructor) -> ExecStatus
    where
        Constructor: PropagatorConstructor + Send + 'static,
    {
        ExecStatus::Rewrite(Box::new(constructor))
    }
}

impl Debug for ExecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecStatus::Fix => write!(f, "Fix"),
            ExecStatus::NoFix => write!(f, "NoFix"),
            ExecStatus::Subsumed => write!(f, "Subsumed"),
            ExecStatus::Rewrite(_) => write!(f, "Rewrite(..)"),
        }
    }
}

/// The coarse cost classes used to order propagator execution; the propagators of a cheaper
/// class run before those of a more expensive class, and propagators within a class run in the
/// order in which they were scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, enum_map::Enum)]
pub enum PropagationCost {
    Unary,
    Binary,
    Ternary,
    LinearLo,
    LinearHi,
    QuadraticLo,
    QuadraticHi,
    Cubic,
    Crazy,
}

impl PropagationCost {
    /// The linear cost class for a propagator over `n` variables.
    pub fn linear(n: usize) -> PropagationCost {
        match n {
            0 | 1 => PropagationCost::Unary,
            2 => PropagationCost::Binary,
            3 => PropagationCost::Ternary,
            n if n <= 6 => PropagationCost::LinearLo,
            _ => PropagationCost::LinearHi,
        }
    }

    /// The quadratic cost class for a propagator over `n` variables.
    pub fn quadratic(n: usize) -> PropagationCost {
        match n {
            0 | 1 => PropagationCost::Unary,
            2 => PropagationCost::Binary,
            3 => PropagationCost::Ternary,
            n if n <= 6 => PropagationCost::QuadraticLo,
            _ => PropagationCost::QuadraticHi,
        }
    }
}
