//! Contains structures and traits to define how the search tree is split.
//!
//! A [`Brancher`] is added to a [`Space`](crate::Space) through
//! [`Space::branch`](crate::Space::branch). When the fixpoint of propagation is reached and the
//! space is not yet solved, the first brancher of the chain which still has work produces a
//! [`Choice`]. The search engines then commit the alternatives of that choice in copies of the
//! space.
//!
//! The integer brancher [`IntBrancher`] is composed of a [`VariableSelector`], which picks the
//! variable to branch on, and a [`ValueSelector`], which decides how the domain of that variable
//! is split:
//! ```rust
//! # use gourd_core::Space;
//! # use gourd_core::branching::branchers::IntBrancher;
//! # use gourd_core::branching::variable_selection::FirstFail;
//! # use gourd_core::branching::value_selection::InDomainMin;
//! let mut space = Space::default();
//! let variables = space.new_integers(3, 0, 5).unwrap();
//!
//! let _ = space.branch(IntBrancher::new(&variables, FirstFail, InDomainMin));
//! ```
//! The common strategies can also be chosen through [`VariableSelection`] and
//! [`ValueSelection`].
mod brancher;
pub mod branchers;
mod choice;
mod literal;
mod symmetry;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::*;
pub use choice::*;
pub use literal::*;
pub use symmetry::Symmetry;

use crate::engine::variables::IntegerVariable;
use value_selection::*;
use variable_selection::*;

/// The predefined strategies for selecting the variable to branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableSelection {
    /// The first unassigned variable.
    InputOrder,
    /// The variable with the smallest domain.
    FirstFail,
    /// The variable with the largest domain.
    AntiFirstFail,
    /// The variable with the smallest lower bound.
    Smallest,
    /// The variable with the largest upper bound.
    Largest,
    /// The variable with the most subscribed propagators.
    MaxDegree,
    /// A uniformly random unassigned variable.
    Random { seed: u64 },
}

impl VariableSelection {
    pub fn into_selector<Var: IntegerVariable>(self) -> Box<dyn VariableSelector<Var>> {
        match self {
            VariableSelection::InputOrder => Box::new(InputOrder),
            VariableSelection::FirstFail => Box::new(FirstFail),
            VariableSelection::AntiFirstFail => Box::new(AntiFirstFail),
            VariableSelection::Smallest => Box::new(Smallest),
            VariableSelection::Largest => Box::new(Largest),
            VariableSelection::MaxDegree => Box::new(MaxDegree),
            VariableSelection::Random { seed } => Box::new(RandomSelector::new(seed)),
        }
    }
}

/// The predefined strategies for splitting the domain of the selected variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueSelection {
    /// `x = min | x != min`
    Min,
    /// `x = max | x != max`
    Max,
    /// `x = median | x != median`
    Median,
    /// `x <= mid | x > mid`
    Split,
    /// `x > mid | x <= mid`
    ReverseSplit,
    /// `x = v | x != v` for a uniformly random value `v` of the domain.
    Random { seed: u64 },
    /// One alternative per value in the domain, in increasing order.
    AllValues,
}

impl ValueSelection {
    pub fn into_selector<Var: IntegerVariable>(self) -> Box<dyn ValueSelector<Var>> {
        match self {
            ValueSelection::Min => Box::new(InDomainMin),
            ValueSelection::Max => Box::new(InDomainMax),
            ValueSelection::Median => Box::new(InDomainMedian),
            ValueSelection::Split => Box::new(InDomainSplit),
            ValueSelection::ReverseSplit => Box::new(InDomainReverseSplit),
            ValueSelection::Random { seed } => Box::new(InDomainRandom::new(seed)),
            ValueSelection::AllValues => Box::new(AllValues),
        }
    }
}
