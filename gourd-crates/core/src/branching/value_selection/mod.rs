//! Strategies for splitting the domain of the variable selected by an
//! [`IntBrancher`](super::branchers::IntBrancher).
mod all_values;
mod in_domain_max;
mod in_domain_median;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;

use std::fmt::Debug;

pub use all_values::AllValues;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;
pub use in_domain_max::InDomainMax;
pub use in_domain_median::InDomainMedian;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;
pub use in_domain_split::InDomainReverseSplit;
pub use in_domain_split::InDomainSplit;

use crate::propagation::Domains;

clone_trait_object!(<Var> ValueSelector<Var>);

/// A trait containing the interface for [`ValueSelector`]s, which decide how the domain of the
/// selected variable is split into alternatives.
pub trait ValueSelector<Var>: DynClone + Debug + Send {
    /// Split the domain of `variable`, which is unassigned.
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice;
}

/// How the domain of a variable `x` is split.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueChoice {
    /// `x = v | x != v`
    Equal(i32),
    /// `x <= v | x > v`
    LessOrEqual(i32),
    /// `x >= v | x < v`
    GreaterOrEqual(i32),
    /// `x = v_0 | x = v_1 | ...`
    Values(Vec<i32>),
}

impl ValueChoice {
    pub fn alternatives(&self) -> u32 {
        match self {
            ValueChoice::Values(values) => values.len() as u32,
            _ => 2,
        }
    }
}
