//! Strategies for selecting the variable an [`IntBrancher`](super::branchers::IntBrancher)
//! branches on.
mod anti_first_fail;
mod first_fail;
mod input_order;
mod largest;
mod max_degree;
mod random;
mod smallest;

use std::fmt::Debug;

pub use anti_first_fail::AntiFirstFail;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;
pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use largest::Largest;
pub use max_degree::MaxDegree;
pub use random::RandomSelector;
pub use smallest::Smallest;

use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

clone_trait_object!(<Var> VariableSelector<Var>);

/// A trait containing the interface for [`VariableSelector`]s, which determine the variable to
/// branch on next.
pub trait VariableSelector<Var>: DynClone + Debug + Send {
    /// Select the position in `variables` of the variable to branch on.
    ///
    /// Every variable before `start` is assigned, while `variables[start]` is not. The selected
    /// variable must be unassigned.
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize;
}

/// The position of the first unassigned variable at or after `start` which minimises `key`.
fn first_minimising<Var, Key>(
    domains: Domains,
    variables: &[Var],
    start: usize,
    key: impl Fn(&Var) -> Key,
) -> usize
where
    Var: IntegerVariable,
    Key: Ord,
{
    variables
        .iter()
        .enumerate()
        .skip(start)
        .filter(|(_, variable)| !domains.is_fixed(*variable))
        .min_by_key(|(_, variable)| key(variable))
        .map(|(index, _)| index)
        .unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::DomainId;
    use crate::Space;

    pub(super) fn space_with(domains: &[(i32, i32)]) -> (Space, Vec<DomainId>) {
        let mut space = Space::default();
        let variables = domains
            .iter()
            .map(|&(lower_bound, upper_bound)| {
                space
                    .new_integer(lower_bound, upper_bound)
                    .expect("non-empty domain")
            })
            .collect();
        (space, variables)
    }

    #[test]
    fn assigned_variables_are_never_selected() {
        let (space, variables) = space_with(&[(0, 5), (3, 3), (1, 2)]);

        let selected = FirstFail.select_variable(space.domains(), &variables, 0);

        assert_eq!(selected, 2);
    }

    #[test]
    fn ties_are_broken_in_input_order() {
        let (space, variables) = space_with(&[(0, 5), (0, 2), (4, 6)]);

        let selected = FirstFail.select_variable(space.domains(), &variables, 0);

        assert_eq!(selected, 1);
    }
}
