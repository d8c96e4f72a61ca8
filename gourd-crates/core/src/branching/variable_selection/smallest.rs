use super::first_minimising;
use super::VariableSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the smallest lower bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Smallest;

impl<Var: IntegerVariable> VariableSelector<Var> for Smallest {
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize {
        first_minimising(domains, variables, start, |variable| {
            domains.lower_bound(variable)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::variable_selection::tests::space_with;

    #[test]
    fn selects_the_smallest_lower_bound() {
        let (space, variables) = space_with(&[(3, 9), (-2, 0), (-5, -5), (1, 4)]);

        assert_eq!(
            Smallest.select_variable(space.domains(), &variables, 0),
            1
        );
    }
}
