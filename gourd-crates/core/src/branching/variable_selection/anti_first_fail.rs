use std::cmp::Reverse;

use super::first_minimising;
use super::VariableSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the largest domain, counting holes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AntiFirstFail;

impl<Var: IntegerVariable> VariableSelector<Var> for AntiFirstFail {
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize {
        first_minimising(domains, variables, start, |variable| {
            Reverse(domains.size(variable))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::variable_selection::tests::space_with;

    #[test]
    fn selects_the_largest_domain() {
        let (space, variables) = space_with(&[(0, 2), (0, 7), (0, 7)]);

        assert_eq!(
            AntiFirstFail.select_variable(space.domains(), &variables, 0),
            1
        );
    }
}
