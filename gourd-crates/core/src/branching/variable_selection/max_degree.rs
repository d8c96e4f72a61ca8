use std::cmp::Reverse;

use super::first_minimising;
use super::VariableSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable on which the most propagators depend.
///
/// Subsumed propagators no longer count towards the degree of a variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxDegree;

impl<Var: IntegerVariable> VariableSelector<Var> for MaxDegree {
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize {
        first_minimising(domains, variables, start, |variable| {
            Reverse(domains.degree(variable))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::variable_selection::tests::space_with;
    use crate::constraints;

    #[test]
    fn selects_the_most_constrained_variable() {
        let (mut space, variables) = space_with(&[(0, 9), (0, 9), (0, 9)]);
        let _ = constraints::not_equals(&mut space, variables[0], variables[2]).expect("feasible");
        let _ = constraints::not_equals(&mut space, variables[1], variables[2]).expect("feasible");

        assert_eq!(
            MaxDegree.select_variable(space.domains(), &variables, 0),
            2
        );
    }
}
