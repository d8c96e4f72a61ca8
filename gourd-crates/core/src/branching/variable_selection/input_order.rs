use super::VariableSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;

/// A [`VariableSelector`] which selects the first unassigned variable in the order in which the
/// variables were provided.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputOrder;

impl<Var: IntegerVariable> VariableSelector<Var> for InputOrder {
    fn select_variable(&mut self, _domains: Domains, _variables: &[Var], start: usize) -> usize {
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::variable_selection::tests::space_with;

    #[test]
    fn selects_the_first_unassigned_variable() {
        let (space, variables) = space_with(&[(1, 1), (0, 10), (0, 1)]);

        assert_eq!(
            InputOrder.select_variable(space.domains(), &variables, 1),
            1
        );
    }
}
