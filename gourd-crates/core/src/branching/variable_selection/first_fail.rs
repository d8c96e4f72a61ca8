use super::first_minimising;
use super::VariableSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the smallest domain, counting holes.
///
/// Ties are broken in favour of the variable which was provided first.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFail;

impl<Var: IntegerVariable> VariableSelector<Var> for FirstFail {
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize {
        first_minimising(domains, variables, start, |variable| domains.size(variable))
    }
}
