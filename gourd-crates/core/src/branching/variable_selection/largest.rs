use std::cmp::Reverse;

use super::first_minimising;
use super::VariableSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the largest upper bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Largest;

impl<Var: IntegerVariable> VariableSelector<Var> for Largest {
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize {
        first_minimising(domains, variables, start, |variable| {
            Reverse(domains.upper_bound(variable))
        })
    }
}
