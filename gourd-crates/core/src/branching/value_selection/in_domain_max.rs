use super::ValueChoice;
use super::ValueSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// [`ValueSelector`] which first tries to assign the upper bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainMax;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMax {
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        ValueChoice::Equal(domains.upper_bound(variable))
    }
}
