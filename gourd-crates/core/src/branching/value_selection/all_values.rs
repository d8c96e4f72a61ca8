use super::ValueChoice;
use super::ValueSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// [`ValueSelector`] which creates one alternative for every value in the domain, in increasing
/// order.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllValues;

impl<Var: IntegerVariable> ValueSelector<Var> for AllValues {
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        ValueChoice::Values(domains.iterate_domain(variable).collect())
    }
}
