use super::ValueChoice;
use super::ValueSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// [`ValueSelector`] which first tries to assign the lower bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMin {
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        ValueChoice::Equal(domains.lower_bound(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;

    #[test]
    fn selects_the_lower_bound() {
        let mut space = Space::default();
        let x = space.new_integer(3, 8).expect("non-empty domain");

        assert_eq!(
            InDomainMin.select_value(space.domains(), &x),
            ValueChoice::Equal(3)
        );
    }
}
