use super::ValueChoice;
use super::ValueSelector;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// [`ValueSelector`] which first tries to assign the median of the domain; for domains with an
/// even number of values the lower of the two middle values is taken.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainMedian;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMedian {
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        ValueChoice::Equal(domains.median(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;

    #[test]
    fn median_skips_holes() {
        let mut space = Space::default();
        let x = space
            .new_integer_from_values([1, 2, 7, 9, 10])
            .expect("non-empty domain");

        assert_eq!(
            InDomainMedian.select_value(space.domains(), &x),
            ValueChoice::Equal(7)
        );
    }
}
