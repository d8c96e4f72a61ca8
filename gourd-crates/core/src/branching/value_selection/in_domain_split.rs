use super::ValueChoice;
use super::ValueSelector;
use crate::engine::variables::IntegerVariable;
use crate::math::num_ext::NumExt;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

fn middle<Var: IntegerVariable>(domains: Domains, variable: &Var) -> i32 {
    let sum = domains.lower_bound(variable) as i64 + domains.upper_bound(variable) as i64;
    <i64 as NumExt>::div_floor(sum, 2) as i32
}

/// [`ValueSelector`] which splits the domain in half and tries the lower half first.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainSplit {
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        ValueChoice::LessOrEqual(middle(domains, variable))
    }
}

/// [`ValueSelector`] which splits the domain in half and tries the upper half first.
#[derive(Clone, Copy, Debug, Default)]
pub struct InDomainReverseSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainReverseSplit {
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        ValueChoice::GreaterOrEqual(middle(domains, variable) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;

    #[test]
    fn split_rounds_towards_negative_infinity() {
        let mut space = Space::default();
        let x = space.new_integer(-3, 0).expect("non-empty domain");

        assert_eq!(
            InDomainSplit.select_value(space.domains(), &x),
            ValueChoice::LessOrEqual(-2)
        );
        assert_eq!(
            InDomainReverseSplit.select_value(space.domains(), &x),
            ValueChoice::GreaterOrEqual(-1)
        );
    }
}
