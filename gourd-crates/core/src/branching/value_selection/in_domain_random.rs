use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::ValueChoice;
use super::ValueSelector;
use crate::basic_types::Random;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// [`ValueSelector`] which first tries to assign a value of the domain chosen uniformly at
/// random.
#[derive(Clone, Debug)]
pub struct InDomainRandom<R = SmallRng> {
    rng: R,
}

impl InDomainRandom {
    pub fn new(seed: u64) -> Self {
        InDomainRandom {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R> InDomainRandom<R> {
    pub fn with_random(rng: R) -> Self {
        InDomainRandom { rng }
    }
}

impl<Var, R> ValueSelector<Var> for InDomainRandom<R>
where
    Var: IntegerVariable,
    R: Random + Clone + Send + 'static,
{
    fn select_value(&mut self, domains: Domains, variable: &Var) -> ValueChoice {
        let size = domains.size(variable) as usize;
        let index = self.rng.generate_usize_in_range(0..size);
        let value = domains
            .iterate_domain(variable)
            .nth(index)
            .unwrap_or_else(|| domains.lower_bound(variable));
        ValueChoice::Equal(value)
    }
}
