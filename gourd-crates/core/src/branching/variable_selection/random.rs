use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::VariableSelector;
use crate::basic_types::Random;
use crate::engine::variables::IntegerVariable;
use crate::propagation::Domains;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects an unassigned variable uniformly at random.
///
/// The generator is part of the brancher, and thus of the space; clones of a space make the same
/// selections.
#[derive(Clone, Debug)]
pub struct RandomSelector<R = SmallRng> {
    rng: R,
}

impl RandomSelector {
    pub fn new(seed: u64) -> Self {
        RandomSelector {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R> RandomSelector<R> {
    pub fn with_random(rng: R) -> Self {
        RandomSelector { rng }
    }
}

impl<Var, R> VariableSelector<Var> for RandomSelector<R>
where
    Var: IntegerVariable,
    R: Random + Clone + Send + 'static,
{
    fn select_variable(&mut self, domains: Domains, variables: &[Var], start: usize) -> usize {
        let unassigned = (start..variables.len())
            .filter(|&index| !domains.is_fixed(&variables[index]))
            .collect::<Vec<_>>();
        unassigned[self.rng.generate_usize_in_range(0..unassigned.len())]
    }
}
