use super::arithmetic::BinaryNotEqualsPropagatorArgs;
use crate::basic_types::PropagationStatus;
use crate::engine::variables::IntegerVariable;
use crate::propagation::DomainEvents;
use crate::propagation::ExecStatus;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationCost;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// The [`PropagatorConstructor`] for the [`AllDifferentPropagator`].
#[derive(Clone, Debug)]
pub struct AllDifferentPropagatorArgs<Var> {
    pub variables: Box<[Var]>,
}

impl<Var: IntegerVariable> PropagatorConstructor for AllDifferentPropagatorArgs<Var> {
    type PropagatorImpl = AllDifferentPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for variable in self.variables.iter() {
            context.register(variable.clone(), DomainEvents::VALUE);
        }

        AllDifferentPropagator {
            processed: vec![false; self.variables.len()],
            variables: self.variables,
        }
    }
}

/// Value consistent propagator for the constraint that all variables take pairwise distinct
/// values.
///
/// The value of every assigned variable is removed from the other variables. Once only two
/// variables are unassigned, the propagator replaces itself with a binary not-equals
/// propagator.
#[derive(Clone, Debug)]
pub struct AllDifferentPropagator<Var> {
    variables: Box<[Var]>,
    /// Whether the value of the variable at the same position was already removed from the
    /// other variables.
    processed: Vec<bool>,
}

impl<Var: IntegerVariable> Propagator for AllDifferentPropagator<Var> {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::linear(self.variables.len())
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        loop {
            let Some((position, value)) = (0..self.variables.len())
                .filter(|&position| !self.processed[position])
                .find_map(|position| {
                    context
                        .fixed_value(&self.variables[position])
                        .map(|value| (position, value))
                })
            else {
                break;
            };

            self.processed[position] = true;
            for (other, variable) in self.variables.iter().enumerate() {
                if other != position {
                    let _ = context.remove(variable, value)?;
                }
            }
        }

        let mut unassigned = self
            .variables
            .iter()
            .filter(|variable| !context.is_fixed(*variable));
        match (unassigned.next(), unassigned.next(), unassigned.next()) {
            (None, _, _) => Ok(ExecStatus::Subsumed),
            (Some(a), Some(b), None) => Ok(ExecStatus::rewrite(BinaryNotEqualsPropagatorArgs {
                a: a.clone(),
                b: b.clone(),
                offset: 0,
            })),
            _ => Ok(ExecStatus::Fix),
        }
    }
}
