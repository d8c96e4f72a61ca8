use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::variables::BoolVar;
use crate::propagation::DomainEvents;
use crate::propagation::ExecStatus;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationCost;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// The [`PropagatorConstructor`] for the [`ClausePropagator`].
///
/// Negative literals are expressed with [`BoolVar::negated`].
#[derive(Clone, Debug)]
pub struct ClausePropagatorArgs {
    pub literals: Box<[BoolVar]>,
}

impl PropagatorConstructor for ClausePropagatorArgs {
    type PropagatorImpl = ClausePropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for literal in self.literals.iter() {
            context.register(*literal, DomainEvents::VALUE);
        }

        ClausePropagator {
            literals: self.literals,
        }
    }
}

/// Propagator for the disjunction of its literals.
#[derive(Clone, Debug)]
pub struct ClausePropagator {
    literals: Box<[BoolVar]>,
}

impl Propagator for ClausePropagator {
    fn name(&self) -> &str {
        "Clause"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::linear(self.literals.len())
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        if self
            .literals
            .iter()
            .any(|literal| context.fixed_value(literal) == Some(1))
        {
            return Ok(ExecStatus::Subsumed);
        }

        let mut open = self
            .literals
            .iter()
            .filter(|literal| !context.is_fixed(*literal));
        match (open.next().copied(), open.next()) {
            (None, _) => Err(Inconsistency::Conflict),
            (Some(unit), None) => {
                let _ = context.assign(&unit, 1)?;
                Ok(ExecStatus::Subsumed)
            }
            _ => Ok(ExecStatus::Fix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::IntegerVariable;
    use crate::Space;
    use crate::SpaceStatus;

    #[test]
    fn last_open_literal_is_set_to_true() {
        let mut space = Space::default();
        let a = space.new_bool();
        let b = space.new_bool();
        let _ = space
            .post(ClausePropagatorArgs {
                literals: vec![a, b.negated()].into(),
            })
            .expect("feasible");

        let _ = space.int_eq(&a, 0);
        assert_eq!(space.status(), SpaceStatus::Solved);

        assert_eq!(space.value_of(b.domain_id()), Some(0));
    }

    #[test]
    fn all_literals_false_fails() {
        let mut space = Space::default();
        let a = space.new_bool();
        let _ = space
            .post(ClausePropagatorArgs {
                literals: vec![a.negated()].into(),
            })
            .expect("feasible");
        let _ = space.int_eq(&a, 1);

        assert_eq!(space.status(), SpaceStatus::Failed);
    }
}
