use crate::basic_types::PropagationStatus;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVar;
use crate::propagation::DomainEvents;
use crate::propagation::ExecStatus;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationCost;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// The [`PropagatorConstructor`] for the [`SetCardinalityPropagator`].
#[derive(Clone, Debug)]
pub struct SetCardinalityPropagatorArgs<Var> {
    pub set: SetVar,
    pub cardinality: Var,
}

impl<Var: IntegerVariable> PropagatorConstructor for SetCardinalityPropagatorArgs<Var> {
    type PropagatorImpl = SetCardinalityPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.set, DomainEvents::DOMAIN);
        context.register(self.cardinality.clone(), DomainEvents::BOUNDS);

        SetCardinalityPropagator {
            set: self.set,
            cardinality: self.cardinality,
        }
    }
}

/// Propagator linking the cardinality of a set variable to an integer variable.
#[derive(Clone, Debug)]
pub struct SetCardinalityPropagator<Var> {
    set: SetVar,
    cardinality: Var,
}

impl<Var: IntegerVariable> Propagator for SetCardinalityPropagator<Var> {
    fn name(&self) -> &str {
        "SetCardinality"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::Binary
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        loop {
            let lower_bound = context.lower_bound(&self.cardinality).max(0) as u32;
            let upper_bound = context.upper_bound(&self.cardinality).max(0) as u32;
            let set_changed = context
                .set_cardinality(self.set, lower_bound, upper_bound)?
                .is_modified();

            let domain = context.set_domain(self.set);
            let (minimum, maximum) = (domain.cardinality_min(), domain.cardinality_max());
            let _ = context.set_lower_bound(&self.cardinality, minimum as i32)?;
            let _ = context.set_upper_bound(&self.cardinality, maximum as i32)?;

            if !set_changed {
                break;
            }
        }

        if context.set_domain(self.set).is_assigned() {
            Ok(ExecStatus::Subsumed)
        } else {
            Ok(ExecStatus::Fix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;
    use crate::SpaceStatus;

    #[test]
    fn cardinality_bounds_flow_both_ways() {
        let mut space = Space::default();
        let set = space.new_set([1], [1, 2, 3, 4], 0, 4).expect("consistent set");
        let cardinality = space.new_integer(0, 3).expect("non-empty domain");
        let _ = space
            .post(SetCardinalityPropagatorArgs { set, cardinality })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert_eq!(space.lower_bound(&cardinality), 1);
        assert_eq!(space.set_domain(set).cardinality_max(), 3);
    }

    #[test]
    fn cardinality_equal_to_the_lower_bound_assigns_the_set() {
        let mut space = Space::default();
        let set = space.new_set([1, 2], [1, 2, 3], 0, 3).expect("consistent set");
        let cardinality = space.new_integer(0, 2).expect("non-empty domain");
        let _ = space
            .post(SetCardinalityPropagatorArgs { set, cardinality })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert!(space.set_domain(set).is_assigned());
        assert!(!space.set_domain(set).may_contain(3));
        assert_eq!(space.value_of(cardinality), Some(2));
    }
}
