use super::saturate;
use crate::basic_types::Inconsistency;
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

/// The [`PropagatorConstructor`] for the [`LinearEqualPropagator`].
#[derive(Clone, Debug)]
pub struct LinearEqualPropagatorArgs<Var> {
    pub terms: Box<[Var]>,
    pub rhs: i32,
}

impl<Var: IntegerVariable> PropagatorConstructor for LinearEqualPropagatorArgs<Var> {
    type PropagatorImpl = LinearEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearEqualPropagatorArgs { terms, rhs } = self;

        for term in terms.iter() {
            context.register(term.clone(), DomainEvents::BOUNDS);
        }

        LinearEqualPropagator { terms, rhs }
    }
}

/// Bounds consistent propagator for the constraint `sum terms = rhs`.
#[derive(Clone, Debug)]
pub struct LinearEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> LinearEqualPropagator<Var> {
    /// Tighten every bound once; returns whether any bound changed.
    fn tighten(&self, context: &mut PropagationContext) -> PropagationStatus<bool> {
        let (lower_bound_sum, upper_bound_sum) =
            self.terms.iter().fold((0_i64, 0_i64), |(lower, upper), term| {
                (
                    lower + i64::from(context.lower_bound(term)),
                    upper + i64::from(context.upper_bound(term)),
                )
            });
        let rhs = i64::from(self.rhs);
        if lower_bound_sum > rhs || upper_bound_sum < rhs {
            return Err(Inconsistency::Conflict);
        }

        let mut changed = false;
        for term in self.terms.iter() {
            let lower_bound = i64::from(context.lower_bound(term));
            let upper_bound = i64::from(context.upper_bound(term));

            let new_upper_bound = saturate(rhs - (lower_bound_sum - lower_bound));
            let new_lower_bound = saturate(rhs - (upper_bound_sum - upper_bound));

            changed |= context.set_upper_bound(term, new_upper_bound)?.is_modified();
            changed |= context.set_lower_bound(term, new_lower_bound)?.is_modified();
        }
        Ok(changed)
    }
}

impl<Var: IntegerVariable> Propagator for LinearEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearEq"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::linear(self.terms.len())
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        while self.tighten(&mut context)? {}

        if self.terms.iter().all(|term| context.is_fixed(term)) {
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
    fn bounds_are_propagated_to_a_fixpoint() {
        let mut space = Space::default();
        let x = space.new_integer(0, 10).expect("non-empty domain");
        let y = space.new_integer(4, 6).expect("non-empty domain");
        let z = space.new_integer(0, 1).expect("non-empty domain");
        let _ = space
            .post(LinearEqualPropagatorArgs {
                terms: vec![x, y, z].into(),
                rhs: 5,
            })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert_eq!(space.upper_bound(&x), 1);
        assert_eq!(space.upper_bound(&y), 5);
    }

    #[test]
    fn assigned_terms_subsume_the_propagator() {
        let mut space = Space::default();
        let x = space.new_integer(2, 2).expect("non-empty domain");
        let y = space.new_integer(0, 9).expect("non-empty domain");
        let propagator = space
            .post(LinearEqualPropagatorArgs {
                terms: vec![x, y].into(),
                rhs: 7,
            })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert_eq!(space.value_of(y), Some(5));
        assert!(space.propagator(propagator).is_none());
    }
}
