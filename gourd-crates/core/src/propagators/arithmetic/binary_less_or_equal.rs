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

/// The [`PropagatorConstructor`] for the [`BinaryLessOrEqualPropagator`].
#[derive(Clone, Debug)]
pub struct BinaryLessOrEqualPropagatorArgs<AVar, BVar> {
    pub a: AVar,
    pub b: BVar,
    pub offset: i32,
}

impl<AVar, BVar> PropagatorConstructor for BinaryLessOrEqualPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    type PropagatorImpl = BinaryLessOrEqualPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryLessOrEqualPropagatorArgs { a, b, offset } = self;

        context.register(a.clone(), DomainEvents::BOUNDS);
        context.register(b.clone(), DomainEvents::BOUNDS);

        BinaryLessOrEqualPropagator { a, b, offset }
    }
}

/// Bounds propagator for the constraint `a + offset <= b`.
#[derive(Clone, Debug)]
pub struct BinaryLessOrEqualPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
    offset: i32,
}

impl<AVar, BVar> Propagator for BinaryLessOrEqualPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "BinaryLessOrEqual"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::Binary
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        let upper_bound_b = context.upper_bound(&self.b);
        let _ = context.set_upper_bound(&self.a, upper_bound_b - self.offset)?;

        let lower_bound_a = context.lower_bound(&self.a);
        let _ = context.set_lower_bound(&self.b, lower_bound_a + self.offset)?;

        if context.upper_bound(&self.a) + self.offset <= context.lower_bound(&self.b) {
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
    fn bounds_are_tightened_in_both_directions() {
        let mut space = Space::default();
        let a = space.new_integer(2, 10).expect("non-empty domain");
        let b = space.new_integer(0, 7).expect("non-empty domain");
        let _ = space
            .post(BinaryLessOrEqualPropagatorArgs { a, b, offset: 3 })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert_eq!(space.upper_bound(&a), 4);
        assert_eq!(space.lower_bound(&b), 5);
    }
}
