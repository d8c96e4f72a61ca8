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

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Debug)]
pub struct BinaryNotEqualsPropagatorArgs<AVar, BVar> {
    pub a: AVar,
    pub b: BVar,
    pub offset: i32,
}

impl<AVar, BVar> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryNotEqualsPropagatorArgs { a, b, offset } = self;

        // Nothing can be inferred until one of the two is assigned
        context.register(a.clone(), DomainEvents::VALUE);
        context.register(b.clone(), DomainEvents::VALUE);

        BinaryNotEqualsPropagator { a, b, offset }
    }
}

/// Propagator for the constraint `a != b + offset`.
#[derive(Clone, Debug)]
pub struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
    offset: i32,
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "BinaryNotEquals"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::Binary
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        if let Some(a) = context.fixed_value(&self.a) {
            let _ = context.remove(&self.b, a - self.offset)?;
            return Ok(ExecStatus::Subsumed);
        }

        if let Some(b) = context.fixed_value(&self.b) {
            let _ = context.remove(&self.a, b + self.offset)?;
            return Ok(ExecStatus::Subsumed);
        }

        Ok(ExecStatus::Fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Space;
    use crate::SpaceStatus;

    #[test]
    fn assigned_value_is_removed_with_offset() {
        let mut space = Space::default();
        let a = space.new_integer(0, 5).expect("non-empty domain");
        let b = space.new_integer(0, 5).expect("non-empty domain");
        let propagator = space
            .post(BinaryNotEqualsPropagatorArgs { a, b, offset: 2 })
            .expect("feasible");

        let _ = space.int_eq(&a, 4);
        assert_eq!(space.status(), SpaceStatus::Solved);

        assert!(!space.contains(&b, 2));
        assert_eq!(space.size(&b), 5);
        assert!(space.propagator(propagator).is_none());
    }

    #[test]
    fn equal_assignment_fails() {
        let mut space = Space::default();
        let a = space.new_integer(1, 1).expect("non-empty domain");
        let b = space.new_integer(1, 1).expect("non-empty domain");
        let _ = space
            .post(BinaryNotEqualsPropagatorArgs { a, b, offset: 0 })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Failed);
    }
}
