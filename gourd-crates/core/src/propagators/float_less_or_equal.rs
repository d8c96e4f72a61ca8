use crate::basic_types::PropagationStatus;
use crate::engine::variables::FloatVar;
use crate::propagation::DomainEvents;
use crate::propagation::ExecStatus;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationCost;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// The [`PropagatorConstructor`] for the [`FloatLessOrEqualPropagator`].
#[derive(Clone, Copy, Debug)]
pub struct FloatLessOrEqualPropagatorArgs {
    pub a: FloatVar,
    pub b: FloatVar,
}

impl PropagatorConstructor for FloatLessOrEqualPropagatorArgs {
    type PropagatorImpl = FloatLessOrEqualPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_float(self.a, DomainEvents::BOUNDS);
        context.register_float(self.b, DomainEvents::BOUNDS);

        FloatLessOrEqualPropagator {
            a: self.a,
            b: self.b,
        }
    }
}

/// Bounds propagator for the constraint `a <= b` over float variables.
#[derive(Clone, Copy, Debug)]
pub struct FloatLessOrEqualPropagator {
    a: FloatVar,
    b: FloatVar,
}

impl Propagator for FloatLessOrEqualPropagator {
    fn name(&self) -> &str {
        "FloatLessOrEqual"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::Binary
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        let upper_bound_b = context.float_domain(self.b).upper_bound();
        let _ = context.set_float_upper_bound(self.a, upper_bound_b)?;

        let lower_bound_a = context.float_domain(self.a).lower_bound();
        let _ = context.set_float_lower_bound(self.b, lower_bound_a)?;

        if context.float_domain(self.a).upper_bound() <= context.float_domain(self.b).lower_bound()
        {
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
    fn intervals_are_cut_at_the_other_bound() {
        let mut space = Space::default();
        let a = space.new_float(0.5, 4.0).expect("non-empty interval");
        let b = space.new_float(-1.0, 2.5).expect("non-empty interval");
        let _ = space
            .post(FloatLessOrEqualPropagatorArgs { a, b })
            .expect("feasible");

        assert_eq!(space.status(), SpaceStatus::Solved);
        assert_eq!(space.float_domain(a).upper_bound(), 2.5);
        assert_eq!(space.float_domain(b).lower_bound(), 0.5);
    }
}
