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

/// The [`PropagatorConstructor`] for the [`LinearLessOrEqualPropagator`].
///
/// Weighted sums are expressed with [`AffineView`](crate::variables::AffineView)s over the
/// variables.
#[derive(Clone, Debug)]
pub struct LinearLessOrEqualPropagatorArgs<Var> {
    pub terms: Box<[Var]>,
    pub rhs: i32,
}

impl<Var: IntegerVariable> PropagatorConstructor for LinearLessOrEqualPropagatorArgs<Var> {
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearLessOrEqualPropagatorArgs { terms, rhs } = self;

        for term in terms.iter() {
            context.register(term.clone(), DomainEvents::BOUNDS);
        }

        LinearLessOrEqualPropagator { terms, rhs }
    }
}

/// Bounds consistent propagator for the constraint `sum terms <= rhs`.
#[derive(Clone, Debug)]
pub struct LinearLessOrEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> Propagator for LinearLessOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::linear(self.terms.len())
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        let lower_bound_sum = self
            .terms
            .iter()
            .map(|term| i64::from(context.lower_bound(term)))
            .sum::<i64>();
        let slack = i64::from(self.rhs) - lower_bound_sum;
        if slack < 0 {
            return Err(Inconsistency::Conflict);
        }

        // Raising an upper bound never changes a lower bound, so one pass reaches the fixpoint
        for term in self.terms.iter() {
            let bound = saturate(i64::from(context.lower_bound(term)) + slack);
            let _ = context.set_upper_bound(term, bound)?;
        }

        let upper_bound_sum = self
            .terms
            .iter()
            .map(|term| i64::from(context.upper_bound(term)))
            .sum::<i64>();
        if upper_bound_sum <= i64::from(self.rhs) {
            Ok(ExecStatus::Subsumed)
        } else {
            Ok(ExecStatus::Fix)
        }
    }
}
