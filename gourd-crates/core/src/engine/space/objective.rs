use std::fmt::Debug;

use super::Space;
use crate::engine::variables::IntegerVariable;
use crate::propagation::ReadDomains;

/// Injects the bound of a best solution into another space, used by branch-and-bound.
///
/// [`Objective::constrain`] must only ever make spaces strictly better than `best` feasible.
pub trait Objective: Debug + Send + Sync {
    /// Constrain `space` to be better than `best`.
    fn constrain(&self, space: &mut Space, best: &Space);

    /// The objective value of a space in which the objective is assigned.
    fn value(&self, space: &Space) -> Option<i64>;
}

/// Minimise the value of an integer variable.
#[derive(Clone, Copy, Debug)]
pub struct Minimise<Var>(pub Var);

impl<Var: IntegerVariable> Objective for Minimise<Var> {
    fn constrain(&self, space: &mut Space, best: &Space) {
        let bound = best.upper_bound(&self.0);
        let _ = space.int_lq(&self.0, bound - 1);
    }

    fn value(&self, space: &Space) -> Option<i64> {
        space.fixed_value(&self.0).map(i64::from)
    }
}

/// Maximise the value of an integer variable.
#[derive(Clone, Copy, Debug)]
pub struct Maximise<Var>(pub Var);

impl<Var: IntegerVariable> Objective for Maximise<Var> {
    fn constrain(&self, space: &mut Space, best: &Space) {
        let bound = best.lower_bound(&self.0);
        let _ = space.int_gq(&self.0, bound + 1);
    }

    fn value(&self, space: &Space) -> Option<i64> {
        space.fixed_value(&self.0).map(i64::from)
    }
}
