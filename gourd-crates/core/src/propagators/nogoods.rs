use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::branching::AlternativeLiteral;
use crate::propagation::ExecStatus;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationCost;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;

/// One depth of a path of no-goods.
#[derive(Clone, Debug)]
pub struct NoGoodLevel {
    /// The alternatives whose subtrees were explored completely.
    pub explored: Vec<Box<dyn AlternativeLiteral>>,
    /// The alternative leading to the next level; `None` on the last level.
    pub taken: Option<Box<dyn AlternativeLiteral>>,
}

/// The [`PropagatorConstructor`] for the [`NoGoodsPropagator`].
#[derive(Clone, Debug)]
pub struct NoGoodsPropagatorArgs {
    pub levels: Vec<NoGoodLevel>,
}

impl PropagatorConstructor for NoGoodsPropagatorArgs {
    type PropagatorImpl = NoGoodsPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for literal in self.levels.iter().filter_map(|level| level.taken.as_ref()) {
            literal.subscribe(&mut context);
        }

        NoGoodsPropagator {
            levels: self.levels,
            start: 0,
        }
    }
}

/// Propagator for the no-goods of a search path.
///
/// For every level `d`, once the taken literals of all levels above `d` hold, none of the
/// explored literals of level `d` may hold.
#[derive(Clone, Debug)]
pub struct NoGoodsPropagator {
    levels: Vec<NoGoodLevel>,
    /// The taken literals of the levels above this one are known to hold.
    start: usize,
}

impl Propagator for NoGoodsPropagator {
    fn name(&self) -> &str {
        "NoGoods"
    }

    fn cost(&self) -> PropagationCost {
        PropagationCost::linear(self.levels.len())
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatus<ExecStatus> {
        while let Some(level) = self.levels.get(self.start) {
            for literal in &level.explored {
                match literal.truth_value(context.domains()) {
                    Some(true) => return Err(Inconsistency::Conflict),
                    Some(false) => {}
                    None => literal.exclude(&mut context)?,
                }
            }

            let Some(taken) = &level.taken else {
                return Ok(ExecStatus::Subsumed);
            };
            match taken.truth_value(context.domains()) {
                Some(true) => self.start += 1,
                Some(false) => return Ok(ExecStatus::Subsumed),
                None => return Ok(ExecStatus::Fix),
            }
        }

        Ok(ExecStatus::Subsumed)
    }
}
