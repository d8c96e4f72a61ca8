use crate::search::explorer::Explorer;
use crate::search::explorer::Step;
use crate::search::path::Bound;
use crate::search::tracer::Tracing;
use crate::search::NoGoods;
use crate::search::SearchEngine;
use crate::search::SearchOptions;
use crate::search::SearchStatistics;
use crate::termination::TerminationCondition;
use crate::Space;

/// Branch and bound: every reported solution is strictly better than the previous one.
///
/// The nodes on the path are constrained lazily. `mark` is the depth up to which the copies
/// stored on the path have not yet seen the current best solution; a node rebuilt from such a copy
/// is constrained first.
#[derive(Debug)]
pub(crate) struct Bab {
    explorer: Explorer,
    best: Option<Space>,
    mark: usize,
    stop: Option<Box<dyn TerminationCondition>>,
    stopped: bool,
}

impl Bab {
    pub(crate) fn new(space: Space, options: SearchOptions) -> Bab {
        let mut explorer = Explorer::new(options.exploration(), Tracing::new(options.tracer, 0));
        explorer.start(space);

        Bab {
            explorer,
            best: None,
            mark: 0,
            stop: options.stop,
            stopped: false,
        }
    }
}

impl SearchEngine for Bab {
    fn next(&mut self) -> Option<Space> {
        self.stopped = false;

        loop {
            if self.explorer.should_stop(&mut self.stop) {
                self.stopped = true;
                return None;
            }

            let bound = self.best.as_ref().map(|best| Bound {
                best,
                mark: &mut self.mark,
            });
            let space = self.explorer.next_node(bound)?;

            if let Step::Solved(solution) = self.explorer.explore(space) {
                self.explorer.statistics.solutions += 1;
                self.mark = self.explorer.path.entries();
                self.best = Some(solution.clone());
                return Some(solution);
            }
        }
    }

    fn statistics(&self) -> SearchStatistics {
        self.explorer.statistics()
    }

    fn stopped(&self) -> bool {
        self.stopped
    }

    fn reset(&mut self, space: Space) {
        self.stopped = false;
        self.best = None;
        self.mark = 0;
        self.explorer.start(space);
    }

    fn nogoods(&mut self) -> NoGoods {
        let nogoods = self.explorer.path.nogoods();
        self.explorer.statistics.nogoods += nogoods.len() as u64;
        nogoods
    }
}

impl Drop for Bab {
    fn drop(&mut self) {
        self.explorer.tracing.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IntBrancher;
    use crate::branching::value_selection::InDomainMax;
    use crate::branching::variable_selection::InputOrder;
    use crate::constraints;

    /// Minimise `x + y` subject to `x != y`, `x + y >= 5`, searching large values first.
    fn optimisation_space() -> Space {
        let mut space = Space::default();
        let x = space.new_integer(0, 5).expect("non-empty domain");
        let y = space.new_integer(0, 5).expect("non-empty domain");
        let sum = space.new_integer(0, 10).expect("non-empty domain");

        let _ = constraints::not_equals(&mut space, x, y).expect("not failed");
        let _ = constraints::weighted_equal(&mut space, &[1, 1, -1], &[x, y, sum], 0)
            .expect("not failed");
        let _ = constraints::weighted_less_or_equal(&mut space, &[-1], &[sum], -5)
            .expect("not failed");

        space.minimise(sum);
        let _ = space.branch(IntBrancher::new(&[x, y], InputOrder, InDomainMax));
        space
    }

    #[test]
    fn solutions_strictly_improve() {
        let mut bab = Bab::new(optimisation_space(), SearchOptions::default());

        let mut values = vec![];
        while let Some(solution) = bab.next() {
            values.push(solution.objective_value().expect("objective is assigned"));
        }

        assert!(values.windows(2).all(|pair| pair[1] < pair[0]));
        assert_eq!(values.last(), Some(&5));
    }

    #[test]
    fn reset_forgets_the_best_solution() {
        let mut bab = Bab::new(optimisation_space(), SearchOptions::default());
        while bab.next().is_some() {}

        bab.reset(optimisation_space());
        let first = bab.next().expect("a solution exists");

        assert!(first.objective_value().expect("objective is assigned") > 5);
    }
}
