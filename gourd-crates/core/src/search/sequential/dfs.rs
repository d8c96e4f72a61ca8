use crate::search::explorer::Explorer;
use crate::search::explorer::Step;
use crate::search::tracer::Tracing;
use crate::search::NoGoods;
use crate::search::SearchEngine;
use crate::search::SearchOptions;
use crate::search::SearchStatistics;
use crate::termination::TerminationCondition;
use crate::Space;

/// Depth-first search, reporting every solution once.
#[derive(Debug)]
pub(crate) struct Dfs {
    explorer: Explorer,
    stop: Option<Box<dyn TerminationCondition>>,
    stopped: bool,
}

impl Dfs {
    pub(crate) fn new(space: Space, options: SearchOptions) -> Dfs {
        let mut explorer = Explorer::new(options.exploration(), Tracing::new(options.tracer, 0));
        explorer.start(space);

        Dfs {
            explorer,
            stop: options.stop,
            stopped: false,
        }
    }
}

impl SearchEngine for Dfs {
    fn next(&mut self) -> Option<Space> {
        self.stopped = false;

        loop {
            if self.explorer.should_stop(&mut self.stop) {
                self.stopped = true;
                return None;
            }

            let space = self.explorer.next_node(None)?;

            if let Step::Solved(solution) = self.explorer.explore(space) {
                self.explorer.statistics.solutions += 1;
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
        self.explorer.start(space);
    }

    fn nogoods(&mut self) -> NoGoods {
        let nogoods = self.explorer.path.nogoods();
        self.explorer.statistics.nogoods += nogoods.len() as u64;
        nogoods
    }
}

impl Drop for Dfs {
    fn drop(&mut self) {
        self.explorer.tracing.done();
    }
}
