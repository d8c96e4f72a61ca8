use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::status;
use super::NoGoods;
use super::SearchEngine;
use super::SearchStatistics;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::termination::TerminationCondition;
use crate::Space;
use crate::SpaceStatus;

/// The stop of the engine run between two restarts: it triggers on the user's stop or once the
/// fail limit of the current restart is reached.
#[derive(Debug)]
pub(crate) struct CutoffStop {
    user: Option<Box<dyn TerminationCondition>>,
    fail_limit: Arc<AtomicU64>,
    user_stopped: Arc<AtomicBool>,
}

impl CutoffStop {
    pub(crate) fn new(
        user: Option<Box<dyn TerminationCondition>>,
        fail_limit: &Arc<AtomicU64>,
        user_stopped: &Arc<AtomicBool>,
    ) -> CutoffStop {
        CutoffStop {
            user,
            fail_limit: Arc::clone(fail_limit),
            user_stopped: Arc::clone(user_stopped),
        }
    }
}

impl TerminationCondition for CutoffStop {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        if self.user.should_stop(statistics) {
            self.user_stopped.store(true, Ordering::Relaxed);
            return true;
        }

        statistics.fails >= self.fail_limit.load(Ordering::Relaxed)
    }
}

/// Restart-based search.
///
/// The engine explores a copy of the master space until it has failed as often as the next value
/// of the cutoff sequence allows, then restarts from a fresh copy. Before every restart the
/// no-goods of the interrupted run are posted into the master, so no subtree is explored twice.
/// When optimising, every solution also causes a restart and constrains the master, so later
/// restarts only find better solutions. Otherwise the run in which the first solution is found
/// is continued without a fail limit, so no solution is reported twice.
#[derive(Debug)]
pub(crate) struct Rbs {
    engine: Box<dyn SearchEngine>,
    master: Space,
    cutoff: Box<dyn SequenceGenerator>,
    fail_limit: Arc<AtomicU64>,
    user_stopped: Arc<AtomicBool>,
    optimising: bool,
    restart: bool,
    /// The engine explores a copy of the master, so its no-goods hold in the master.
    explores_master: bool,
    /// The statistics of the work done on the master.
    statistics: SearchStatistics,
    stopped: bool,
}

impl Rbs {
    /// `engine` explores a copy of `master` and is stopped by a [`CutoffStop`] built from
    /// `fail_limit` and `user_stopped`.
    pub(crate) fn new(
        engine: Box<dyn SearchEngine>,
        master: Space,
        mut cutoff: Box<dyn SequenceGenerator>,
        fail_limit: Arc<AtomicU64>,
        user_stopped: Arc<AtomicBool>,
    ) -> Rbs {
        fail_limit.store(next_cutoff(cutoff.as_mut()), Ordering::Relaxed);

        Rbs {
            engine,
            optimising: master.has_objective(),
            master,
            cutoff,
            fail_limit,
            user_stopped,
            restart: false,
            explores_master: true,
            statistics: SearchStatistics::default(),
            stopped: false,
        }
    }
}

fn next_cutoff(cutoff: &mut dyn SequenceGenerator) -> u64 {
    cutoff.next().max(1) as u64
}

impl SearchEngine for Rbs {
    fn next(&mut self) -> Option<Space> {
        self.stopped = false;

        loop {
            if self.restart {
                self.restart = false;
                self.statistics.restarts += 1;

                let limit = self.engine.statistics().fails + next_cutoff(self.cutoff.as_mut());
                self.fail_limit.store(limit, Ordering::Relaxed);

                if self.explores_master {
                    let nogoods = self.engine.nogoods();
                    if nogoods.post(&mut self.master).is_err() {
                        return None;
                    }
                }

                if status(&mut self.master, &mut self.statistics) == SpaceStatus::Failed {
                    return None;
                }

                log::debug!(
                    "restart {} with fail limit {limit}",
                    self.statistics.restarts
                );
                self.engine.reset(self.master.clone());
                self.explores_master = true;
            }

            if let Some(solution) = self.engine.next() {
                if self.optimising {
                    self.master.constrain(&solution);
                    self.restart = true;
                } else {
                    self.fail_limit.store(u64::MAX, Ordering::Relaxed);
                }

                return Some(solution);
            }

            if self.user_stopped.swap(false, Ordering::Relaxed) {
                self.stopped = true;
                return None;
            }

            if !self.engine.stopped() {
                return None;
            }

            self.restart = true;
        }
    }

    fn statistics(&self) -> SearchStatistics {
        let mut statistics = self.engine.statistics();
        statistics.restarts += self.statistics.restarts;
        statistics.propagations += self.statistics.propagations;
        statistics
    }

    fn stopped(&self) -> bool {
        self.stopped
    }

    fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    fn reset(&mut self, space: Space) {
        self.optimising = space.has_objective();
        self.master = space;
        self.restart = true;
        self.explores_master = false;
        self.stopped = false;
    }

    fn nogoods(&mut self) -> NoGoods {
        self.engine.nogoods()
    }
}
