use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossbeam_channel::RecvTimeoutError;
use crossbeam_channel::Sender;
use crossbeam_channel::TryRecvError;

use super::BestSolution;
use super::Command;
use super::Shared;
use crate::search::explorer::Explorer;
use crate::search::explorer::Step;
use crate::search::path::Bound;
use crate::search::SearchStatistics;
use crate::Space;
use crate::SpaceStatus;

/// How long a worker without work waits before it tries to steal again.
const IDLE_BACKOFF: Duration = Duration::from_millis(1);

/// The state of one worker, guarded by its own mutex so that other workers can steal from it.
#[derive(Debug)]
pub(super) struct Worker {
    pub(super) explorer: Explorer,
    /// The worker has no subtree to explore.
    pub(super) idle: bool,
    /// The best solution this worker knows about, when doing branch and bound.
    pub(super) best: Option<Space>,
    pub(super) mark: usize,
    /// The generation of the shared best solution which `best` is a copy of.
    pub(super) best_generation: u64,
}

impl Worker {
    pub(super) fn new(explorer: Explorer) -> Worker {
        Worker {
            explorer,
            idle: false,
            best: None,
            mark: 0,
            best_generation: 0,
        }
    }
}

/// The loop of a worker thread, driven by the commands of the engine.
pub(super) fn run(
    shared: Arc<Shared>,
    index: usize,
    commands: Receiver<Command>,
    acknowledgements: Sender<()>,
) {
    let mut command = Command::Wait;

    loop {
        match command {
            Command::Wait => match commands.recv() {
                Ok(next) => command = next,
                Err(_) => return,
            },

            Command::Work => {
                match commands.try_recv() {
                    Ok(next) => {
                        command = next;
                        continue;
                    }
                    Err(TryRecvError::Disconnected) => return,
                    Err(TryRecvError::Empty) => {}
                }

                if !shared.work(index) {
                    match commands.recv_timeout(IDLE_BACKOFF) {
                        Ok(next) => command = next,
                        Err(RecvTimeoutError::Disconnected) => return,
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                }
            }

            Command::Reset => {
                let _ = acknowledgements.send(());
                // The engine resets the workers while they are parked here.
                match commands.recv() {
                    Ok(next) => command = next,
                    Err(_) => return,
                }
                let _ = acknowledgements.send(());
            }

            Command::Terminate => {
                let _ = acknowledgements.send(());
                return;
            }
        }
    }
}

impl Shared {
    /// Do one unit of work for worker `index`: explore a node, recompute the next one, or look
    /// for work at the other workers.
    ///
    /// Returns `false` if there was nothing to do.
    pub(super) fn work(&self, index: usize) -> bool {
        let Ok(mut guard) = self.workers[index].lock() else {
            self.report_stop();
            return false;
        };
        let worker = &mut *guard;

        if worker.idle {
            drop(guard);
            return self.find(index);
        }

        if let Some(best) = &self.best {
            if !update_best(worker, best) {
                drop(guard);
                self.report_stop();
                return false;
            }
        }

        if worker.explorer.current.is_some() {
            if self.should_stop(index, worker) {
                drop(guard);
                self.report_stop();
                return false;
            }

            let Some(space) = worker.explorer.current.take() else {
                return true;
            };

            if let Step::Solved(solution) = worker.explorer.explore(space) {
                drop(guard);
                self.solution(solution);
            }

            true
        } else if !worker.explorer.path.is_empty() {
            let bound = worker.best.as_ref().map(|best| Bound {
                best,
                mark: &mut worker.mark,
            });
            worker.explorer.current = worker.explorer.next_node(bound);
            true
        } else {
            worker.idle = true;
            worker.explorer.path.set_nogood_depth_limit(0);
            drop(guard);
            self.idle();
            true
        }
    }

    /// Try to steal a subtree from one of the other workers.
    fn find(&self, index: usize) -> bool {
        let workers = self.workers.len();

        for offset in 1..workers {
            let victim = (index + offset) % workers;

            let stolen = match self.workers[victim].lock() {
                Ok(mut victim) => {
                    if !victim.explorer.path.has_stealable_work(self.steal_limit) {
                        continue;
                    }

                    let stolen = victim.explorer.path.steal(self.steal_limit);
                    if stolen.is_some() {
                        // Counted while the victim is still busy.
                        self.busy();
                    }
                    stolen
                }
                Err(_) => {
                    self.report_stop();
                    return false;
                }
            };

            if let Some((mut space, edge)) = stolen {
                let Ok(mut worker) = self.workers[index].lock() else {
                    self.report_stop();
                    return false;
                };

                log::trace!("worker {index} stole from worker {victim}");

                if let Some(best) = &worker.best {
                    space.constrain(best);
                }

                worker.idle = false;
                worker.mark = 0;
                worker.explorer.adopt(space, edge);
                return true;
            }
        }

        false
    }

    fn should_stop(&self, index: usize, worker: &mut Worker) -> bool {
        let Some(stop) = &self.stop else {
            return false;
        };
        let Ok(mut stop) = stop.lock() else {
            return true;
        };

        stop.per_worker[index] = worker.explorer.statistics();

        let mut total = SearchStatistics::default();
        for statistics in &stop.per_worker {
            total.accumulate(statistics);
        }

        stop.condition.should_stop(&total)
    }

    /// Hand a solution to the engine. With branch and bound, it is dropped unless it improves on
    /// the best solution found by any worker.
    fn solution(&self, mut space: Space) {
        let Some(best) = &self.best else {
            self.report(space);
            return;
        };

        let Ok(mut stored) = best.space.lock() else {
            self.report_stop();
            return;
        };

        if let Some(previous) = stored.as_ref() {
            space.constrain(previous);
            if space.status() == SpaceStatus::Failed {
                return;
            }
        }

        *stored = Some(space.clone());
        let _ = best.generation.fetch_add(1, Ordering::AcqRel);

        // Reported while the best solution is locked, so the solutions arrive in order.
        self.report(space);
    }

    fn report(&self, space: Space) {
        if let Ok(mut search) = self.search.lock() {
            search.solutions.push_back(space);
            search.reported += 1;
            self.search_event.notify_all();
        }
    }

    fn busy(&self) {
        if let Ok(mut search) = self.search.lock() {
            search.busy += 1;
        }
    }

    fn idle(&self) {
        if let Ok(mut search) = self.search.lock() {
            search.busy -= 1;
            if search.busy == 0 {
                self.search_event.notify_all();
            }
        }
    }

    fn report_stop(&self) {
        if let Ok(mut search) = self.search.lock() {
            search.has_stopped = true;
            self.search_event.notify_all();
        }
    }
}

/// Pick up a better solution found by any worker. The node being explored is constrained right
/// away, the copies on the path when they are used next.
///
/// Returns `false` if the best solution cannot be read.
fn update_best(worker: &mut Worker, best: &BestSolution) -> bool {
    let generation = best.generation.load(Ordering::Acquire);
    if generation == worker.best_generation {
        return true;
    }

    let Ok(stored) = best.space.lock() else {
        return false;
    };
    worker.best = stored.clone();
    drop(stored);

    worker.best_generation = generation;
    worker.mark = worker.explorer.path.entries();

    if let (Some(current), Some(best)) = (worker.explorer.current.as_mut(), worker.best.as_ref()) {
        current.constrain(best);
    }

    true
}
