//! Depth-first search and branch and bound with several worker threads.
//!
//! Every worker explores its own subtree with its own path. A worker without work steals an
//! unexplored alternative close to the root of another worker's path. The engine itself only
//! hands out commands to the workers and collects the solutions they report.
mod worker;

use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use worker::Worker;

use super::explorer::Explorer;
use super::tracer::SearchTracer;
use super::tracer::Tracing;
use super::NoGoods;
use super::SearchEngine;
use super::SearchOptions;
use super::SearchStatistics;
use crate::termination::TerminationCondition;
use crate::Space;

/// The commands the engine sends to its workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// Block until the next command.
    Wait,
    /// Explore.
    Work,
    /// Acknowledge, wait for the engine to reset the workers, and acknowledge again.
    Reset,
    /// Acknowledge and exit.
    Terminate,
}

/// The state shared between the engine and its workers.
///
/// Locks are taken in the order: a worker, then the stop or the best solution, then the search
/// state. The stop and the best solution are never held together, and no worker holds two
/// worker locks.
#[derive(Debug)]
pub(super) struct Shared {
    workers: Vec<Mutex<Worker>>,
    search: Mutex<SearchState>,
    /// Signalled on a new solution, when the last busy worker becomes idle, and on a stop.
    search_event: Condvar,
    /// Present for branch and bound.
    best: Option<BestSolution>,
    stop: Option<Mutex<SharedStop>>,
    steal_limit: usize,
}

#[derive(Debug, Default)]
struct SearchState {
    solutions: VecDeque<Space>,
    /// The number of reported solutions.
    reported: u64,
    /// The number of workers which have a subtree to explore.
    busy: usize,
    has_stopped: bool,
}

/// The best solution found by any worker. Workers compare the generation with the one of their
/// own copy.
#[derive(Debug, Default)]
pub(super) struct BestSolution {
    space: Mutex<Option<Space>>,
    generation: AtomicU64,
}

/// The stop is polled with the statistics of all workers combined.
#[derive(Debug)]
struct SharedStop {
    condition: Box<dyn TerminationCondition>,
    per_worker: Vec<SearchStatistics>,
}

/// A search engine running `threads` workers.
pub(crate) struct ParallelEngine {
    shared: Arc<Shared>,
    commands: Vec<Sender<Command>>,
    acknowledgements: Receiver<()>,
    threads: Vec<JoinHandle<()>>,
    tracer: Option<Arc<dyn SearchTracer>>,
    stopped: bool,
}

impl Debug for ParallelEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelEngine")
            .field("workers", &self.threads.len())
            .field("branch_and_bound", &self.shared.best.is_some())
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl ParallelEngine {
    /// Start the workers; the first one starts exploring `space`. With `branch_and_bound`, only
    /// solutions which improve on all earlier ones are reported.
    pub(crate) fn new(space: Space, options: SearchOptions, branch_and_bound: bool) -> ParallelEngine {
        let threads = options.threads;
        let exploration = options.exploration();

        let mut workers: Vec<Worker> = (0..threads)
            .map(|index| {
                let tracing = Tracing::new(options.tracer.as_ref().map(Arc::clone), index);
                Worker::new(Explorer::new(exploration, tracing))
            })
            .collect();
        workers[0].explorer.start(space);

        let shared = Arc::new(Shared {
            workers: workers.into_iter().map(Mutex::new).collect(),
            search: Mutex::new(SearchState {
                busy: threads,
                ..SearchState::default()
            }),
            search_event: Condvar::new(),
            best: branch_and_bound.then(BestSolution::default),
            stop: options.stop.map(|condition| {
                Mutex::new(SharedStop {
                    condition,
                    per_worker: vec![SearchStatistics::default(); threads],
                })
            }),
            steal_limit: exploration.steal_limit,
        });

        let (acknowledge, acknowledgements) = crossbeam_channel::unbounded();
        let mut commands = Vec::with_capacity(threads);
        let mut handles = Vec::with_capacity(threads);

        for index in 0..threads {
            let (sender, receiver) = crossbeam_channel::unbounded();
            let shared = Arc::clone(&shared);
            let acknowledge = acknowledge.clone();

            commands.push(sender);
            handles.push(std::thread::spawn(move || {
                worker::run(shared, index, receiver, acknowledge)
            }));
        }

        log::debug!("started {threads} search workers");

        ParallelEngine {
            shared,
            commands,
            acknowledgements,
            threads: handles,
            tracer: options.tracer,
            stopped: false,
        }
    }

    fn broadcast(&self, command: Command) {
        for sender in &self.commands {
            let _ = sender.send(command);
        }
    }

    fn await_acknowledgements(&self) {
        for _ in 0..self.commands.len() {
            if self.acknowledgements.recv().is_err() {
                return;
            }
        }
    }

    /// Let the workers run until there is a solution, all of them are idle, or one of them
    /// stopped.
    fn search(&mut self) -> Option<Space> {
        let Ok(mut search) = self.shared.search.lock() else {
            self.stopped = true;
            return None;
        };

        loop {
            if let Some(solution) = search.solutions.pop_front() {
                return Some(solution);
            }

            if search.has_stopped {
                self.stopped = true;
                return None;
            }

            if search.busy == 0 {
                return None;
            }

            search = match self.shared.search_event.wait(search) {
                Ok(search) => search,
                Err(_) => {
                    self.stopped = true;
                    return None;
                }
            };
        }
    }
}

impl SearchEngine for ParallelEngine {
    fn next(&mut self) -> Option<Space> {
        self.stopped = false;

        {
            let Ok(mut search) = self.shared.search.lock() else {
                self.stopped = true;
                return None;
            };

            if let Some(solution) = search.solutions.pop_front() {
                return Some(solution);
            }

            search.has_stopped = false;
            if search.busy == 0 {
                return None;
            }
        }

        self.broadcast(Command::Work);
        let solution = self.search();
        self.broadcast(Command::Wait);

        solution
    }

    fn statistics(&self) -> SearchStatistics {
        let mut statistics = SearchStatistics::default();

        for worker in &self.shared.workers {
            if let Ok(worker) = worker.lock() {
                statistics.accumulate(&worker.explorer.statistics());
            }
        }

        if let Ok(search) = self.shared.search.lock() {
            statistics.solutions = search.reported;
        }

        statistics
    }

    fn stopped(&self) -> bool {
        self.stopped
    }

    fn reset(&mut self, space: Space) {
        self.broadcast(Command::Reset);
        self.await_acknowledgements();

        let mut space = Some(space);
        for (index, worker) in self.shared.workers.iter().enumerate() {
            let Ok(mut worker) = worker.lock() else {
                continue;
            };

            worker.idle = false;
            worker.best = None;
            worker.mark = 0;

            match space.take().filter(|_| index == 0) {
                Some(space) => worker.explorer.start(space),
                None => worker.explorer.clear(),
            }
        }

        if let Some(best) = &self.shared.best {
            if let Ok(mut stored) = best.space.lock() {
                *stored = None;
            }
            let _ = best
                .generation
                .fetch_add(1, std::sync::atomic::Ordering::AcqRel);
        }

        if let Ok(mut search) = self.shared.search.lock() {
            search.solutions.clear();
            search.busy = self.commands.len();
            search.has_stopped = false;
        }

        self.stopped = false;
        self.broadcast(Command::Wait);
        self.await_acknowledgements();
    }

    /// The workers only explore parts of the tree, so their paths do not describe what has been
    /// explored.
    fn nogoods(&mut self) -> NoGoods {
        NoGoods::default()
    }
}

impl Drop for ParallelEngine {
    fn drop(&mut self) {
        self.broadcast(Command::Terminate);
        self.await_acknowledgements();

        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }

        if let Some(tracer) = &self.tracer {
            tracer.done();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IntBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::constraints;
    use crate::termination::NodeBudget;

    fn permutations(n: usize) -> Space {
        let mut space = Space::default();
        let variables = space
            .new_integers(n, 1, n as i32)
            .expect("non-empty domain");
        let _ = constraints::all_different(&mut space, variables.clone()).expect("not failed");
        let _ = space.branch(IntBrancher::new(&variables, InputOrder, InDomainMin));
        space
    }

    fn options(threads: usize) -> SearchOptions {
        SearchOptions::default()
            .with_threads(threads)
            .with_steal_limit(0)
    }

    #[test]
    fn workers_find_every_solution_once() {
        let mut engine = ParallelEngine::new(permutations(5), options(4), false);

        let mut solutions = 0;
        while engine.next().is_some() {
            solutions += 1;
        }

        assert_eq!(solutions, 120);
        assert_eq!(engine.statistics().solutions, 120);
        assert!(!engine.stopped());
    }

    #[test]
    fn the_stop_sees_the_work_of_all_workers() {
        let options = options(3).with_stop(NodeBudget::new(10));
        let mut engine = ParallelEngine::new(permutations(6), options, false);

        while engine.next().is_some() {}

        assert!(engine.stopped());
        assert!(engine.statistics().nodes < 720);
    }

    #[test]
    fn reset_restarts_all_workers() {
        let mut engine = ParallelEngine::new(permutations(4), options(2), false);
        assert!(engine.next().is_some());

        engine.reset(permutations(3));
        let mut solutions = 0;
        while engine.next().is_some() {
            solutions += 1;
        }

        assert_eq!(solutions, 6);
    }
}
