//! Search engines explore the tree spanned by the branchers of a [`Space`].
//!
//! All engines keep a single node to explore and the path from the root to it. Nodes are
//! not copied at every branching: copies are stored on the path every
//! [`SearchOptions::copy_distance`] commits, and other nodes are recomputed from the closest
//! copy by replaying the alternatives on the path.
//!
//! The engines are
//! - [`dfs`]: depth-first search, reporting every solution;
//! - [`bab`]: branch and bound, reporting ever better solutions of an objective;
//! - [`lds`]: limited discrepancy search;
//! - [`rbs`]: restart-based search around depth-first search or branch and bound.
//!
//! Depth-first search and branch and bound use several worker threads when
//! [`SearchOptions::threads`] is larger than one.
//!
//! # Example
//! ```rust
//! # use gourd_core::Space;
//! # use gourd_core::branching::branchers::IntBrancher;
//! # use gourd_core::branching::value_selection::InDomainMin;
//! # use gourd_core::branching::variable_selection::FirstFail;
//! # use gourd_core::constraints;
//! # use gourd_core::search;
//! # use gourd_core::search::SearchOptions;
//! let mut space = Space::default();
//! let x = space.new_integers(3, 1, 3).unwrap();
//! constraints::all_different(&mut space, x.clone()).unwrap();
//! space.branch(IntBrancher::new(&x, FirstFail, InDomainMin));
//!
//! let mut engine = search::dfs(&mut space, SearchOptions::default()).unwrap();
//!
//! let mut solutions = 0;
//! while let Some(solution) = engine.next() {
//!     assert!(x.iter().all(|&variable| solution.value_of(variable).is_some()));
//!     solutions += 1;
//! }
//!
//! assert_eq!(solutions, 6);
//! assert_eq!(engine.statistics().solutions, 6);
//! ```
mod explorer;
mod nogoods;
mod options;
mod parallel;
mod path;
mod restart;
mod sequential;
mod statistics;
pub mod tracer;

use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

pub use nogoods::NoGoodLiteral;
pub use nogoods::NoGoods;
pub use options::EngineKind;
pub use options::SearchOptions;
use parallel::ParallelEngine;
use restart::CutoffStop;
use restart::Rbs;
use sequential::Bab;
use sequential::Dfs;
use sequential::Lds;
pub use statistics::SearchStatistics;

use crate::basic_types::sequence_generators::SequenceGeneratorType;
use crate::basic_types::ModelError;
use crate::Space;
use crate::SpaceStatus;

/// The cutoff sequence of restart-based search when none is given.
const DEFAULT_RESTART_BASE: i64 = 250;
const DEFAULT_RESTART_FACTOR: f64 = 1.5;

/// A search over the tree of a space.
pub trait SearchEngine: Debug + Send {
    /// The next solution, or `None` if the search is exhausted or was stopped, see
    /// [`SearchEngine::stopped`]. A stopped search continues where it left off when `next` is
    /// called again.
    fn next(&mut self) -> Option<Space>;

    fn statistics(&self) -> SearchStatistics;

    /// Whether the last call to [`SearchEngine::next`] returned `None` because the stop
    /// triggered.
    fn stopped(&self) -> bool;

    /// Whether the whole tree was explored when [`SearchEngine::next`] returned `None` without
    /// being stopped. Limited discrepancy search leaves the paths beyond its discrepancy limit
    /// unexplored.
    fn is_complete(&self) -> bool {
        true
    }

    /// Drop the current search and start searching `space`. The statistics are kept.
    fn reset(&mut self, space: Space);

    /// The alternatives on the current path which have been explored completely.
    fn nogoods(&mut self) -> NoGoods;
}

/// Depth-first search for all solutions of `space`.
pub fn dfs(space: &mut Space, options: SearchOptions) -> Result<Box<dyn SearchEngine>, ModelError> {
    options.validate()?;
    let root = snapshot(space, options.clone);

    Ok(depth_first(root, options, false))
}

/// Branch and bound over the objective of `space`: every solution is better than the previous
/// one, the last one is optimal unless the search was stopped.
pub fn bab(space: &mut Space, options: SearchOptions) -> Result<Box<dyn SearchEngine>, ModelError> {
    options.validate()?;
    if !space.has_objective() {
        return Err(ModelError::MissingObjective);
    }
    let root = snapshot(space, options.clone);

    Ok(depth_first(root, options, true))
}

/// Limited discrepancy search, up to [`SearchOptions::discrepancy_limit`] discrepancies.
///
/// Always runs on the calling thread.
pub fn lds(space: &mut Space, options: SearchOptions) -> Result<Box<dyn SearchEngine>, ModelError> {
    options.validate()?;
    if options.threads > 1 {
        log::warn!("limited discrepancy search ignores the number of threads");
    }
    let root = snapshot(space, options.clone);

    Ok(Box::new(Lds::new(root, options)))
}

/// Restart-based search. With an objective it runs branch and bound and restarts after every
/// solution, otherwise depth-first search.
///
/// The fail limits between restarts come from [`SearchOptions::cutoff`], by default a geometric
/// sequence.
pub fn rbs(
    space: &mut Space,
    mut options: SearchOptions,
) -> Result<Box<dyn SearchEngine>, ModelError> {
    options.validate()?;
    let master = snapshot(space, options.clone);

    let cutoff = options.cutoff.take().unwrap_or_else(|| {
        SequenceGeneratorType::Geometric.create(DEFAULT_RESTART_BASE, DEFAULT_RESTART_FACTOR)
    });

    let fail_limit = Arc::new(AtomicU64::new(u64::MAX));
    let user_stopped = Arc::new(AtomicBool::new(false));
    options.stop = Some(Box::new(CutoffStop::new(
        options.stop.take(),
        &fail_limit,
        &user_stopped,
    )));

    let optimising = master.has_objective();
    let engine = depth_first(master.clone(), options, optimising);

    Ok(Box::new(Rbs::new(
        engine,
        master,
        cutoff,
        fail_limit,
        user_stopped,
    )))
}

/// Create the engine of the given kind.
pub fn engine(
    kind: EngineKind,
    space: &mut Space,
    options: SearchOptions,
) -> Result<Box<dyn SearchEngine>, ModelError> {
    match kind {
        EngineKind::Dfs => dfs(space, options),
        EngineKind::Bab => bab(space, options),
        EngineKind::Lds => lds(space, options),
        EngineKind::Rbs => rbs(space, options),
    }
}

fn depth_first(root: Space, options: SearchOptions, branch_and_bound: bool) -> Box<dyn SearchEngine> {
    match (options.threads > 1, branch_and_bound) {
        (true, _) => Box::new(ParallelEngine::new(root, options, branch_and_bound)),
        (false, true) => Box::new(Bab::new(root, options)),
        (false, false) => Box::new(Dfs::new(root, options)),
    }
}

fn snapshot(space: &mut Space, clone: bool) -> Space {
    if clone {
        space.clone()
    } else {
        std::mem::take(space)
    }
}

/// Propagate `space`, counting the propagator executions.
pub(crate) fn status(space: &mut Space, statistics: &mut SearchStatistics) -> SpaceStatus {
    let before = space.propagations();
    let status = space.status();
    statistics.propagations += space.propagations() - before;
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IntBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;

    fn binary_space() -> Space {
        let mut space = Space::default();
        let variables = space.new_integers(2, 0, 1).expect("non-empty domain");
        let _ = space.branch(IntBrancher::new(&variables, InputOrder, InDomainMin));
        space
    }

    #[test]
    fn branch_and_bound_requires_an_objective() {
        let mut space = binary_space();

        let result = bab(&mut space, SearchOptions::default());

        assert!(matches!(result, Err(ModelError::MissingObjective)));
    }

    #[test]
    fn without_clone_the_space_is_taken() {
        let mut space = binary_space();

        let mut engine = dfs(&mut space, SearchOptions::default().with_clone(false))
            .expect("valid options");

        assert_eq!(space.num_branchers(), 0);
        assert!(engine.next().is_some());
    }

    #[test]
    fn with_clone_the_space_is_kept() {
        let mut space = binary_space();

        let _engine = dfs(&mut space, SearchOptions::default()).expect("valid options");

        assert_eq!(space.num_branchers(), 1);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut space = binary_space();

        let result = lds(&mut space, SearchOptions::default().with_threads(0));

        assert!(matches!(result, Err(ModelError::InvalidOption(_))));
    }
}
