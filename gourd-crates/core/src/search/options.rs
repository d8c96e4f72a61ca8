use std::fmt::Debug;
use std::sync::Arc;

use super::tracer::SearchTracer;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::ModelError;
use crate::termination::TerminationCondition;

/// The kinds of search engines, see [`crate::search`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EngineKind {
    /// Depth-first search.
    #[default]
    Dfs,
    /// Branch and bound.
    Bab,
    /// Limited discrepancy search.
    Lds,
    /// Restart-based search.
    Rbs,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Dfs => write!(f, "dfs"),
            EngineKind::Bab => write!(f, "bab"),
            EngineKind::Lds => write!(f, "lds"),
            EngineKind::Rbs => write!(f, "rbs"),
        }
    }
}

/// The options shared by all search engines.
///
/// # Example
/// ```rust
/// # use gourd_core::search::SearchOptions;
/// # use gourd_core::termination::NodeBudget;
/// let options = SearchOptions::default()
///     .with_copy_distance(4)
///     .with_threads(2)
///     .with_stop(NodeBudget::new(1000));
///
/// assert_eq!(options.copy_distance, 4);
/// assert!(options.stop.is_some());
/// ```
#[derive(Debug)]
pub struct SearchOptions {
    /// The minimal number of commits between two copies stored on the search path.
    pub copy_distance: usize,
    /// Recomputations longer than this store an additional copy halfway.
    pub adaptive_distance: usize,
    /// The number of workers; more than one selects the parallel engines.
    pub threads: usize,
    /// Polled once per node; the engine stops when it triggers.
    pub stop: Option<Box<dyn TerminationCondition>>,
    /// Whether the engine searches a copy of the given space. Otherwise the space is taken and
    /// the caller is left with an empty one.
    pub clone: bool,
    /// The largest discrepancy explored by limited discrepancy search.
    pub discrepancy_limit: usize,
    /// No-goods are only extracted from this many edges of the search path.
    pub nogoods_limit: usize,
    /// A worker only gives away work when it keeps more than this many open alternatives.
    pub steal_limit: usize,
    /// The fail limits between restarts of restart-based search.
    pub cutoff: Option<Box<dyn SequenceGenerator>>,
    pub tracer: Option<Arc<dyn SearchTracer>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            copy_distance: 8,
            adaptive_distance: 2,
            threads: 1,
            stop: None,
            clone: true,
            discrepancy_limit: 3,
            nogoods_limit: 128,
            steal_limit: 3,
            cutoff: None,
            tracer: None,
        }
    }
}

impl SearchOptions {
    pub fn with_copy_distance(mut self, copy_distance: usize) -> Self {
        self.copy_distance = copy_distance;
        self
    }

    pub fn with_adaptive_distance(mut self, adaptive_distance: usize) -> Self {
        self.adaptive_distance = adaptive_distance;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_stop(mut self, stop: impl TerminationCondition + 'static) -> Self {
        self.stop = Some(Box::new(stop));
        self
    }

    pub fn with_clone(mut self, clone: bool) -> Self {
        self.clone = clone;
        self
    }

    pub fn with_discrepancy_limit(mut self, discrepancy_limit: usize) -> Self {
        self.discrepancy_limit = discrepancy_limit;
        self
    }

    pub fn with_nogoods_limit(mut self, nogoods_limit: usize) -> Self {
        self.nogoods_limit = nogoods_limit;
        self
    }

    pub fn with_steal_limit(mut self, steal_limit: usize) -> Self {
        self.steal_limit = steal_limit;
        self
    }

    pub fn with_cutoff(mut self, cutoff: Box<dyn SequenceGenerator>) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn with_tracer<Tracer: SearchTracer + 'static>(mut self, tracer: Arc<Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.threads == 0 {
            return Err(ModelError::InvalidOption(
                "the number of threads must be positive".to_owned(),
            ));
        }

        Ok(())
    }

    /// The part of the options which every worker of an engine needs.
    pub(crate) fn exploration(&self) -> Exploration {
        Exploration {
            copy_distance: self.copy_distance,
            adaptive_distance: self.adaptive_distance,
            nogoods_limit: self.nogoods_limit,
            steal_limit: self.steal_limit,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Exploration {
    pub(crate) copy_distance: usize,
    pub(crate) adaptive_distance: usize,
    pub(crate) nogoods_limit: usize,
    pub(crate) steal_limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_are_rejected() {
        let options = SearchOptions::default().with_threads(0);

        assert!(matches!(
            options.validate(),
            Err(ModelError::InvalidOption(_))
        ));
    }

    #[test]
    fn defaults_are_valid() {
        let options = SearchOptions::default();

        assert!(options.validate().is_ok());
        assert_eq!(options.copy_distance, 8);
        assert_eq!(options.adaptive_distance, 2);
        assert_eq!(options.steal_limit, 3);
    }
}
