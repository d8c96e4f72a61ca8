//! A [`TerminationCondition`] is a condition which is polled by the search engines once per
//! explored node. It indicates when the search should stop, even if the search tree is not yet
//! exhausted. The most common example would be [`TimeBudget`], which gives the search a certain
//! time budget to complete.
//!
//! Stopping is not an error: the engine keeps its path intact and reports
//! [`SearchEngine::stopped`](crate::search::SearchEngine::stopped).
mod combinator;
mod indefinite;
mod search_budgets;
mod time_budget;

use std::fmt::Debug;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use search_budgets::FailBudget;
pub use search_budgets::MemoryBudget;
pub use search_budgets::NodeBudget;
pub use time_budget::TimeBudget;

use crate::search::SearchStatistics;

/// The central trait that defines a termination condition. A termination condition determines
/// when the search should give up.
pub trait TerminationCondition: Debug + Send {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool;
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        match self {
            Some(t) => t.should_stop(statistics),
            None => false,
        }
    }
}

impl TerminationCondition for Box<dyn TerminationCondition> {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        self.as_mut().should_stop(statistics)
    }
}
