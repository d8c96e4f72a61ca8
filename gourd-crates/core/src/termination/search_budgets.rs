//! Budgets on the counters kept in the [`SearchStatistics`].
use super::TerminationCondition;
use crate::search::SearchStatistics;

/// A [`TerminationCondition`] which triggers once the given number of nodes has been explored.
#[derive(Clone, Copy, Debug)]
pub struct NodeBudget {
    limit: u64,
}

impl NodeBudget {
    pub fn new(limit: u64) -> NodeBudget {
        NodeBudget { limit }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.nodes >= self.limit
    }
}

/// A [`TerminationCondition`] which triggers once the given number of failed nodes has been
/// encountered.
#[derive(Clone, Copy, Debug)]
pub struct FailBudget {
    limit: u64,
}

impl FailBudget {
    pub fn new(limit: u64) -> FailBudget {
        FailBudget { limit }
    }
}

impl TerminationCondition for FailBudget {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.fails >= self.limit
    }
}

/// A [`TerminationCondition`] which triggers once the spaces held by the engine occupy more than
/// the given number of bytes.
#[derive(Clone, Copy, Debug)]
pub struct MemoryBudget {
    limit: u64,
}

impl MemoryBudget {
    pub fn new(limit: u64) -> MemoryBudget {
        MemoryBudget { limit }
    }
}

impl TerminationCondition for MemoryBudget {
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        statistics.memory > self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_budget_allows_exactly_the_limit() {
        let mut budget = NodeBudget::new(3);
        let mut statistics = SearchStatistics::default();

        statistics.nodes = 2;
        assert!(!budget.should_stop(&statistics));
        statistics.nodes = 3;
        assert!(budget.should_stop(&statistics));
    }

    #[test]
    fn memory_budget_compares_against_current_memory() {
        let mut budget = MemoryBudget::new(1024);
        let statistics = SearchStatistics {
            memory: 1025,
            ..Default::default()
        };

        assert!(budget.should_stop(&statistics));
    }
}
