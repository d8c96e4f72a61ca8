use super::TerminationCondition;
use crate::search::SearchStatistics;

/// A [`TerminationCondition`] which triggers when one of two given [`TerminationCondition`]s
/// triggers.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    t1: T1,
    t2: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    /// Combine two [`TerminationCondition`]s into one.
    pub fn new(t1: T1, t2: T2) -> Self {
        Combinator { t1, t2 }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self, statistics: &SearchStatistics) -> bool {
        // Both conditions are polled, so that stateful conditions observe every node
        let first = self.t1.should_stop(statistics);
        let second = self.t2.should_stop(statistics);
        first || second
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::FailBudget;
    use crate::termination::NodeBudget;

    #[test]
    fn triggers_when_either_triggers() {
        let mut condition = Combinator::new(NodeBudget::new(10), FailBudget::new(2));

        let mut statistics = SearchStatistics::default();
        assert!(!condition.should_stop(&statistics));

        statistics.fails = 2;
        assert!(condition.should_stop(&statistics));

        statistics.fails = 0;
        statistics.nodes = 10;
        assert!(condition.should_stop(&statistics));
    }
}
