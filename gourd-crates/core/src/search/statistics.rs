use crate::create_statistics_struct;

create_statistics_struct!(
    /// The counters maintained by every search engine.
    SearchStatistics {
        /// The number of nodes for which propagation was run.
        nodes: u64,
        /// The number of failed nodes.
        fails: u64,
        /// The number of solutions reported.
        solutions: u64,
        /// The peak depth of the search path.
        depth: u64,
        /// The number of restarts performed by restart-based search.
        restarts: u64,
        /// The number of propagator executions.
        propagations: u64,
        /// The number of no-good literals extracted from the path.
        nogoods: u64,
        /// The estimated number of bytes held by the engine.
        memory: u64,
    }
);

impl SearchStatistics {
    /// Combine the statistics of two engines running side by side: counters are summed, the
    /// depth is the maximum of both.
    pub fn accumulate(&mut self, other: &SearchStatistics) {
        self.nodes += other.nodes;
        self.fails += other.fails;
        self.solutions += other.solutions;
        self.depth = self.depth.max(other.depth);
        self.restarts += other.restarts;
        self.propagations += other.propagations;
        self.nogoods += other.nogoods;
        self.memory += other.memory;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_sums_counters_and_keeps_maximum_depth() {
        let mut left = SearchStatistics {
            nodes: 10,
            fails: 2,
            depth: 7,
            ..Default::default()
        };
        let right = SearchStatistics {
            nodes: 5,
            fails: 1,
            solutions: 1,
            depth: 3,
            ..Default::default()
        };

        left.accumulate(&right);

        assert_eq!(left.nodes, 15);
        assert_eq!(left.fails, 3);
        assert_eq!(left.solutions, 1);
        assert_eq!(left.depth, 7);
    }
}
