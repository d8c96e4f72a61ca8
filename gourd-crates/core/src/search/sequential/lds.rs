use crate::branching::Choice;
use crate::search::status;
use crate::search::tracer::EdgeInfo;
use crate::search::tracer::NodeId;
use crate::search::tracer::NodeKind;
use crate::search::tracer::Tracing;
use crate::search::NoGoods;
use crate::search::SearchEngine;
use crate::search::SearchOptions;
use crate::search::SearchStatistics;
use crate::termination::TerminationCondition;
use crate::Space;
use crate::SpaceStatus;

/// A node of a probe with alternatives left to explore. The alternatives are explored from right
/// to left, `alternative` is the next one.
#[derive(Debug)]
struct ProbeNode {
    space: Space,
    choice: Choice,
    alternative: u32,
    id: NodeId,
    depth: usize,
}

/// Explores the paths of the tree which take exactly `discrepancy` discrepancies, where taking
/// alternative `i` of a choice counts as `i` discrepancies.
#[derive(Debug)]
struct Probe {
    stack: Vec<ProbeNode>,
    /// The next node to explore, the edge leading to it and its depth.
    current: Option<(Space, EdgeInfo, usize)>,
    /// The discrepancies still to be spent on the current path.
    discrepancy: usize,
    /// No path of the tree has more discrepancies than explored in this probe.
    exhausted: bool,
    statistics: SearchStatistics,
    tracing: Tracing,
}

impl Probe {
    fn reset(&mut self, space: Option<Space>, discrepancy: usize) {
        self.tracing.round();
        self.stack.clear();
        self.current = space.map(|space| (space, EdgeInfo::root(), 0));
        self.discrepancy = discrepancy;
        self.exhausted = true;
    }

    fn edge(&self, id: NodeId, choice: &Choice, alternative: u32) -> EdgeInfo {
        if self.tracing.is_active() {
            EdgeInfo::new(id, choice, alternative)
        } else {
            EdgeInfo::root()
        }
    }

    /// Continue the probe up to the next solution. `None` when the probe is finished or `stop`
    /// triggered, the latter is reported through the returned flag.
    fn explore(&mut self, stop: &mut Option<Box<dyn TerminationCondition>>) -> (Option<Space>, bool) {
        loop {
            let (mut space, edge, depth) = match self.current.take() {
                Some(current) => current,
                None => {
                    let Some(top) = self.stack.last_mut() else {
                        return (None, false);
                    };

                    let alternative = top.alternative;
                    let choice = top.choice.clone();
                    let id = top.id;
                    let depth = top.depth + 1;

                    if let Some(stop) = stop {
                        if stop.should_stop(&self.statistics) {
                            return (None, true);
                        }
                    }

                    let mut space = if alternative == 0 {
                        match self.stack.pop() {
                            Some(node) => node.space,
                            None => return (None, false),
                        }
                    } else {
                        top.alternative -= 1;
                        top.space.clone()
                    };

                    space.commit(&choice, alternative);
                    self.discrepancy += 1;
                    (space, self.edge(id, &choice, alternative), depth)
                }
            };

            if self.discrepancy == 0 {
                // Only first alternatives remain.
                if let Some(solution) = self.dive(space, edge, depth) {
                    return (Some(solution), false);
                }
                continue;
            }

            self.statistics.nodes += 1;
            let id = self.tracing.next_node_id();

            match status(&mut space, &mut self.statistics) {
                SpaceStatus::Failed => {
                    self.statistics.fails += 1;
                    self.tracing.node(&edge, id, NodeKind::Failed);
                }

                SpaceStatus::Solved => {
                    self.tracing.node(&edge, id, NodeKind::Solved);
                    // With discrepancies left over, an earlier probe already reported the
                    // solution.
                    if self.discrepancy == 0 {
                        return (Some(space), false);
                    }
                }

                SpaceStatus::Branch => {
                    let choice = space.choice();
                    let alternatives = choice.alternatives() as usize;
                    self.tracing
                        .node(&edge, id, NodeKind::Branch(choice.alternatives()));
                    self.statistics.depth = self.statistics.depth.max(depth as u64 + 1);

                    if self.discrepancy < alternatives - 1 {
                        self.exhausted = false;
                    }

                    let taken = self.discrepancy.min(alternatives - 1);
                    self.stack.push(ProbeNode {
                        space: space.clone(),
                        choice: choice.clone(),
                        alternative: taken as u32 - 1,
                        id,
                        depth,
                    });

                    space.commit(&choice, taken as u32);
                    self.discrepancy -= taken;

                    let edge = self.edge(id, &choice, taken as u32);
                    self.current = Some((space, edge, depth + 1));
                }
            }
        }
    }

    /// Follow the first alternatives down to a leaf.
    fn dive(&mut self, mut space: Space, mut edge: EdgeInfo, mut depth: usize) -> Option<Space> {
        loop {
            self.statistics.nodes += 1;
            let id = self.tracing.next_node_id();

            match status(&mut space, &mut self.statistics) {
                SpaceStatus::Failed => {
                    self.statistics.fails += 1;
                    self.tracing.node(&edge, id, NodeKind::Failed);
                    return None;
                }

                SpaceStatus::Solved => {
                    self.tracing.node(&edge, id, NodeKind::Solved);
                    return Some(space);
                }

                SpaceStatus::Branch => {
                    let choice = space.choice();
                    self.tracing
                        .node(&edge, id, NodeKind::Branch(choice.alternatives()));
                    depth += 1;
                    self.statistics.depth = self.statistics.depth.max(depth as u64);

                    // The other alternatives are left to the next probes.
                    self.exhausted = false;

                    space.commit(&choice, 0);
                    edge = self.edge(id, &choice, 0);
                }
            }
        }
    }
}

/// Limited discrepancy search.
///
/// Probes are run with an increasing number of discrepancies, each from a copy of the root, until
/// the discrepancy limit is reached or a probe saw the whole tree.
#[derive(Debug)]
pub(crate) struct Lds {
    probe: Probe,
    root: Option<Space>,
    discrepancy: usize,
    discrepancy_limit: usize,
    stop: Option<Box<dyn TerminationCondition>>,
    stopped: bool,
}

impl Lds {
    pub(crate) fn new(space: Space, options: SearchOptions) -> Lds {
        let mut lds = Lds {
            probe: Probe {
                stack: vec![],
                current: None,
                discrepancy: 0,
                exhausted: true,
                statistics: SearchStatistics::default(),
                tracing: Tracing::new(options.tracer, 0),
            },
            root: None,
            discrepancy: 0,
            discrepancy_limit: options.discrepancy_limit,
            stop: options.stop,
            stopped: false,
        };
        lds.start(space);
        lds
    }

    fn start(&mut self, mut space: Space) {
        self.discrepancy = 0;

        if status(&mut space, &mut self.probe.statistics) == SpaceStatus::Failed {
            self.probe.statistics.fails += 1;
            self.root = None;
            self.probe.reset(None, 0);
        } else {
            self.root = (self.discrepancy_limit > 0).then(|| space.clone());
            self.probe.reset(Some(space), 0);
        }
    }
}

impl SearchEngine for Lds {
    fn next(&mut self) -> Option<Space> {
        self.stopped = false;

        loop {
            let (solution, stopped) = self.probe.explore(&mut self.stop);

            if let Some(solution) = solution {
                self.probe.statistics.solutions += 1;
                return Some(solution);
            }

            if stopped {
                self.stopped = true;
                return None;
            }

            if self.probe.exhausted || self.discrepancy >= self.discrepancy_limit {
                return None;
            }

            self.discrepancy += 1;
            let root = if self.discrepancy == self.discrepancy_limit {
                self.root.take()
            } else {
                self.root.clone()
            };

            match root {
                Some(root) => self.probe.reset(Some(root), self.discrepancy),
                None => return None,
            }
        }
    }

    fn statistics(&self) -> SearchStatistics {
        self.probe.statistics
    }

    fn stopped(&self) -> bool {
        self.stopped
    }

    /// The last probe saw every path of the tree; false once the discrepancy limit cut it off.
    fn is_complete(&self) -> bool {
        self.probe.exhausted
    }

    fn reset(&mut self, space: Space) {
        self.stopped = false;
        self.start(space);
    }

    /// The probes do not keep a recomputation path, so there are no no-goods.
    fn nogoods(&mut self) -> NoGoods {
        NoGoods::default()
    }
}

impl Drop for Lds {
    fn drop(&mut self) {
        self.probe.tracing.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::IntBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::engine::variables::DomainId;

    fn unconstrained(n: usize) -> (Space, Vec<DomainId>) {
        let mut space = Space::default();
        let variables = space.new_integers(n, 0, 1).expect("non-empty domain");
        let _ = space.branch(IntBrancher::new(&variables, InputOrder, InDomainMin));
        (space, variables)
    }

    fn discrepancies(solution: &Space, variables: &[DomainId]) -> usize {
        variables
            .iter()
            .filter(|&&variable| solution.value_of(variable) == Some(1))
            .count()
    }

    #[test]
    fn the_first_probe_follows_the_first_alternatives() {
        let (space, variables) = unconstrained(3);
        let mut lds = Lds::new(space, SearchOptions::default().with_discrepancy_limit(0));

        let solution = lds.next().expect("a solution");
        assert!(variables
            .iter()
            .all(|&variable| solution.value_of(variable) == Some(0)));
        assert!(lds.next().is_none());
    }

    #[test]
    fn solutions_come_in_order_of_discrepancies_without_repetition() {
        let (space, variables) = unconstrained(3);
        let mut lds = Lds::new(space, SearchOptions::default().with_discrepancy_limit(3));

        let mut found = vec![];
        while let Some(solution) = lds.next() {
            found.push(discrepancies(&solution, &variables));
        }

        assert_eq!(found.len(), 8);
        assert!(found.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn the_discrepancy_limit_bounds_the_probes() {
        let (space, variables) = unconstrained(3);
        let mut lds = Lds::new(space, SearchOptions::default().with_discrepancy_limit(1));

        let mut found = 0;
        while let Some(solution) = lds.next() {
            assert!(discrepancies(&solution, &variables) <= 1);
            found += 1;
        }

        assert_eq!(found, 4);
        assert!(!lds.is_complete());
    }

    #[test]
    fn a_discrepancy_limit_covering_the_tree_completes_the_search() {
        let (space, _) = unconstrained(3);
        let mut lds = Lds::new(space, SearchOptions::default().with_discrepancy_limit(5));

        while lds.next().is_some() {}

        assert!(!lds.stopped());
        assert!(lds.is_complete());
        assert_eq!(lds.statistics().depth, 3);
    }

    #[test]
    fn a_zero_discrepancy_limit_leaves_the_search_incomplete() {
        let (space, _) = unconstrained(3);
        let mut lds = Lds::new(space, SearchOptions::default().with_discrepancy_limit(0));

        while lds.next().is_some() {}

        assert!(!lds.is_complete());
        assert_eq!(lds.statistics().depth, 3);
    }
}
