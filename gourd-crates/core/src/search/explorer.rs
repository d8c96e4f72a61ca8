use super::options::Exploration;
use super::path::Bound;
use super::path::Path;
use super::status;
use super::tracer::EdgeInfo;
use super::tracer::NodeKind;
use super::tracer::Tracing;
use super::SearchStatistics;
use crate::termination::TerminationCondition;
use crate::Space;
use crate::SpaceStatus;

/// What happened when a node was explored.
#[derive(Debug)]
pub(crate) enum Step {
    Failed,
    Solved(Space),
    Branched,
}

/// Depth-first exploration of a subtree with copying and recomputation, shared by the sequential
/// and parallel depth-first engines.
#[derive(Debug)]
pub(crate) struct Explorer {
    pub(crate) path: Path,
    /// The node to explore next, if it does not have to be recomputed.
    pub(crate) current: Option<Space>,
    /// The number of commits since the last copy was stored on the path.
    distance: usize,
    pub(crate) statistics: SearchStatistics,
    pub(crate) tracing: Tracing,
    /// The edge leading to the root of the subtree.
    root_edge: EdgeInfo,
    exploration: Exploration,
}

impl Explorer {
    pub(crate) fn new(exploration: Exploration, tracing: Tracing) -> Explorer {
        Explorer {
            path: Path::new(exploration.nogoods_limit),
            current: None,
            distance: 0,
            statistics: SearchStatistics::default(),
            tracing,
            root_edge: EdgeInfo::root(),
            exploration,
        }
    }

    /// Start exploring the tree below `space`, dropping whatever was explored before.
    ///
    /// A root which fails during propagation is counted as a failure and leaves nothing to
    /// explore. The statistics are kept.
    pub(crate) fn start(&mut self, mut space: Space) {
        self.tracing.round();
        self.path.reset(self.exploration.nogoods_limit);
        self.distance = 0;
        self.root_edge = EdgeInfo::root();

        if status(&mut space, &mut self.statistics) == SpaceStatus::Failed {
            self.statistics.fails += 1;
            self.current = None;
        } else {
            self.current = Some(space);
        }
    }

    /// Explore a subtree handed over by another worker, reached through `edge`.
    pub(crate) fn adopt(&mut self, space: Space, edge: EdgeInfo) {
        self.tracing.round();
        self.path.reset(0);
        self.distance = 0;
        self.root_edge = edge;
        self.current = Some(space);
    }

    /// Give up the current subtree.
    pub(crate) fn clear(&mut self) {
        self.path.reset(0);
        self.distance = 0;
        self.current = None;
    }

    /// Poll `stop` with up to date statistics.
    pub(crate) fn should_stop(&mut self, stop: &mut Option<Box<dyn TerminationCondition>>) -> bool {
        match stop {
            Some(stop) => {
                self.statistics.memory = self.memory();
                stop.should_stop(&self.statistics)
            }
            None => false,
        }
    }

    pub(crate) fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            memory: self.memory(),
            ..self.statistics
        }
    }

    fn memory(&self) -> u64 {
        (self.path.memory() + self.current.as_ref().map_or(0, Space::memory)) as u64
    }

    /// The node to explore next, recomputed from the path when needed. `None` once the subtree
    /// is exhausted.
    pub(crate) fn next_node(&mut self, mut bound: Option<Bound<'_>>) -> Option<Space> {
        loop {
            if let Some(space) = self.current.take() {
                return Some(space);
            }

            if self.path.is_empty() {
                return None;
            }

            self.current = self.path.recompute(
                &mut self.distance,
                self.exploration.adaptive_distance,
                &mut self.statistics,
                bound.as_mut().map(Bound::reborrow),
                &self.tracing,
            );

            if self.current.is_none() {
                let _ = self.path.next();
            }
        }
    }

    /// Propagate `space` and act on its status: a failed node is dropped, a solution is handed
    /// back, and a branching node gets an edge on the path and continues with its first
    /// alternative.
    pub(crate) fn explore(&mut self, mut space: Space) -> Step {
        self.statistics.nodes += 1;

        let edge = self.tracing.is_active().then(|| self.edge_info());
        let id = self.tracing.next_node_id();

        let step = match status(&mut space, &mut self.statistics) {
            SpaceStatus::Failed => {
                self.statistics.fails += 1;
                let _ = self.path.next();
                Step::Failed
            }

            SpaceStatus::Solved => {
                let _ = self.path.next();
                Step::Solved(space)
            }

            SpaceStatus::Branch => {
                let copy = if self.distance == 0 || self.distance >= self.exploration.copy_distance
                {
                    self.distance = 1;
                    Some(space.clone())
                } else {
                    self.distance += 1;
                    None
                };

                let choice = self.path.push(&mut self.statistics, &mut space, copy, id);
                space.commit(&choice, 0);

                if let Some(edge) = &edge {
                    self.tracing
                        .node(edge, id, NodeKind::Branch(choice.alternatives()));
                }

                self.current = Some(space);
                return Step::Branched;
            }
        };

        if let Some(edge) = &edge {
            let kind = match step {
                Step::Failed => NodeKind::Failed,
                _ => NodeKind::Solved,
            };
            self.tracing.node(edge, id, kind);
        }

        step
    }

    fn edge_info(&self) -> EdgeInfo {
        self.path
            .top_edge_info()
            .unwrap_or_else(|| self.root_edge.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::search::tracer::SearchTracer;
    use crate::search::tracer::TraceEvent;
    use crate::search::tracer::TraceRecorder;
    use crate::search::SearchOptions;

    #[test]
    fn an_adopted_subtree_starts_a_new_round() {
        let recorder = Arc::new(TraceRecorder::default());
        let tracer: Arc<dyn SearchTracer> = Arc::<TraceRecorder>::clone(&recorder);
        let mut explorer = Explorer::new(
            SearchOptions::default().exploration(),
            Tracing::new(Some(tracer), 3),
        );

        let mut space = Space::default();
        let x = space.new_integer(0, 1).expect("non-empty domain");
        explorer.start(space.clone());
        explorer.clear();

        let _ = space.int_eq(&x, 1);
        explorer.adopt(space, EdgeInfo::root());

        assert_eq!(
            recorder.events(),
            vec![TraceEvent::Round(3), TraceEvent::Round(3)]
        );
    }
}
