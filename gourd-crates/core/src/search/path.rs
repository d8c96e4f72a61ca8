use super::nogoods::NoGoods;
use super::status;
use super::tracer::EdgeInfo;
use super::tracer::NodeId;
use super::tracer::Tracing;
use super::SearchStatistics;
use crate::branching::Choice;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;
use crate::Space;
use crate::SpaceStatus;

/// One node on the path from the root to the node being explored.
#[derive(Clone, Debug)]
struct Edge {
    /// A copy of the node, taken before any alternative was committed.
    space: Option<Space>,
    /// The memory accounted for `space` when it was stored.
    memory: usize,
    choice: Choice,
    /// The alternative being explored.
    alternative: u32,
    /// The last alternative this path is responsible for; lowered when another worker steals.
    last_alternative: u32,
    node: NodeId,
}

impl Edge {
    fn true_alternative(&self) -> u32 {
        self.alternative.min(self.choice.alternatives() - 1)
    }

    fn is_rightmost(&self) -> bool {
        self.alternative >= self.last_alternative
    }

    /// The last alternative has been handed out with the stored space, the edge only remains for
    /// the no-goods.
    fn is_lao(&self) -> bool {
        self.alternative > self.last_alternative
    }

    fn has_work(&self) -> bool {
        self.alternative < self.last_alternative
    }

    fn steal(&mut self) -> u32 {
        let stolen = self.last_alternative;
        self.last_alternative -= 1;
        stolen
    }
}

/// The best solution known to branch and bound, and the depth up to which the stored copies on
/// the path have been constrained by it.
#[derive(Debug)]
pub(crate) struct Bound<'a> {
    pub(crate) best: &'a Space,
    pub(crate) mark: &'a mut usize,
}

impl Bound<'_> {
    pub(crate) fn reborrow(&mut self) -> Bound<'_> {
        Bound {
            best: self.best,
            mark: &mut *self.mark,
        }
    }
}

/// The path from the root of the search tree to the node being explored, used to recompute the
/// spaces of nodes which were not copied.
///
/// Copies are stored on some of the edges; any other node is rebuilt from the closest copy above
/// it by replaying the alternatives on the path.
#[derive(Clone, Debug)]
pub(crate) struct Path {
    edges: Vec<Edge>,
    /// The no-goods are only extracted from edges above this depth.
    nogood_depth_limit: usize,
    /// The number of edges with an alternative left to explore or give away.
    edges_with_work: usize,
    memory: usize,
}

impl Path {
    pub(crate) fn new(nogood_depth_limit: usize) -> Path {
        Path {
            edges: vec![],
            nogood_depth_limit,
            edges_with_work: 0,
            memory: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub(crate) fn entries(&self) -> usize {
        self.edges.len()
    }

    /// The bytes held by the copies stored on the path.
    pub(crate) fn memory(&self) -> usize {
        self.memory
    }

    pub(crate) fn set_nogood_depth_limit(&mut self, limit: usize) {
        self.nogood_depth_limit = limit;
    }

    pub(crate) fn reset(&mut self, nogood_depth_limit: usize) {
        self.edges.clear();
        self.nogood_depth_limit = nogood_depth_limit;
        self.edges_with_work = 0;
        self.memory = 0;
    }

    /// The edge leading to the node which is explored next.
    pub(crate) fn top_edge_info(&self) -> Option<EdgeInfo> {
        self.edges
            .last()
            .map(|edge| EdgeInfo::new(edge.node, &edge.choice, edge.true_alternative()))
    }

    /// Add an edge for the branching node `space`, with `copy` being stored on the edge if given.
    ///
    /// Returns the choice of `space`; the caller commits its first alternative.
    pub(crate) fn push(
        &mut self,
        statistics: &mut SearchStatistics,
        space: &mut Space,
        copy: Option<Space>,
        node: NodeId,
    ) -> Choice {
        if self.edges.last().is_some_and(Edge::is_lao) {
            let _ = self.pop();
        }

        let choice = space.choice();
        let last_alternative = choice.alternatives() - 1;
        let memory = copy.as_ref().map_or(0, Space::memory);

        self.memory += memory;
        if last_alternative > 0 {
            self.edges_with_work += 1;
        }
        self.edges.push(Edge {
            space: copy,
            memory,
            choice: choice.clone(),
            alternative: 0,
            last_alternative,
            node,
        });

        statistics.depth = statistics.depth.max(self.edges.len() as u64);

        choice
    }

    /// Move to the next node to explore: the exhausted edges at the top are removed and the
    /// alternative of the remaining top edge is advanced.
    ///
    /// Returns `false` if the path is exhausted.
    pub(crate) fn next(&mut self) -> bool {
        while let Some(top) = self.edges.last_mut() {
            if top.is_rightmost() {
                let _ = self.pop();
            } else {
                top.alternative += 1;
                if !top.has_work() {
                    self.edges_with_work -= 1;
                }
                return true;
            }
        }

        false
    }

    /// Rebuild the space of the node the path currently points to.
    ///
    /// `distance` is set to the number of commits separating the returned space from the closest
    /// copy on the path. When the replay is longer than `adaptive_distance`, a copy is stored
    /// halfway. Returns `None` if the node turns out to be failed while being rebuilt; the path
    /// is then unwound up to that node and the caller has to call [`Path::next`].
    ///
    /// With a `bound`, the copies above `mark` are constrained by the best solution first.
    pub(crate) fn recompute(
        &mut self,
        distance: &mut usize,
        adaptive_distance: usize,
        statistics: &mut SearchStatistics,
        mut bound: Option<Bound<'_>>,
        tracing: &Tracing,
    ) -> Option<Space> {
        gourd_assert_simple!(!self.edges.is_empty());

        let n = self.edges.len();
        let top = n - 1;

        // The top edge explores its last alternative and has a copy: use the copy itself.
        if self.edges[top].space.is_some() && self.edges[top].is_rightmost() {
            let mut space = self.take_space(top)?;
            space.commit(&self.edges[top].choice, self.edges[top].alternative);

            if let Some(bound) = bound.as_mut() {
                if *bound.mark > top {
                    *bound.mark = top;
                    space.constrain(bound.best);
                }
            }

            if n > self.nogood_depth_limit {
                self.edges[top].alternative += 1;
            }

            *distance = 0;
            return Some(space);
        }

        let last_copy = self.last_copy(n);
        *distance = n - last_copy;

        let mut space = match bound.as_mut() {
            Some(bound) if last_copy < *bound.mark => {
                *bound.mark = last_copy;

                let stored = self.edges[last_copy]
                    .space
                    .as_mut()
                    .expect("the last copy stores a space");
                stored.constrain(bound.best);

                if status(stored, statistics) == SpaceStatus::Failed {
                    statistics.fails += 1;
                    self.unwind(last_copy, tracing);
                    return None;
                }

                stored.clone()
            }
            _ => self.edges[last_copy]
                .space
                .clone()
                .expect("the last copy stores a space"),
        };

        if *distance < adaptive_distance {
            for index in last_copy..n {
                self.commit(&mut space, index);
            }

            return Some(space);
        }

        let middle = last_copy + *distance / 2;
        let mut index = last_copy;

        while index < middle {
            self.commit(&mut space, index);
            index += 1;
        }

        // A copy below a rightmost edge would never be used for recomputation.
        while index < n && self.edges[index].is_rightmost() {
            self.commit(&mut space, index);
            index += 1;
        }

        if index + 1 < n {
            if status(&mut space, statistics) == SpaceStatus::Failed {
                statistics.fails += 1;
                self.unwind(index, tracing);
                return None;
            }

            self.store(index, space.clone());
            *distance = n - index;
        }

        while index < n {
            self.commit(&mut space, index);
            index += 1;
        }

        Some(space)
    }

    /// Remove the edges from `index` upwards; the alternatives which will now never be explored
    /// are reported to the tracer.
    pub(crate) fn unwind(&mut self, index: usize, tracing: &Tracing) {
        let mut is_top = true;

        while self.edges.len() > index {
            let edge = self.pop();

            if tracing.is_active() {
                // The alternative being explored below the top edge was never reached.
                let first = if is_top {
                    edge.alternative
                } else {
                    edge.alternative + 1
                };

                for alternative in first..=edge.last_alternative {
                    tracing.skip(&EdgeInfo::new(edge.node, &edge.choice, alternative));
                }
            }

            is_top = false;
        }
    }

    /// Whether [`Path::steal`] would succeed with the given `steal_limit`.
    pub(crate) fn has_stealable_work(&self, steal_limit: usize) -> bool {
        self.edges_with_work > steal_limit
    }

    /// Give away an unexplored alternative, leaving at least `steal_limit` edges with work on this
    /// path.
    ///
    /// The last alternative of the deepest edge which still has `steal_limit` edges with work
    /// below it is taken. Returns the space of the stolen node and the edge leading to it.
    pub(crate) fn steal(&mut self, steal_limit: usize) -> Option<(Space, EdgeInfo)> {
        let mut work = 0;

        for index in (0..self.edges.len()).rev() {
            if self.edges[index].has_work() {
                work += 1;
            }

            if work > steal_limit {
                let last_copy = self.last_copy(index + 1);
                let mut space = self.edges[last_copy].space.clone()?;

                for replayed in last_copy..index {
                    self.commit(&mut space, replayed);
                }

                let edge = &mut self.edges[index];
                let alternative = edge.steal();
                space.commit(&edge.choice, alternative);
                let info = EdgeInfo::new(edge.node, &edge.choice, alternative);

                if !edge.has_work() {
                    self.edges_with_work -= 1;
                }

                return Some((space, info));
            }
        }

        None
    }

    /// The alternatives which are completely explored, for the edges within the no-good depth
    /// limit.
    pub(crate) fn nogoods(&self) -> NoGoods {
        NoGoods::new(
            self.edges
                .iter()
                .take(self.nogood_depth_limit)
                .map(|edge| (edge.choice.clone(), edge.true_alternative()))
                .collect(),
        )
    }

    fn commit(&self, space: &mut Space, index: usize) {
        let edge = &self.edges[index];
        space.commit(&edge.choice, edge.true_alternative());
    }

    /// The index of the last edge below `end` which stores a copy.
    fn last_copy(&self, end: usize) -> usize {
        let index = self.edges[..end]
            .iter()
            .rposition(|edge| edge.space.is_some());

        gourd_assert_moderate!(index.is_some(), "the first edge of a path stores a copy");
        index.unwrap_or(0)
    }

    fn take_space(&mut self, index: usize) -> Option<Space> {
        let edge = &mut self.edges[index];
        self.memory -= edge.memory;
        edge.memory = 0;
        edge.space.take()
    }

    fn store(&mut self, index: usize, space: Space) {
        let edge = &mut self.edges[index];
        let memory = space.memory();

        self.memory = self.memory - edge.memory + memory;
        edge.memory = memory;
        edge.space = Some(space);
    }

    fn pop(&mut self) -> Edge {
        let edge = self.edges.pop().expect("popping from a non-empty path");
        self.memory -= edge.memory;
        if edge.has_work() {
            self.edges_with_work -= 1;
        }
        edge
    }
}
