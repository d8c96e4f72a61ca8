//! Observing the shape of the search tree.
//!
//! An engine reports every explored node, together with the edge leading to it, to an attached
//! [`SearchTracer`]. Node identifiers are unique per engine run, so an observer can rebuild the
//! tree from the events alone.
use std::fmt::Debug;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::Mutex;

use crate::branching::Choice;

/// Receives the events of a search.
///
/// Parallel engines call the tracer from every worker thread.
pub trait SearchTracer: Debug + Send + Sync {
    /// A worker starts a new round of exploration, e.g. a new probe of limited discrepancy search.
    fn round(&self, worker: usize);

    /// A node was explored.
    fn node(&self, edge: &EdgeInfo, node: &NodeInfo);

    /// An alternative of an explored node will not be explored.
    fn skip(&self, edge: &EdgeInfo);

    /// The search has finished.
    fn done(&self);
}

/// Identifies a node of the search tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub worker: usize,
    pub index: u64,
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.worker, self.index)
    }
}

/// The edge through which a node is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeInfo {
    /// `None` for the root.
    pub parent: Option<NodeId>,
    pub alternative: u32,
    pub description: String,
}

impl EdgeInfo {
    pub(crate) fn root() -> EdgeInfo {
        EdgeInfo {
            parent: None,
            alternative: 0,
            description: String::new(),
        }
    }

    pub(crate) fn new(parent: NodeId, choice: &Choice, alternative: u32) -> EdgeInfo {
        EdgeInfo {
            parent: Some(parent),
            alternative,
            description: choice.alternative(alternative).to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A node with the given number of alternatives.
    Branch(u32),
    Solved,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// The event stream as collected by a [`TraceRecorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    Round(usize),
    Node(EdgeInfo, NodeInfo),
    Skip(EdgeInfo),
    Done,
}

/// A tracer which keeps every event in memory.
///
/// # Example
/// ```rust
/// # use std::sync::Arc;
/// # use gourd_core::Space;
/// # use gourd_core::search;
/// # use gourd_core::search::SearchOptions;
/// # use gourd_core::search::tracer::TraceRecorder;
/// # use gourd_core::search::tracer::TraceEvent;
/// let mut space = Space::default();
/// let recorder = Arc::new(TraceRecorder::default());
///
/// let options = SearchOptions::default().with_tracer(Arc::clone(&recorder));
/// let mut engine = search::dfs(&mut space, options).unwrap();
/// while engine.next().is_some() {}
/// drop(engine);
///
/// assert_eq!(recorder.nodes().len(), 1);
/// assert_eq!(recorder.events().last(), Some(&TraceEvent::Done));
/// ```
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Mutex<Vec<TraceEvent>>,
}

impl TraceRecorder {
    fn record(&self, event: TraceEvent) {
        // A poisoned recorder only loses events.
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// The explored nodes in the order they were reported.
    pub fn nodes(&self) -> Vec<(EdgeInfo, NodeInfo)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TraceEvent::Node(edge, node) => Some((edge, node)),
                _ => None,
            })
            .collect()
    }
}

impl SearchTracer for TraceRecorder {
    fn round(&self, worker: usize) {
        self.record(TraceEvent::Round(worker));
    }

    fn node(&self, edge: &EdgeInfo, node: &NodeInfo) {
        self.record(TraceEvent::Node(edge.clone(), *node));
    }

    fn skip(&self, edge: &EdgeInfo) {
        self.record(TraceEvent::Skip(edge.clone()));
    }

    fn done(&self) {
        self.record(TraceEvent::Done);
    }
}

/// The tracing state of a single worker: the optional tracer and the node counter.
#[derive(Debug, Clone)]
pub(crate) struct Tracing {
    tracer: Option<Arc<dyn SearchTracer>>,
    worker: usize,
    next_index: u64,
}

impl Tracing {
    pub(crate) fn new(tracer: Option<Arc<dyn SearchTracer>>, worker: usize) -> Tracing {
        Tracing {
            tracer,
            worker,
            next_index: 0,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.tracer.is_some()
    }

    pub(crate) fn next_node_id(&mut self) -> NodeId {
        let id = NodeId {
            worker: self.worker,
            index: self.next_index,
        };
        self.next_index += 1;
        id
    }

    pub(crate) fn round(&self) {
        if let Some(tracer) = &self.tracer {
            tracer.round(self.worker);
        }
    }

    pub(crate) fn node(&self, edge: &EdgeInfo, id: NodeId, kind: NodeKind) {
        if let Some(tracer) = &self.tracer {
            tracer.node(edge, &NodeInfo { id, kind });
        }
    }

    pub(crate) fn skip(&self, edge: &EdgeInfo) {
        if let Some(tracer) = &self.tracer {
            tracer.skip(edge);
        }
    }

    pub(crate) fn done(&self) {
        if let Some(tracer) = &self.tracer {
            tracer.done();
        }
    }
}
