//! The pose-local subgraph produced by horizon expansion.

use std::collections::HashSet;

use eh_core::{EdgeId, NodeId, Waypoint};
use eh_graph::RoadGraph;

/// Which way an ego-graph node was reached from the ego pose.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One node of an [`EgoGraph`] with its expansion bookkeeping.
#[derive(Copy, Clone, Debug)]
pub struct EgoNode {
    pub id: NodeId,
    /// Accumulated distance from the ego pose along the expansion tree.
    pub distance_m: f64,
    pub direction: Direction,
    /// Edge by which this node was discovered; `None` for the two
    /// endpoints of the ego edge.
    pub via_edge: Option<EdgeId>,
}

/// A bounded subgraph of the road network around one pose.
///
/// Nodes and edges are id references into the source [`RoadGraph`] — the
/// two graphs share one id universe.  The marked items are the `ego_edge`
/// (the edge carrying the vehicle) and the `ego_pose` (the vehicle's
/// position projected onto that edge).
#[derive(Clone, Debug)]
pub struct EgoGraph {
    ego_edge: EdgeId,
    ego_pose: Waypoint,
    nodes: Vec<EgoNode>,
    edges: Vec<EdgeId>,
    members: HashSet<NodeId>,
}

impl EgoGraph {
    pub(crate) fn new(ego_edge: EdgeId, ego_pose: Waypoint) -> Self {
        Self {
            ego_edge,
            ego_pose,
            nodes: Vec::new(),
            edges: vec![ego_edge],
            members: HashSet::new(),
        }
    }

    pub(crate) fn insert_node(&mut self, node: EgoNode) {
        if self.members.insert(node.id) {
            self.nodes.push(node);
        }
    }

    pub(crate) fn insert_edge(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }

    // ── Marked items ──────────────────────────────────────────────────────

    /// The road-graph edge currently carrying the vehicle.
    pub fn ego_edge(&self) -> EdgeId {
        self.ego_edge
    }

    /// The vehicle's position projected onto [`ego_edge`](Self::ego_edge);
    /// always lies on the segment between the edge's endpoints.
    pub fn ego_pose(&self) -> Waypoint {
        self.ego_pose
    }

    // ── Contents ──────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[EgoNode] {
        &self.nodes
    }

    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Expansion bookkeeping for `id`, if present.
    pub fn node(&self, id: NodeId) -> Option<&EgoNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Endpoint pairs of every edge, resolved against the source graph.
    /// This is the shape collaborators draw (one polyline per edge).
    pub fn segments(&self, graph: &RoadGraph) -> Vec<(Waypoint, Waypoint)> {
        self.edges
            .iter()
            .map(|&e| {
                let edge = graph.edge(e);
                (
                    graph.node(edge.from).position(),
                    graph.node(edge.to).position(),
                )
            })
            .collect()
    }
}
