//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Nodes and edges live in arenas indexed by `NodeId`/`EdgeId`.  Edges are
//! sorted by source node, so a node's outgoing edges occupy the contiguous
//! id range:
//!
//! ```text
//! out_start[n] .. out_start[n+1]
//! ```
//!
//! Incoming adjacency is a second CSR (`in_start` + `in_edges`) built over
//! the same edge ids, giving the horizon engine its predecessor iteration
//! without a reverse copy of the graph.
//!
//! Parallel edges between the same ordered node pair are legal (OSM has
//! them) and are distinguished by a per-pair `key` assigned at build time.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) stores one segment entry per directed edge and
//! answers nearest-edge queries with a point-to-segment metric in (lat,
//! lon) space.  The degree-space metric under-weights longitude away from
//! the equator by cos(lat); for nearest-of-several-candidates at road
//! scale the ranking is unaffected, and the returned distance is
//! re-measured on the sphere.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use eh_core::{EdgeId, NodeId, Waypoint, project_onto_segment};

// ── Arena element types ───────────────────────────────────────────────────────

/// A road-graph vertex.
#[derive(Clone, Debug)]
pub struct RoadNode {
    /// Upstream OSM node id, kept for traceability to the source extract.
    pub osm_id: i64,
    pub lat: f64,
    pub lon: f64,
}

impl RoadNode {
    #[inline]
    pub fn position(&self) -> Waypoint {
        Waypoint::new(self.lat, self.lon)
    }
}

/// A directed road-graph edge `(from, to, key)` with its attributes.
#[derive(Clone, Debug)]
pub struct RoadEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Distinguishes parallel edges between the same ordered node pair;
    /// 0 for the first edge of a pair, counting up in insertion order.
    pub key: u32,
    /// Geodesic length between the endpoint nodes.  Always > 0.
    pub length_m: f64,
    /// OSM highway class (`motorway`, `motorway_link`, …).
    pub highway: String,
}

// ── R-tree segment entry ──────────────────────────────────────────────────────

/// Entry stored in the spatial index: one edge's segment in `[lat, lon]`
/// space with the associated `EdgeId`.
#[derive(Clone)]
struct EdgeEntry {
    a: [f64; 2],
    b: [f64; 2],
    id: EdgeId,
}

impl RTreeObject for EdgeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.a, self.b)
    }
}

impl PointDistance for EdgeEntry {
    /// Squared point-to-segment distance in lat/lon space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let ab = (self.b[0] - self.a[0], self.b[1] - self.a[1]);
        let ap = (point[0] - self.a[0], point[1] - self.a[1]);

        let denom = ab.0 * ab.0 + ab.1 * ab.1;
        let t = if denom == 0.0 {
            0.0
        } else {
            ((ap.0 * ab.0 + ap.1 * ab.1) / denom).clamp(0.0, 1.0)
        };

        let d = (
            point[0] - (self.a[0] + ab.0 * t),
            point[1] - (self.a[1] + ab.1 * t),
        );
        d.0 * d.0 + d.1 * d.1
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road multigraph with CSR adjacency in both directions plus a
/// nearest-edge spatial index.
///
/// Do not construct directly; use [`RoadGraphBuilder`] or the OSM loader.
/// Read-only after construction.
pub struct RoadGraph {
    nodes: Vec<RoadNode>,
    edges: Vec<RoadEdge>,

    /// CSR row pointer for outgoing edges; length = `node_count + 1`.
    /// Edges are id-sorted by source, so the range itself is the id list.
    out_start: Vec<u32>,

    /// CSR row pointer + edge-id list for incoming edges.
    in_start: Vec<u32>,
    in_edges: Vec<EdgeId>,

    spatial_idx: RTree<EdgeEntry>,
}

impl RoadGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    // ── Element access ────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &RoadNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &RoadEdge {
        &self.edges[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &RoadNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &RoadEdge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i as u32), e))
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Ids of all outgoing edges of `node` — a contiguous range, no heap
    /// allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.out_start[node.index()] as usize;
        let end = self.out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Ids of all incoming edges of `node`.
    #[inline]
    pub fn in_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.in_start[node.index()] as usize;
        let end = self.in_start[node.index() + 1] as usize;
        self.in_edges[start..end].iter().copied()
    }

    /// Successor node ids of `node` (one entry per outgoing edge).
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edges[e.index()].to)
    }

    /// Predecessor node ids of `node` (one entry per incoming edge).
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_edges(node).map(|e| self.edges[e.index()].from)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        (self.out_start[node.index() + 1] - self.out_start[node.index()]) as usize
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        (self.in_start[node.index() + 1] - self.in_start[node.index()]) as usize
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The edge geometrically closest to `(lat, lon)` and its perpendicular
    /// distance in metres.
    ///
    /// Returns `None` only when the graph has no edges.  Equidistant
    /// candidates resolve to whichever entry the index visits first —
    /// stable for a given graph, but callers must not rely on the choice.
    pub fn nearest_edge(&self, lat: f64, lon: f64) -> Option<(EdgeId, f64)> {
        let entry = self.spatial_idx.nearest_neighbor(&[lat, lon])?;
        let edge = self.edge(entry.id);

        let pose = Waypoint::new(lat, lon);
        let foot = project_onto_segment(
            self.node(edge.from).position(),
            self.node(edge.to).position(),
            pose,
        );
        Some((entry.id, pose.great_circle_m(foot)))
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// sorts edges by (source, target), assigns per-pair keys, constructs both
/// CSR adjacencies, and bulk-loads the R-tree.
///
/// Edge lengths are computed geodesically from the endpoint positions at
/// insertion; an edge between coincident nodes would get length 0 and is
/// dropped (the count is available via
/// [`dropped_edges`](Self::dropped_edges)).
pub struct RoadGraphBuilder {
    nodes: Vec<RoadNode>,
    raw_edges: Vec<RawEdge>,
    dropped: usize,
}

struct RawEdge {
    from: NodeId,
    to: NodeId,
    length_m: f64,
    highway: String,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new(), dropped: 0 }
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading from OSM.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            dropped: 0,
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, osm_id: i64, lat: f64, lon: f64) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RoadNode { osm_id, lat, lon });
        id
    }

    /// Add a directed edge from `from` to `to` carrying `highway` as its
    /// road class.  Length is the geodesic distance between the endpoints;
    /// zero-length edges are dropped.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, highway: impl Into<String>) {
        let length_m = self.nodes[from.index()]
            .position()
            .geodesic_m(self.nodes[to.index()].position());
        if length_m <= 0.0 {
            self.dropped += 1;
            return;
        }
        self.raw_edges.push(RawEdge { from, to, length_m, highway: highway.into() });
    }

    /// Convenience: add edges in both directions for a two-way road.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, highway: &str) {
        self.add_edge(a, b, highway);
        self.add_edge(b, a, highway);
    }

    /// Position of a node added earlier.
    pub fn node_position(&self, id: NodeId) -> Waypoint {
        self.nodes[id.index()].position()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Number of zero-length edges discarded so far.
    pub fn dropped_edges(&self) -> usize {
        self.dropped
    }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(E log E) for the
    /// R-tree bulk load.
    pub fn build(self) -> RoadGraph {
        let node_count = self.nodes.len();

        // Sort by (source, target); stable so parallel edges keep their
        // insertion order for key assignment.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| (e.from.0, e.to.0));

        // Assign per-pair keys and materialize the arena.
        let mut edges: Vec<RoadEdge> = Vec::with_capacity(raw.len());
        for e in raw {
            let key = match edges.last() {
                Some(prev) if prev.from == e.from && prev.to == e.to => prev.key + 1,
                _ => 0,
            };
            edges.push(RoadEdge {
                from: e.from,
                to: e.to,
                key,
                length_m: e.length_m,
                highway: e.highway,
            });
        }

        // Outgoing CSR row pointer.
        let mut out_start = vec![0u32; node_count + 1];
        for e in &edges {
            out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            out_start[i] += out_start[i - 1];
        }

        // Incoming CSR: counts, prefix sum, then fill in edge-id order.
        let mut in_start = vec![0u32; node_count + 1];
        for e in &edges {
            in_start[e.to.index() + 1] += 1;
        }
        for i in 1..=node_count {
            in_start[i] += in_start[i - 1];
        }
        let mut in_edges = vec![EdgeId::INVALID; edges.len()];
        let mut cursor = in_start.clone();
        for (i, e) in edges.iter().enumerate() {
            let slot = cursor[e.to.index()] as usize;
            in_edges[slot] = EdgeId(i as u32);
            cursor[e.to.index()] += 1;
        }

        // Bulk-load the segment R-tree.
        let entries: Vec<EdgeEntry> = edges
            .iter()
            .enumerate()
            .map(|(i, e)| EdgeEntry {
                a: [self.nodes[e.from.index()].lat, self.nodes[e.from.index()].lon],
                b: [self.nodes[e.to.index()].lat, self.nodes[e.to.index()].lon],
                id: EdgeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadGraph {
            nodes: self.nodes,
            edges,
            out_start,
            in_start,
            in_edges,
            spatial_idx,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
