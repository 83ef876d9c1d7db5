//! `eh-graph` — the road-network store queried by the horizon engine.
//!
//! A directed multigraph over arena-allocated nodes and edges with integer
//! ids: parallel edges between the same ordered node pair are distinguished
//! by a per-pair `key`, every edge carries its precomputed geodesic length
//! and highway class, and an R-tree over edge segments answers
//! nearest-edge queries.
//!
//! The graph is built once (from an OSM PBF extract with the `osm` feature,
//! or through [`RoadGraphBuilder`] directly) and treated as read-only
//! afterwards, so it can be shared freely across horizon workers.

pub mod error;
pub mod graph;
#[cfg(feature = "osm")]
pub mod osm;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GraphError, GraphResult};
pub use graph::{RoadEdge, RoadGraph, RoadGraphBuilder, RoadNode};
#[cfg(feature = "osm")]
pub use osm::{HighwayFilter, load_from_pbf};
