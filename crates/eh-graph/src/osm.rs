//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use eh_graph::osm::{HighwayFilter, load_from_pbf};
//!
//! let graph = load_from_pbf(Path::new("bay_area.osm.pbf"), None, &HighwayFilter::default())?;
//! ```
//!
//! # What is loaded
//!
//! Only ways whose `highway` tag is in the [`HighwayFilter`] are included
//! (default: `motorway` and `motorway_link`, the classes an electronic
//! horizon for highway driving cares about).  A one-way carriageway
//! contributes one directed edge per node pair, a two-way road one per
//! direction.  A bounding box restricts the graph to nodes inside it —
//! way segments with an endpoint outside the box are dropped.
//!
//! # Memory note
//!
//! A way's node refs are bare integer ids, so the first pass must hold
//! every node location in memory until the kept ways are resolved.  For a
//! metro-area extract that map is the peak allocation; it is released as
//! soon as the admitted nodes have been copied into the builder.

use std::collections::HashSet;
use std::path::Path;

use osmpbf::{Element, ElementReader, Way};
use rustc_hash::FxHashMap;

use eh_core::{BoundingBox, NodeId};

use crate::error::GraphError;
use crate::graph::{RoadGraph, RoadGraphBuilder};

// ── Highway class filter ──────────────────────────────────────────────────────

/// The set of `highway=<class>` values admitted into the graph.
#[derive(Clone, Debug)]
pub struct HighwayFilter {
    classes: HashSet<String>,
}

impl HighwayFilter {
    /// Admit exactly the given classes.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { classes: classes.into_iter().map(Into::into).collect() }
    }

    #[inline]
    pub fn allows(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl Default for HighwayFilter {
    /// Motorways and their link ramps.
    fn default() -> Self {
        Self::new(["motorway", "motorway_link"])
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load a road graph from an OSM PBF file, keeping only ways in `filter`
/// and (when given) nodes inside `bbox`.
///
/// # Errors
///
/// [`GraphError::Osm`] on parse errors, [`GraphError::Io`] on file errors.
pub fn load_from_pbf(
    path: &Path,
    bbox: Option<&BoundingBox>,
    filter: &HighwayFilter,
) -> Result<RoadGraph, GraphError> {
    // ── Pass 1: every node location, plus the ways that pass the filter ───
    let reader = ElementReader::from_path(path)?;

    let mut all_nodes: FxHashMap<i64, (f64, f64)> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), (n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), (n.lat(), n.lon()));
            }
            Element::Way(w) => {
                let highway = w.tags().find(|&(k, _)| k == "highway").map(|(_, v)| v);
                if let Some(class) = highway.filter(|c| filter.allows(c)) {
                    road_ways.push(OsmWay {
                        refs: w.refs().collect(),
                        class: class.to_string(),
                        oneway: way_is_oneway(&w, class),
                    });
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    // ── Pass 2: node ids the kept ways reference, restricted to the box ───
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .filter(|id| match (all_nodes.get(id), bbox) {
            (Some(&(lat, lon)), Some(bb)) => bb.contains(lat, lon),
            (Some(_), None) => true,
            (None, _) => false,
        })
        .collect();

    // ── Pass 3: admitted nodes first, then the edges between them ─────────
    let mut builder =
        RoadGraphBuilder::with_capacity(road_node_ids.len(), road_node_ids.len() * 2);

    let mut osm_to_id: FxHashMap<i64, NodeId> = FxHashMap::default();
    osm_to_id.reserve(road_node_ids.len());

    for osm_id in road_node_ids {
        if let Some(&(lat, lon)) = all_nodes.get(&osm_id) {
            let id = builder.add_node(osm_id, lat, lon);
            osm_to_id.insert(osm_id, id);
        }
    }

    // Every admitted location now lives in the builder; the full map was
    // the peak allocation and can go before the edge pass.
    drop(all_nodes);

    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            if let (Some(&from), Some(&to)) = (osm_to_id.get(&osm_a), osm_to_id.get(&osm_b)) {
                builder.add_edge(from, to, way.class.clone());
                if !way.oneway {
                    builder.add_edge(to, from, way.class.clone());
                }
            }
        }
    }

    Ok(builder.build())
}

// ── Way record ────────────────────────────────────────────────────────────────

struct OsmWay {
    refs: Vec<i64>,
    class: String,
    oneway: bool,
}

/// A way is directional when it carries an affirmative `oneway` tag, or
/// when its class is mapped as a single carriageway to begin with (OSM
/// draws each motorway direction as its own way).
fn way_is_oneway(way: &Way<'_>, class: &str) -> bool {
    if matches!(class, "motorway" | "motorway_link") {
        return true;
    }
    way.tags()
        .any(|(k, v)| k == "oneway" && matches!(v, "yes" | "true" | "1"))
}
