//! Map matching and bounded breadth-first horizon expansion.

use std::collections::VecDeque;

use eh_core::{NodeId, Waypoint, project_onto_segment};
use eh_graph::RoadGraph;

use crate::ego::{Direction, EgoGraph, EgoNode};
use crate::error::{HorizonError, HorizonResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Distance budgets and map-matching tolerance for horizon expansion.
#[derive(Clone, Copy, Debug)]
pub struct HorizonConfig {
    /// How far ahead of the ego pose the horizon extends.  Default: 1000 m.
    pub forward_budget_m: f64,
    /// How far behind the ego pose the horizon extends.  Default: 250 m.
    pub backward_budget_m: f64,
    /// Poses farther than this from the nearest edge are off-network.
    /// Default: 250 m.
    pub snap_radius_m: f64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            forward_budget_m: 1000.0,
            backward_budget_m: 250.0,
            snap_radius_m: 250.0,
        }
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Computes per-pose [`EgoGraph`]s against one read-only road graph.
pub struct HorizonEngine<'g> {
    graph: &'g RoadGraph,
    config: HorizonConfig,
}

impl<'g> HorizonEngine<'g> {
    pub fn new(graph: &'g RoadGraph, config: HorizonConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &RoadGraph {
        self.graph
    }

    pub fn config(&self) -> &HorizonConfig {
        &self.config
    }

    /// The electronic horizon at one pose.
    ///
    /// 1. Map matching: nearest edge to the pose becomes the `ego_edge`;
    ///    the pose projected onto it becomes the `ego_pose`.
    /// 2. The ego edge's endpoints seed a FIFO queue with their distances
    ///    from the ego pose.
    /// 3. A node dequeued within its direction's budget expands: each
    ///    unseen neighbor (successor if forward, predecessor if backward)
    ///    joins the graph together with the traversed edge, at the
    ///    accumulated distance plus that edge's length.
    ///
    /// # Errors
    ///
    /// [`HorizonError::OffNetwork`] when the graph has no edges or the
    /// nearest edge is beyond the snap radius.
    pub fn horizon_at(&self, pose: Waypoint) -> HorizonResult<EgoGraph> {
        let (ego_edge, match_dist) = self
            .graph
            .nearest_edge(pose.lat, pose.lon)
            .ok_or(HorizonError::OffNetwork { lat: pose.lat, lon: pose.lon })?;
        if match_dist > self.config.snap_radius_m {
            return Err(HorizonError::OffNetwork { lat: pose.lat, lon: pose.lon });
        }

        let edge = self.graph.edge(ego_edge);
        let tail = edge.from;
        let head = edge.to;
        let tail_pos = self.graph.node(tail).position();
        let head_pos = self.graph.node(head).position();

        let ego_pose = project_onto_segment(tail_pos, head_pos, pose);
        let d_forward = ego_pose.great_circle_m(head_pos);
        let d_backward = ego_pose.great_circle_m(tail_pos);

        let mut ego = EgoGraph::new(ego_edge, ego_pose);
        ego.insert_node(EgoNode {
            id: tail,
            distance_m: d_backward,
            direction: Direction::Backward,
            via_edge: None,
        });
        ego.insert_node(EgoNode {
            id: head,
            distance_m: d_forward,
            direction: Direction::Forward,
            via_edge: None,
        });

        let mut queue: VecDeque<(NodeId, f64, Direction)> = VecDeque::new();
        queue.push_back((head, d_forward, Direction::Forward));
        queue.push_back((tail, d_backward, Direction::Backward));

        while let Some((node, dist, dir)) = queue.pop_front() {
            let budget = match dir {
                Direction::Forward => self.config.forward_budget_m,
                Direction::Backward => self.config.backward_budget_m,
            };
            if dist >= budget {
                continue;
            }

            match dir {
                Direction::Forward => {
                    for e in self.graph.out_edges(node) {
                        let neighbor = self.graph.edge(e).to;
                        if ego.contains_node(neighbor) {
                            continue;
                        }
                        let reached = dist + self.graph.edge(e).length_m;
                        ego.insert_node(EgoNode {
                            id: neighbor,
                            distance_m: reached,
                            direction: dir,
                            via_edge: Some(e),
                        });
                        ego.insert_edge(e);
                        queue.push_back((neighbor, reached, dir));
                    }
                }
                Direction::Backward => {
                    for e in self.graph.in_edges(node) {
                        let neighbor = self.graph.edge(e).from;
                        if ego.contains_node(neighbor) {
                            continue;
                        }
                        let reached = dist + self.graph.edge(e).length_m;
                        ego.insert_node(EgoNode {
                            id: neighbor,
                            distance_m: reached,
                            direction: dir,
                            via_edge: Some(e),
                        });
                        ego.insert_edge(e);
                        queue.push_back((neighbor, reached, dir));
                    }
                }
            }
        }

        Ok(ego)
    }

    /// Horizons for a pose sequence, in pose order.
    ///
    /// An off-network pose yields that element's `Err` and processing
    /// continues with the next pose.
    pub fn horizon_stream(&self, poses: &[Waypoint]) -> Vec<HorizonResult<EgoGraph>> {
        poses.iter().map(|&p| self.horizon_at(p)).collect()
    }

    /// Like [`horizon_stream`](Self::horizon_stream), computed across the
    /// Rayon pool.  The indexed collect keeps results in pose order.
    #[cfg(feature = "parallel")]
    pub fn horizon_stream_parallel(&self, poses: &[Waypoint]) -> Vec<HorizonResult<EgoGraph>> {
        use rayon::prelude::*;
        poses.par_iter().map(|&p| self.horizon_at(p)).collect()
    }
}
