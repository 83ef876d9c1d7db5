//! `eh-horizon` — the electronic-horizon engine.
//!
//! For each vehicle pose: match the pose onto the nearest road-graph edge,
//! project it onto that edge, and expand successors/predecessors breadth-
//! first up to the forward/backward distance budgets.  The result is an
//! [`EgoGraph`] — the pose-local subgraph a driver-assistance function
//! sees, with the carrying edge and the on-edge pose marked.
//!
//! Expansion terminates because every step strictly increases the
//! accumulated distance by a positive edge length against a finite budget,
//! and a node already present is never re-added.
//!
//! A pose off the network (empty graph, or nearest edge beyond the snap
//! radius) fails with [`HorizonError::OffNetwork`] — fatal to that pose,
//! not to the stream.

pub mod ego;
pub mod engine;
pub mod error;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ego::{Direction, EgoGraph, EgoNode};
pub use engine::{HorizonConfig, HorizonEngine};
pub use error::{HorizonError, HorizonResult};
