//! `eh-core` — foundational types for the `rust_eh` electronic-horizon toolkit.
//!
//! This crate is a dependency of every other `eh-*` crate.  It intentionally
//! has no `eh-*` dependencies and minimal external ones (only `geo` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`                                        |
//! | [`geo`]   | `Waypoint`, `BoundingBox`, distance, interpolation,       |
//! |           | point-to-segment projection                               |
//! | [`tile`]  | `TileCoord`, slippy-map conversions, zoom auto-selection  |
//! | [`error`] | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |

pub mod error;
pub mod geo;
pub mod ids;
pub mod tile;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, Waypoint, project_onto_segment};
pub use ids::{EdgeId, NodeId};
pub use tile::{MAX_ZOOM, TILE_SIZE, TileCoord, auto_zoom};
