//! `eh-provider` — external map services behind one blocking client.
//!
//! Four operations, all idempotent at the level of observable state (the
//! tile cache):
//!
//! | Operation                    | Service                | Module     |
//! |------------------------------|------------------------|------------|
//! | route polyline between poses | OSRM HTTP API          | [`client`] |
//! | batched elevations           | OpenTopoData HTTP API  | [`client`] |
//! | raster tile fetch            | OSM slippy-tile server | [`client`] |
//! | disk-backed tile cache       | local filesystem       | [`cache`]  |
//!
//! The [`backend`] traits are the seam between this crate and the pipeline
//! crates: `eh-route` and `eh-raster` consume `RoutingBackend`,
//! `ElevationBackend`, and `TileBackend` so they can be driven by canned
//! fixtures in tests and by [`MapClient`] in production.
//!
//! The client carries no session state beyond the cache.  Calls are not
//! retried; any non-2xx or malformed response surfaces as
//! [`ProviderError`].

pub mod backend;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use backend::{ElevationBackend, RoutingBackend, TileBackend};
pub use cache::TileCache;
pub use client::MapClient;
pub use config::ClientConfig;
pub use error::{CacheError, ProviderError, ProviderResult};
