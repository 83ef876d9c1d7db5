//! Provider client configuration.

use std::path::PathBuf;

/// Endpoints and resource settings for [`MapClient`](crate::MapClient).
///
/// The defaults target the public OSRM demo router, the OpenTopoData
/// ASTER 30 m dataset, and the standard OSM raster tile server.  Endpoint
/// URLs are configured once at construction and never mutated.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the OSRM routing service.
    pub osrm_url: String,
    /// Full URL of the OpenTopoData dataset endpoint (batched POST).
    pub elevation_url: String,
    /// Base URL of the slippy-tile server; `/{z}/{x}/{y}.png` is appended.
    pub tile_url: String,
    /// Root directory of the on-disk tile cache.  Created on first use,
    /// persists across runs, never evicted.
    pub cache_root: PathBuf,
    /// `User-Agent` sent with every request (tile servers require one).
    pub user_agent: String,
    /// Per-request timeout in seconds.  A timed-out call fails and is not
    /// retried.
    pub timeout_s: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            osrm_url: "http://router.project-osrm.org".to_string(),
            elevation_url: "https://api.opentopodata.org/v1/aster30m".to_string(),
            tile_url: "https://a.tile.openstreetmap.org".to_string(),
            cache_root: PathBuf::from("osm_tiles"),
            user_agent: concat!("rust_eh/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_s: 30,
        }
    }
}
