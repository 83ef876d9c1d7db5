//! Backend traits — the seam between provider I/O and the pipeline crates.
//!
//! The route builder and mosaic assembler call providers through these
//! traits, so tests drive them with canned fixtures and production code
//! plugs in [`MapClient`].

use eh_core::{TileCoord, Waypoint};
use image::RgbImage;

use crate::client::MapClient;
use crate::error::ProviderResult;

/// Source of drivable polylines between two waypoints.
pub trait RoutingBackend {
    /// Ordered vertices of a drivable path from `start` to `end`.
    fn route(&self, start: &Waypoint, end: &Waypoint) -> ProviderResult<Vec<Waypoint>>;
}

/// Source of altitudes, batched and aligned 1:1 with the input vertices.
pub trait ElevationBackend {
    fn elevations(&self, points: &[Waypoint]) -> ProviderResult<Vec<Option<f64>>>;
}

/// Source of decoded 256×256 raster tiles.
pub trait TileBackend {
    fn tile(&self, coord: TileCoord) -> ProviderResult<RgbImage>;
}

impl RoutingBackend for MapClient {
    fn route(&self, start: &Waypoint, end: &Waypoint) -> ProviderResult<Vec<Waypoint>> {
        MapClient::route(self, start, end)
    }
}

impl ElevationBackend for MapClient {
    fn elevations(&self, points: &[Waypoint]) -> ProviderResult<Vec<Option<f64>>> {
        MapClient::elevations(self, points)
    }
}

impl TileBackend for MapClient {
    fn tile(&self, coord: TileCoord) -> ProviderResult<RgbImage> {
        MapClient::tile(self, coord)
    }
}
