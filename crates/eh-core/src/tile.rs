//! Slippy-map tile coordinates and conversions.
//!
//! The standard Web-Mercator formulas from the OSM wiki, and the zoom
//! auto-selection rule used when a caller supplies only a bounding box.
//! These are the only projection used for tile math anywhere in the
//! toolkit.

use crate::error::{CoreError, CoreResult};
use crate::geo::{BoundingBox, Waypoint};

/// Tiles are square rasters of this many pixels per side.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level served by the standard OSM raster pyramid.
pub const MAX_ZOOM: u8 = 19;

/// A slippy-map tile index: `0 ≤ x, y < 2^zoom`, `zoom ≤ 19`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// The tile containing `(lat, lon)` at `zoom`.
    ///
    /// Indices are floored and clamped into `[0, 2^zoom)` so the antimeridian
    /// and pole edges map onto the last tile instead of one past it.
    pub fn from_deg(lat: f64, lon: f64, zoom: u8) -> TileCoord {
        let n = (1u32 << zoom) as f64;
        let lat_rad = lat.to_radians();

        let x = (lon + 180.0) / 360.0 * n;
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n;

        let max = (1u32 << zoom) - 1;
        TileCoord {
            zoom,
            x: (floor_snapped(x).max(0.0) as u32).min(max),
            y: (floor_snapped(y).max(0.0) as u32).min(max),
        }
    }

    /// The NW (top-left) corner of this tile.
    pub fn nw_corner(self) -> Waypoint {
        corner_deg(self.zoom, self.x as f64, self.y as f64)
    }

    /// The SE (bottom-right) corner of this tile — the NW corner of the
    /// diagonal neighbor, without requiring that neighbor to be a valid
    /// tile index at the antimeridian/pole edge.
    pub fn se_corner(self) -> Waypoint {
        corner_deg(self.zoom, self.x as f64 + 1.0, self.y as f64 + 1.0)
    }

    /// File name under which this tile is cached: `{zoom}_{x}_{y}.png`.
    pub fn cache_file_name(self) -> String {
        format!("{}_{}_{}.png", self.zoom, self.x, self.y)
    }

    /// Fails with [`CoreError::InvalidParameter`] when `zoom` exceeds
    /// [`MAX_ZOOM`].
    pub fn validate_zoom(zoom: u8) -> CoreResult<u8> {
        if zoom > MAX_ZOOM {
            return Err(CoreError::InvalidParameter { name: "zoom", value: zoom as f64 });
        }
        Ok(zoom)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Geodetic position of the grid corner at fractional tile index `(x, y)`.
fn corner_deg(zoom: u8, x: f64, y: f64) -> Waypoint {
    let n = (1u32 << zoom) as f64;
    let lon = x / n * 360.0 - 180.0;
    let lat_rad = (std::f64::consts::PI * (1.0 - 2.0 * y / n)).sinh().atan();
    Waypoint::new(lat_rad.to_degrees(), lon)
}

/// Floor, except that values within 1e-6 of an integer snap to it: tile
/// corners computed through the inverse transcendental formulas must map
/// back onto their own tile index, not the one below.  (1e-6 of a tile is
/// sub-millimetre on the ground at every zoom level.)
#[inline]
fn floor_snapped(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < 1e-6 { r } else { v.floor() }
}

/// Zoom level whose tile width best matches the bounding box:
/// `clamp(ceil(log2(360 / max(Δlat, Δlon))) + 1, 0, 19)`.
///
/// A degenerate (zero-extent) box clamps to [`MAX_ZOOM`].
pub fn auto_zoom(bbox: &BoundingBox) -> u8 {
    let max_span = bbox.lat_span().max(bbox.lon_span());
    if max_span <= 0.0 {
        return MAX_ZOOM;
    }

    let zoom = (360.0 / max_span).log2().ceil() + 1.0;
    zoom.clamp(0.0, MAX_ZOOM as f64) as u8
}
