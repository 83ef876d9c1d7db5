//! Geodetic coordinate types and spatial utilities.
//!
//! `Waypoint` uses `f64` latitude/longitude: interpolated positions are
//! preserved to 7 decimal places (≈ 1 cm), which single precision cannot
//! represent at highway scale.
//!
//! Two distance metrics are exposed.  [`Waypoint::geodesic_m`] solves the
//! inverse problem on the WGS-84 ellipsoid (sub-millimetre, used wherever
//! arc length feeds back into sample spacing).  [`Waypoint::great_circle_m`]
//! is the spherical approximation, adequate for the horizon engine's
//! sub-kilometre hops.

// `::geo` — the ecosystem crate; this module shadows the name.
use ::geo::{Distance, Geodesic, Haversine, Point};

use crate::error::{CoreError, CoreResult};

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geodetic position with optional altitude in metres.
///
/// Equality is value-based; instances are immutable once constructed apart
/// from altitude attachment during route building.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: Option<f64>,
}

impl Waypoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, alt: None }
    }

    #[inline]
    pub fn with_alt(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt: Some(alt) }
    }

    /// The `geo` point representation, `(x, y) = (lon, lat)`.
    #[inline]
    fn point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Distance in metres on the WGS-84 ellipsoid (Karney's algorithm).
    pub fn geodesic_m(self, other: Waypoint) -> f64 {
        Geodesic.distance(self.point(), other.point())
    }

    /// Great-circle distance in metres on the mean-radius sphere.
    ///
    /// Differs from [`geodesic_m`](Self::geodesic_m) by up to ~0.5 %;
    /// used for the horizon engine's node-distance estimates.
    pub fn great_circle_m(self, other: Waypoint) -> f64 {
        Haversine.distance(self.point(), other.point())
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    ///
    /// Latitude/longitude are rounded to 7 decimal places (≈ 1 cm), altitude
    /// to 2.  Altitude is interpolated only when both endpoints carry one.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidParameter`] if `t` is outside `[0, 1]` or not
    /// finite.
    pub fn interpolate(self, other: Waypoint, t: f64) -> CoreResult<Waypoint> {
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(CoreError::InvalidParameter { name: "t", value: t });
        }
        Ok(self.lerp(other, t))
    }

    /// Like [`interpolate`](Self::interpolate), but `t` is clamped to
    /// `[0, 1]` instead of validated.  For callers whose parameter is
    /// in range by construction up to floating-point rounding (the drive
    /// resampler's arc-length arithmetic).
    pub fn lerp(self, other: Waypoint, t: f64) -> Waypoint {
        let t = t.clamp(0.0, 1.0);
        let lat = round_to(self.lat + (other.lat - self.lat) * t, 1e7);
        let lon = round_to(self.lon + (other.lon - self.lon) * t, 1e7);
        let alt = match (self.alt, other.alt) {
            (Some(a), Some(b)) => Some(round_to(a + (b - a) * t, 1e2)),
            _ => None,
        };
        Waypoint { lat, lon, alt }
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lon)
    }
}

#[inline]
fn round_to(v: f64, scale: f64) -> f64 {
    (v * scale).round() / scale
}

// ── Point-to-segment projection ───────────────────────────────────────────────

/// The point on segment `a`–`b` closest to `p`, computed as a flat 2-D
/// projection in (lat, lon) space with the scalar parameter clamped to
/// `[0, 1]`.
///
/// Adequate for segments well under a kilometre (typical road-graph edge
/// length); a degenerate segment projects to `a`.  The result carries no
/// altitude.
pub fn project_onto_segment(a: Waypoint, b: Waypoint, p: Waypoint) -> Waypoint {
    let ab = (b.lat - a.lat, b.lon - a.lon);
    let ap = (p.lat - a.lat, p.lon - a.lon);

    let denom = ab.0 * ab.0 + ab.1 * ab.1;
    if denom == 0.0 {
        return Waypoint::new(a.lat, a.lon);
    }

    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / denom).clamp(0.0, 1.0);
    Waypoint::new(a.lat + ab.0 * t, a.lon + ab.1 * t)
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// An inclusive geodetic rectangle.  Invariant: `min ≤ max` on both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The smallest box containing every waypoint in `waypoints`.
    ///
    /// # Errors
    ///
    /// [`CoreError::NoWaypoints`] on an empty slice.
    pub fn from_waypoints(waypoints: &[Waypoint]) -> CoreResult<Self> {
        let first = waypoints.first().ok_or(CoreError::NoWaypoints)?;
        let mut bb = BoundingBox {
            min_lat: first.lat,
            min_lon: first.lon,
            max_lat: first.lat,
            max_lon: first.lon,
        };
        for wp in &waypoints[1..] {
            bb.min_lat = bb.min_lat.min(wp.lat);
            bb.min_lon = bb.min_lon.min(wp.lon);
            bb.max_lat = bb.max_lat.max(wp.lat);
            bb.max_lon = bb.max_lon.max(wp.lon);
        }
        Ok(bb)
    }

    // ── Corners ───────────────────────────────────────────────────────────

    pub fn top_left(&self) -> Waypoint {
        Waypoint::new(self.max_lat, self.min_lon)
    }

    pub fn top_right(&self) -> Waypoint {
        Waypoint::new(self.max_lat, self.max_lon)
    }

    pub fn bottom_left(&self) -> Waypoint {
        Waypoint::new(self.min_lat, self.min_lon)
    }

    pub fn bottom_right(&self) -> Waypoint {
        Waypoint::new(self.min_lat, self.max_lon)
    }

    // ── Extents ───────────────────────────────────────────────────────────

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// `true` if `(lat, lon)` lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat)
            && (self.min_lon..=self.max_lon).contains(&lon)
    }

    /// The box grown by `deg` degrees on every side.  Used when scoping a
    /// road graph so edges just outside the drive's extent stay reachable.
    pub fn padded(&self, deg: f64) -> BoundingBox {
        BoundingBox {
            min_lat: self.min_lat - deg,
            min_lon: self.min_lon - deg,
            max_lat: self.max_lat + deg,
            max_lon: self.max_lon + deg,
        }
    }
}
