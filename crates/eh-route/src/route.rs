//! The stitched drive polyline.

use eh_core::{BoundingBox, CoreResult, Waypoint};

use crate::error::{RouteError, RouteResult};
use crate::resample::DriveSampler;
use crate::sample::DriveConfig;

/// An ordered sequence of at least two waypoints representing a drivable
/// path.  Built once per session by [`RouteBuilder`](crate::RouteBuilder)
/// and read-only afterwards; the builder guarantees no duplicated join
/// vertex between legs.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    vertices: Vec<Waypoint>,
}

impl Route {
    /// Wrap `vertices` as a route.
    ///
    /// # Errors
    ///
    /// [`RouteError::DegeneratePolyline`] with fewer than two vertices.
    pub fn new(vertices: Vec<Waypoint>) -> RouteResult<Self> {
        if vertices.len() < 2 {
            return Err(RouteError::DegeneratePolyline(vertices.len()));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Waypoint] {
        &self.vertices
    }

    /// Number of vertices (always ≥ 2).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Iterator over consecutive vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Waypoint, Waypoint)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total geodesic arc length in metres.
    pub fn total_length_m(&self) -> f64 {
        self.segments().map(|(a, b)| a.geodesic_m(b)).sum()
    }

    /// Smallest geodetic rectangle containing every vertex.
    pub fn bounding_box(&self) -> CoreResult<BoundingBox> {
        BoundingBox::from_waypoints(&self.vertices)
    }

    /// Attach per-vertex altitudes, aligned 1:1 with the vertex order.
    /// `None` entries leave the vertex without altitude.
    pub(crate) fn attach_elevations(&mut self, altitudes: &[Option<f64>]) {
        for (vertex, alt) in self.vertices.iter_mut().zip(altitudes) {
            vertex.alt = *alt;
        }
    }

    /// Lazy virtual drive over this route.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidParameter`] when the config's speed or
    /// frequency is non-positive or not finite.
    pub fn resample(&self, config: &DriveConfig) -> RouteResult<DriveSampler<'_>> {
        DriveSampler::new(self, config)
    }

    pub fn into_vertices(self) -> Vec<Waypoint> {
        self.vertices
    }
}
