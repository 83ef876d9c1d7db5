//! Stitches per-leg provider polylines into one continuous route.

use eh_core::Waypoint;
use eh_provider::{ElevationBackend, ProviderError, RoutingBackend};

use crate::error::{RouteError, RouteResult};
use crate::route::Route;

/// Composes provider calls into a [`Route`]: one routing request per
/// consecutive waypoint pair, one batched elevation request for the
/// concatenated polyline.
///
/// Concatenation drops the last vertex of every leg except the final one,
/// so the join vertex shared by consecutive legs appears exactly once.
/// A provider failure aborts the build — no partial route is returned.
pub struct RouteBuilder<'p, P> {
    provider: &'p P,
}

impl<'p, P> RouteBuilder<'p, P>
where
    P: RoutingBackend + ElevationBackend,
{
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Build the route through `waypoints` in order.
    ///
    /// # Errors
    ///
    /// [`RouteError::InsufficientWaypoints`] with fewer than two waypoints;
    /// [`RouteError::Provider`] when any leg or the elevation batch fails.
    pub fn build(&self, waypoints: &[Waypoint]) -> RouteResult<Route> {
        if waypoints.len() < 2 {
            return Err(RouteError::InsufficientWaypoints(waypoints.len()));
        }

        let last_leg = waypoints.len() - 2;
        let mut vertices: Vec<Waypoint> = Vec::new();

        for (i, pair) in waypoints.windows(2).enumerate() {
            let leg = self.provider.route(&pair[0], &pair[1])?;
            if leg.is_empty() {
                return Err(ProviderError::Malformed("provider returned an empty leg".into()).into());
            }
            if i == last_leg {
                vertices.extend(leg);
            } else {
                // Drop the join vertex; the next leg starts with it.
                let keep = leg.len() - 1;
                vertices.extend(leg.into_iter().take(keep));
            }
        }

        let mut route = Route::new(vertices)?;
        let altitudes = self.provider.elevations(route.vertices())?;
        route.attach_elevations(&altitudes);
        Ok(route)
    }
}
