//! Blocking HTTP client for the routing, elevation, and tile services.
//!
//! URLs are built by string formatting against the configured bases and the
//! responses parsed into owned values through `serde` structs; transport
//! and status failures are folded into [`ProviderError::Http`].  The caller
//! never retries — a failed call is surfaced as-is.

use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use eh_core::{TileCoord, Waypoint};

use crate::cache::TileCache;
use crate::config::ClientConfig;
use crate::error::{CacheError, ProviderError, ProviderResult};

// ── MapClient ─────────────────────────────────────────────────────────────────

/// One client for all provider operations, sharing an agent (timeout +
/// `User-Agent`) and the disk tile cache.
pub struct MapClient {
    agent: Agent,
    config: ClientConfig,
    cache: TileCache,
}

impl MapClient {
    /// Build a client from `config`, opening (and creating if necessary)
    /// the tile cache directory.
    pub fn new(config: ClientConfig) -> Result<Self, CacheError> {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_s)))
            .user_agent(config.user_agent.clone())
            .build()
            .new_agent();
        let cache = TileCache::open(&config.cache_root)?;
        Ok(Self { agent, config, cache })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    // ── Routing ───────────────────────────────────────────────────────────

    /// Drivable polyline from `start` to `end` via OSRM.
    ///
    /// Vertices come back in (lon, lat) order on the wire and are swapped
    /// into `Waypoint`s here; no elevation is attached at this stage.
    pub fn route(&self, start: &Waypoint, end: &Waypoint) -> ProviderResult<Vec<Waypoint>> {
        let url = route_url(&self.config.osrm_url, start, end);
        let body = self
            .agent
            .get(&url)
            .call()
            .map_err(http_err)?
            .into_body()
            .read_to_string()
            .map_err(http_err)?;
        parse_route_response(&body)
    }

    // ── Elevation ─────────────────────────────────────────────────────────

    /// Batched elevations aligned 1:1 with `points`.  `None` entries mark
    /// positions for which the dataset has no value.
    pub fn elevations(&self, points: &[Waypoint]) -> ProviderResult<Vec<Option<f64>>> {
        let locations = points
            .iter()
            .map(|wp| format!("{},{}", wp.lat, wp.lon))
            .collect::<Vec<_>>()
            .join("|");

        let body = self
            .agent
            .post(&self.config.elevation_url)
            .send_json(serde_json::json!({ "locations": locations }))
            .map_err(http_err)?
            .into_body()
            .read_to_string()
            .map_err(http_err)?;
        parse_elevation_response(&body, points.len())
    }

    // ── Tiles ─────────────────────────────────────────────────────────────

    /// Raw PNG bytes for `coord`, read through the cache.
    pub fn tile_bytes(&self, coord: TileCoord) -> ProviderResult<Vec<u8>> {
        self.cache.get_or_fetch(coord, || {
            let url = format!(
                "{}/{}/{}/{}.png",
                self.config.tile_url, coord.zoom, coord.x, coord.y
            );
            self.agent
                .get(&url)
                .call()
                .map_err(http_err)?
                .into_body()
                .read_to_vec()
                .map_err(http_err)
        })
    }

    /// Decoded RGB raster for `coord`, read through the cache.
    pub fn tile(&self, coord: TileCoord) -> ProviderResult<image::RgbImage> {
        let bytes = self.tile_bytes(coord)?;
        Ok(image::load_from_memory(&bytes)?.to_rgb8())
    }
}

fn http_err(e: ureq::Error) -> ProviderError {
    ProviderError::Http(e.to_string())
}

// ── URL construction & response parsing ───────────────────────────────────────

pub(crate) fn route_url(base: &str, start: &Waypoint, end: &Waypoint) -> String {
    format!(
        "{base}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
        start.lon, start.lat, end.lon, end.lat
    )
}

#[derive(Deserialize)]
struct OsrmResponse {
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

pub(crate) fn parse_route_response(body: &str) -> ProviderResult<Vec<Waypoint>> {
    let resp: OsrmResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let route = resp.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;

    if route.geometry.coordinates.is_empty() {
        return Err(ProviderError::Malformed("route geometry has no vertices".into()));
    }

    Ok(route
        .geometry
        .coordinates
        .iter()
        .map(|&[lon, lat]| Waypoint::new(lat, lon))
        .collect())
}

#[derive(Deserialize)]
struct ElevationResponse {
    status: String,
    results: Vec<ElevationResult>,
}

#[derive(Deserialize)]
struct ElevationResult {
    elevation: Option<f64>,
}

pub(crate) fn parse_elevation_response(
    body: &str,
    expected: usize,
) -> ProviderResult<Vec<Option<f64>>> {
    let resp: ElevationResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    if resp.status != "OK" {
        return Err(ProviderError::Malformed(format!(
            "elevation service status {}",
            resp.status
        )));
    }
    if resp.results.len() != expected {
        return Err(ProviderError::Malformed(format!(
            "expected {expected} elevations, got {}",
            resp.results.len()
        )));
    }

    Ok(resp.results.into_iter().map(|r| r.elevation).collect())
}
