//! Unit tests for eh-provider.
//!
//! All tests run against the filesystem and canned response bodies — no
//! network access.

// ── Tile cache ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::cell::Cell;

    use eh_core::TileCoord;

    use crate::error::ProviderError;
    use crate::TileCache;

    const COORD: TileCoord = TileCoord { zoom: 12, x: 654, y: 1583 };

    #[test]
    fn store_then_load_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TileCache::open(dir.path()).unwrap();

        assert!(!cache.contains(COORD));
        cache.store(COORD, b"png-bytes").unwrap();
        assert!(cache.contains(COORD));
        assert_eq!(cache.load(COORD).unwrap().unwrap(), b"png-bytes");
    }

    #[test]
    fn entry_uses_flat_key_naming() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TileCache::open(dir.path()).unwrap();
        assert_eq!(
            cache.path_for(COORD),
            dir.path().join("12_654_1583.png")
        );
    }

    #[test]
    fn load_missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TileCache::open(dir.path()).unwrap();
        assert!(cache.load(COORD).unwrap().is_none());
    }

    #[test]
    fn get_or_fetch_populates_once() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TileCache::open(dir.path()).unwrap();

        let calls = Cell::new(0u32);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok(b"tile".to_vec())
        };

        let first = cache.get_or_fetch(COORD, fetch).unwrap();
        let second = cache
            .get_or_fetch(COORD, || panic!("second read must hit the cache"))
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn failed_fetch_leaves_no_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TileCache::open(dir.path()).unwrap();

        let result = cache.get_or_fetch(COORD, || {
            Err(ProviderError::Http("503 service unavailable".into()))
        });
        assert!(result.is_err());
        assert!(!cache.contains(COORD));
    }

    #[test]
    fn store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TileCache::open(dir.path()).unwrap();
        cache.store(COORD, b"x").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["12_654_1583.png"]);
    }

    #[test]
    fn reopening_cache_sees_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = TileCache::open(dir.path()).unwrap();
            cache.store(COORD, b"persisted").unwrap();
        }
        let cache = TileCache::open(dir.path()).unwrap();
        assert_eq!(cache.load(COORD).unwrap().unwrap(), b"persisted");
    }
}

// ── Response parsing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod parsing {
    use eh_core::Waypoint;

    use crate::client::{parse_elevation_response, parse_route_response, route_url};
    use crate::error::ProviderError;

    #[test]
    fn route_url_places_lon_before_lat() {
        let url = route_url(
            "http://router.project-osrm.org",
            &Waypoint::new(37.6130184, -122.3962536),
            &Waypoint::new(37.4213068, -122.0930900),
        );
        assert_eq!(
            url,
            "http://router.project-osrm.org/route/v1/driving/\
             -122.3962536,37.6130184;-122.09309,37.4213068\
             ?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn route_geometry_swaps_into_lat_lon() {
        let body = r#"{
            "routes": [
                { "geometry": { "coordinates": [[-122.40, 37.61], [-122.09, 37.42]] } }
            ]
        }"#;
        let polyline = parse_route_response(body).unwrap();
        assert_eq!(polyline[0], Waypoint::new(37.61, -122.40));
        assert_eq!(polyline[1], Waypoint::new(37.42, -122.09));
    }

    #[test]
    fn empty_routes_array_is_no_route() {
        let body = r#"{ "routes": [] }"#;
        assert!(matches!(
            parse_route_response(body),
            Err(ProviderError::NoRoute)
        ));
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(
            parse_route_response("not json"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn elevations_align_with_input() {
        let body = r#"{
            "status": "OK",
            "results": [
                { "elevation": 3.2 },
                { "elevation": null },
                { "elevation": 101.55 }
            ]
        }"#;
        let alts = parse_elevation_response(body, 3).unwrap();
        assert_eq!(alts, vec![Some(3.2), None, Some(101.55)]);
    }

    #[test]
    fn elevation_count_mismatch_is_malformed() {
        let body = r#"{ "status": "OK", "results": [ { "elevation": 1.0 } ] }"#;
        assert!(matches!(
            parse_elevation_response(body, 2),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn elevation_error_status_is_malformed() {
        let body = r#"{ "status": "INVALID_REQUEST", "results": [] }"#;
        assert!(matches!(
            parse_elevation_response(body, 0),
            Err(ProviderError::Malformed(_))
        ));
    }
}
