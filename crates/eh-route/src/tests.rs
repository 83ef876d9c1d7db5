//! Unit tests for eh-route.
//!
//! Provider calls are stubbed with straight-line fixtures so everything
//! runs without network access.

#[cfg(test)]
mod fixtures {
    use std::cell::RefCell;

    use eh_core::Waypoint;
    use eh_provider::{ElevationBackend, ProviderError, ProviderResult, RoutingBackend};

    /// Routing stub: every leg is `[start, midpoint, end]` on a straight
    /// line.  Elevation batches are recorded and answered with `10·i`.
    #[derive(Default)]
    pub struct StraightLineProvider {
        pub elevation_batches: RefCell<Vec<usize>>,
    }

    impl RoutingBackend for StraightLineProvider {
        fn route(&self, start: &Waypoint, end: &Waypoint) -> ProviderResult<Vec<Waypoint>> {
            let mid = Waypoint::new(
                (start.lat + end.lat) / 2.0,
                (start.lon + end.lon) / 2.0,
            );
            Ok(vec![*start, mid, *end])
        }
    }

    impl ElevationBackend for StraightLineProvider {
        fn elevations(&self, points: &[Waypoint]) -> ProviderResult<Vec<Option<f64>>> {
            self.elevation_batches.borrow_mut().push(points.len());
            Ok((0..points.len()).map(|i| Some(i as f64 * 10.0)).collect())
        }
    }

    /// Provider whose routing always fails.
    pub struct DownProvider;

    impl RoutingBackend for DownProvider {
        fn route(&self, _: &Waypoint, _: &Waypoint) -> ProviderResult<Vec<Waypoint>> {
            Err(ProviderError::Http("connection refused".into()))
        }
    }

    impl ElevationBackend for DownProvider {
        fn elevations(&self, _: &[Waypoint]) -> ProviderResult<Vec<Option<f64>>> {
            Err(ProviderError::Http("connection refused".into()))
        }
    }
}

// ── Route builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use eh_core::Waypoint;

    use super::fixtures::{DownProvider, StraightLineProvider};
    use crate::{RouteBuilder, RouteError};

    #[test]
    fn join_vertices_appear_once() {
        let provider = StraightLineProvider::default();
        let waypoints = [
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 1.0),
            Waypoint::new(0.0, 2.0),
        ];
        let route = RouteBuilder::new(&provider).build(&waypoints).unwrap();

        // Two legs of 3 vertices each, sharing the middle waypoint:
        // [A, m1, B] ++ [B, m2, C] → A, m1, B, m2, C.
        assert_eq!(route.len(), 5);
        assert_eq!(route.vertices()[2].lon, 1.0);
        for pair in route.vertices().windows(2) {
            assert_ne!(
                (pair[0].lat, pair[0].lon),
                (pair[1].lat, pair[1].lon),
                "duplicated join vertex"
            );
        }
    }

    #[test]
    fn elevations_attached_in_one_batch() {
        let provider = StraightLineProvider::default();
        let waypoints = [
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 1.0),
            Waypoint::new(0.0, 2.0),
        ];
        let route = RouteBuilder::new(&provider).build(&waypoints).unwrap();

        assert_eq!(*provider.elevation_batches.borrow(), vec![5]);
        for (i, vertex) in route.vertices().iter().enumerate() {
            assert_eq!(vertex.alt, Some(i as f64 * 10.0));
        }
    }

    #[test]
    fn fewer_than_two_waypoints_rejected() {
        let provider = StraightLineProvider::default();
        let builder = RouteBuilder::new(&provider);

        assert!(matches!(
            builder.build(&[]),
            Err(RouteError::InsufficientWaypoints(0))
        ));
        assert!(matches!(
            builder.build(&[Waypoint::new(0.0, 0.0)]),
            Err(RouteError::InsufficientWaypoints(1))
        ));
    }

    #[test]
    fn provider_failure_aborts_build() {
        let builder = RouteBuilder::new(&DownProvider);
        let waypoints = [Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 1.0)];
        assert!(matches!(
            builder.build(&waypoints),
            Err(RouteError::Provider(_))
        ));
    }
}

// ── Route polyline ────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use eh_core::Waypoint;

    use crate::{Route, RouteError};

    #[test]
    fn total_length_sums_segments() {
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.01),
            Waypoint::new(0.0, 0.02),
        ])
        .unwrap();

        let direct = Waypoint::new(0.0, 0.0).geodesic_m(Waypoint::new(0.0, 0.02));
        assert!((route.total_length_m() - direct).abs() < 1e-6);
    }

    #[test]
    fn single_vertex_rejected() {
        assert!(matches!(
            Route::new(vec![Waypoint::new(0.0, 0.0)]),
            Err(RouteError::DegeneratePolyline(1))
        ));
    }

    #[test]
    fn bounding_box_covers_all_vertices() {
        let route = Route::new(vec![
            Waypoint::new(37.61, -122.40),
            Waypoint::new(37.37, -121.91),
        ])
        .unwrap();
        let bb = route.bounding_box().unwrap();
        assert_eq!(bb.min_lat, 37.37);
        assert_eq!(bb.max_lon, -121.91);
    }
}

// ── Drive resampling ──────────────────────────────────────────────────────────

#[cfg(test)]
mod resample {
    use eh_core::Waypoint;

    use crate::{DEFAULT_EPOCH_S, DriveConfig, DriveSample, Route, RouteError};

    fn config(speed: f64, freq: f64) -> DriveConfig {
        DriveConfig {
            speed_m_s: speed,
            freq_hz: freq,
            ..DriveConfig::default()
        }
    }

    fn drain(route: &Route, cfg: &DriveConfig) -> Vec<DriveSample> {
        route.resample(cfg).unwrap().collect()
    }

    #[test]
    fn sample_count_on_single_segment() {
        // One straight segment along the equator, ~1113 m.
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.01),
        ])
        .unwrap();
        let cfg = config(30.0, 10.0); // step = 3 m

        let samples = drain(&route, &cfg);
        let expected = (route.total_length_m() / cfg.step_m()).floor() as usize + 1;
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn spacing_matches_speed_over_freq() {
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.01),
        ])
        .unwrap();
        let cfg = config(30.0, 10.0);

        let samples = drain(&route, &cfg);
        for pair in samples.windows(2) {
            let gap = pair[0].position.geodesic_m(pair[1].position);
            // 7-decimal coordinate rounding keeps each sample within ~1 cm.
            assert!((gap - 3.0).abs() < 0.03, "gap {gap}");
        }
    }

    #[test]
    fn carry_preserves_spacing_across_vertices() {
        // Two ~11.1 m segments; step 4 m never divides a segment evenly.
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.0001),
            Waypoint::new(0.0, 0.0002),
        ])
        .unwrap();
        let cfg = config(40.0, 10.0); // step = 4 m

        let samples = drain(&route, &cfg);
        assert!(samples.len() >= 5);
        for pair in samples.windows(2) {
            let gap = pair[0].position.geodesic_m(pair[1].position);
            assert!((gap - 4.0).abs() < 0.05, "gap {gap}");
        }
    }

    #[test]
    fn timestamps_form_uniform_grid_from_epoch() {
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.001),
        ])
        .unwrap();
        let cfg = config(30.0, 10.0);

        let samples = drain(&route, &cfg);
        assert_eq!(samples[0].timestamp_s, DEFAULT_EPOCH_S);
        for (i, pair) in samples.windows(2).enumerate() {
            let dt = pair[1].timestamp_s - pair[0].timestamp_s;
            // Epoch-sized f64s round at ~2e-7; the grid is exact to that.
            assert!((dt - 0.1).abs() < 1e-6, "dt {dt} at {i}");
        }
        assert!(samples.iter().all(|s| s.speed_m_s == 30.0));
    }

    #[test]
    fn first_sample_sits_on_route_start() {
        let route = Route::new(vec![
            Waypoint::new(37.6130184, -122.3962536),
            Waypoint::new(37.4213068, -122.0930900),
        ])
        .unwrap();
        let first = route
            .resample(&DriveConfig::default())
            .unwrap()
            .next()
            .unwrap();
        assert!((first.position.lat - 37.6130184).abs() < 1e-7);
        assert!((first.position.lon + 122.3962536).abs() < 1e-7);
    }

    #[test]
    fn altitudes_interpolate_along_segments() {
        let route = Route::new(vec![
            Waypoint::with_alt(0.0, 0.0, 0.0),
            Waypoint::with_alt(0.0, 0.001, 100.0),
        ])
        .unwrap();
        let samples = drain(&route, &config(30.0, 10.0));

        assert!(samples.iter().all(|s| s.position.alt.is_some()));
        let alts: Vec<f64> = samples.iter().map(|s| s.position.alt.unwrap()).collect();
        assert!(alts.windows(2).all(|w| w[1] >= w[0]), "altitude not monotone: {alts:?}");
    }

    #[test]
    fn coincident_waypoints_yield_no_samples() {
        let wp = Waypoint::new(37.0, -122.0);
        let route = Route::new(vec![wp, wp]).unwrap();
        assert_eq!(drain(&route, &DriveConfig::default()).len(), 0);
    }

    #[test]
    fn invalid_speed_or_frequency_rejected() {
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.001),
        ])
        .unwrap();

        for (speed, freq) in [(0.0, 10.0), (-5.0, 10.0), (30.0, 0.0), (30.0, -1.0), (f64::NAN, 10.0)] {
            let result = route.resample(&config(speed, freq));
            assert!(
                matches!(result, Err(RouteError::InvalidParameter { .. })),
                "accepted speed={speed} freq={freq}"
            );
        }
    }
}
