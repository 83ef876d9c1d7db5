//! Unit tests for eh-output.

#[cfg(test)]
mod fixtures {
    use eh_core::Waypoint;
    use eh_route::DriveSample;

    /// A small 10 Hz trace at 30 m/s starting from the default epoch.
    pub fn trace(n: usize) -> Vec<DriveSample> {
        (0..n)
            .map(|i| DriveSample {
                timestamp_s: 1_735_732_800.0 + i as f64 * 0.1,
                position: Waypoint::with_alt(
                    37.6130184 - i as f64 * 1e-5,
                    -122.3962536 + i as f64 * 1e-5,
                    3.2 + i as f64,
                ),
                speed_m_s: 30.0,
            })
            .collect()
    }
}

// ── CSV trace ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trace {
    use eh_core::Waypoint;
    use eh_route::DriveSample;

    use super::fixtures::trace;
    use crate::{TraceWriter, save_trace};

    #[test]
    fn golden_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.csv");
        save_trace(&path, &trace(2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "timestamp_s,latitude_deg,longitude_deg,altitude_m,speed_m_per_s\n\
             1735732800.0,37.6130184,-122.3962536,3.20,30\n\
             1735732800.1,37.6130084,-122.3962436,4.20,30\n"
        );
    }

    #[test]
    fn missing_altitude_leaves_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.csv");
        let sample = DriveSample {
            timestamp_s: 1_735_732_800.0,
            position: Waypoint::new(0.0, 0.0),
            speed_m_s: 30.0,
        };
        save_trace(&path, &[sample]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(row, "1735732800.0,0.0000000,0.0000000,,30");
    }

    #[test]
    fn nothing_lands_at_final_path_before_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.csv");

        let mut writer = TraceWriter::create(&path).unwrap();
        for sample in trace(3) {
            writer.write_sample(&sample).unwrap();
        }
        assert!(!path.exists(), "trace visible before finish");

        writer.finish().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn dropped_writer_discards_partial_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.csv");

        {
            let mut writer = TraceWriter::create(&path).unwrap();
            writer.write_sample(&trace(1)[0]).unwrap();
            // Dropped without finish — a cancelled run.
        }

        assert!(!path.exists());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(leftovers.is_empty(), "temp file survived cancellation");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drive.csv");
        let mut writer = TraceWriter::create(&path).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
        assert!(path.exists());
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics {
    use eh_core::Waypoint;
    use eh_route::Route;

    use super::fixtures::trace;
    use crate::{DriveMetrics, OutputError, RouteMetrics};

    #[test]
    fn route_metrics_report_vertices_and_length() {
        let route = Route::new(vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 0.01),
            Waypoint::new(0.0, 0.02),
        ])
        .unwrap();
        let m = RouteMetrics::of(&route);
        assert_eq!(m.vertex_count, 3);
        assert!((m.length_m - route.total_length_m()).abs() < 1e-9);
    }

    #[test]
    fn drive_metrics_infer_frequency_from_timestamps() {
        let m = DriveMetrics::of(&trace(101)).unwrap();
        assert_eq!(m.sample_count, 101);
        assert!((m.freq_hz - 10.0).abs() < 1e-4);
        assert!((m.duration_s - 10.0).abs() < 1e-6);
        assert_eq!(m.speed_m_s, 30.0);
    }

    #[test]
    fn fewer_than_two_samples_is_empty() {
        assert!(matches!(
            DriveMetrics::of(&[]),
            Err(OutputError::Empty(_))
        ));
        assert!(matches!(
            DriveMetrics::of(&trace(1)),
            Err(OutputError::Empty(_))
        ));
    }

    #[test]
    fn display_renders_report_block() {
        let report = DriveMetrics::of(&trace(10)).unwrap().to_string();
        assert!(report.contains("Drive speed: 30 m/s"));
        assert!(report.contains("GNSS frequency: 10.00 Hz"));
    }
}

// ── Subsampling ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod subsample {
    use super::fixtures::trace;
    use crate::subsample;

    #[test]
    fn ten_hz_trace_reduces_to_one_hz() {
        let reduced = subsample(&trace(25));
        // Samples 0, 10, 20.
        assert_eq!(reduced.len(), 3);
        let dt = reduced[1].timestamp_s - reduced[0].timestamp_s;
        assert!((dt - 1.0).abs() < 1e-9);
    }

    #[test]
    fn slow_trace_passes_through() {
        let mut slow = trace(5);
        for (i, s) in slow.iter_mut().enumerate() {
            s.timestamp_s = 1_735_732_800.0 + i as f64 * 2.0;
        }
        assert_eq!(subsample(&slow).len(), 5);
    }

    #[test]
    fn tiny_traces_pass_through() {
        assert_eq!(subsample(&trace(1)).len(), 1);
        assert_eq!(subsample(&[]).len(), 0);
    }
}
