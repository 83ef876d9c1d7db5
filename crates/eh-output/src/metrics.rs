//! Summary metrics for a routed drive.

use std::fmt;

use eh_route::{DriveSample, Route};

use crate::error::{OutputError, OutputResult};

// ── Route metrics ─────────────────────────────────────────────────────────────

/// Aggregate figures for a stitched route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteMetrics {
    pub vertex_count: usize,
    pub length_m: f64,
}

impl RouteMetrics {
    pub fn of(route: &Route) -> Self {
        Self {
            vertex_count: route.len(),
            length_m: route.total_length_m(),
        }
    }
}

impl fmt::Display for RouteMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Route metrics:")?;
        writeln!(f, "  - Number of waypoints: {}", self.vertex_count)?;
        write!(f, "  - Route length: {:.2} meters", self.length_m)
    }
}

// ── Drive metrics ─────────────────────────────────────────────────────────────

/// Aggregate figures for a simulated drive, with the sample rate inferred
/// from the first timestamp step rather than trusted from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveMetrics {
    pub sample_count: usize,
    /// `1 / (t₁ − t₀)`.
    pub freq_hz: f64,
    /// `t_last − t₀`.
    pub duration_s: f64,
    pub speed_m_s: f64,
}

impl DriveMetrics {
    /// # Errors
    ///
    /// [`OutputError::Empty`] with fewer than two samples — there is no
    /// timestamp step to infer a frequency from.
    pub fn of(samples: &[DriveSample]) -> OutputResult<Self> {
        let (first, rest) = samples
            .split_first()
            .ok_or(OutputError::Empty("drive metrics need samples"))?;
        let second = rest
            .first()
            .ok_or(OutputError::Empty("drive metrics need at least two samples"))?;
        let last = rest.last().unwrap_or(first);

        Ok(Self {
            sample_count: samples.len(),
            freq_hz: 1.0 / (second.timestamp_s - first.timestamp_s),
            duration_s: last.timestamp_s - first.timestamp_s,
            speed_m_s: first.speed_m_s,
        })
    }
}

impl fmt::Display for DriveMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Virtual drive metrics:")?;
        writeln!(f, "  - Drive speed: {} m/s", self.speed_m_s)?;
        writeln!(f, "  - GNSS frequency: {:.2} Hz", self.freq_hz)?;
        writeln!(f, "  - Number of samples: {}", self.sample_count)?;
        write!(f, "  - Drive duration: {:.2} seconds", self.duration_s)
    }
}

// ── Trace reduction ───────────────────────────────────────────────────────────

/// Reduce a sub-second trace to ~1 Hz poses for map-engine consumption.
///
/// When adjacent samples are less than a second apart, every
/// `round(1/Δt)`-th sample is kept; traces already at or below 1 Hz come
/// back unchanged.
pub fn subsample(samples: &[DriveSample]) -> Vec<DriveSample> {
    let stride = match samples {
        [first, second, ..] => {
            let dt = second.timestamp_s - first.timestamp_s;
            if dt > 0.0 && dt < 1.0 {
                (1.0 / dt).round() as usize
            } else {
                1
            }
        }
        _ => 1,
    };

    samples.iter().step_by(stride.max(1)).copied().collect()
}
