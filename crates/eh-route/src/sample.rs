//! Drive sample type and resampling configuration.

use eh_core::Waypoint;

use crate::error::{RouteError, RouteResult};

/// Unix timestamp of 2025-01-01 12:00 UTC — the default reference epoch
/// for simulated traces.  The choice of epoch affects only the absolute
/// timestamps, never the spacing.
pub const DEFAULT_EPOCH_S: f64 = 1_735_732_800.0;

/// One timestamped pose of a simulated GNSS trace.
///
/// Samples share a monotonic timestamp grid with step `1/freq`; adjacent
/// samples are separated by `speed/freq` metres of arc length up to
/// interpolation rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveSample {
    pub timestamp_s: f64,
    pub position: Waypoint,
    /// Constant ground speed; the simulator does not vary speed.
    pub speed_m_s: f64,
}

/// Ground speed, sampling frequency, and reference epoch for a virtual
/// drive.
///
/// Speed is strictly metres per second; a units mismatch is rejected at
/// validation, never reinterpreted.
#[derive(Clone, Copy, Debug)]
pub struct DriveConfig {
    /// Ground speed in m/s.  Default: 30.
    pub speed_m_s: f64,
    /// Sampling frequency in Hz.  Default: 10.
    pub freq_hz: f64,
    /// Unix timestamp of the first sample.  Default: [`DEFAULT_EPOCH_S`].
    pub epoch_s: f64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            speed_m_s: 30.0,
            freq_hz: 10.0,
            epoch_s: DEFAULT_EPOCH_S,
        }
    }
}

impl DriveConfig {
    /// Arc length between adjacent samples: `speed / freq` metres.
    #[inline]
    pub fn step_m(&self) -> f64 {
        self.speed_m_s / self.freq_hz
    }

    /// Reject non-positive or non-finite speed/frequency.
    pub fn validate(&self) -> RouteResult<()> {
        if !self.speed_m_s.is_finite() || self.speed_m_s <= 0.0 {
            return Err(RouteError::InvalidParameter {
                name: "speed_m_s",
                value: self.speed_m_s,
            });
        }
        if !self.freq_hz.is_finite() || self.freq_hz <= 0.0 {
            return Err(RouteError::InvalidParameter {
                name: "freq_hz",
                value: self.freq_hz,
            });
        }
        Ok(())
    }
}
