//! Horizon-subsystem error type.

use thiserror::Error;

/// Errors produced by `eh-horizon`.
#[derive(Debug, Error)]
pub enum HorizonError {
    /// No road-graph edge is near the pose.  Non-fatal to a pose stream:
    /// the offending pose carries the error, processing continues.
    #[error("pose ({lat:.7}, {lon:.7}) is off the road network")]
    OffNetwork { lat: f64, lon: f64 },
}

pub type HorizonResult<T> = Result<T, HorizonError>;
