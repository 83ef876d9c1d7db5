//! Route-subsystem error type.

use thiserror::Error;

use eh_provider::ProviderError;

/// Errors produced by `eh-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("at least two waypoints are required, got {0}")]
    InsufficientWaypoints(usize),

    #[error("polyline requires at least two vertices, got {0}")]
    DegeneratePolyline(usize),

    #[error("parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type RouteResult<T> = Result<T, RouteError>;
