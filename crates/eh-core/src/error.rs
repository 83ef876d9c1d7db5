//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they forward validation failures.

use thiserror::Error;

/// Errors produced by `eh-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("bounding box requires at least one waypoint")]
    NoWaypoints,
}

/// Shorthand result type for `eh-core` operations.
pub type CoreResult<T> = Result<T, CoreError>;
