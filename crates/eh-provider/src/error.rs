//! Provider-subsystem error types.

use thiserror::Error;

/// Errors produced by provider calls and the tile cache.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure or non-2xx status from a provider endpoint.
    #[error("provider request failed: {0}")]
    Http(String),

    /// Response decoded, but its shape or contents violate the contract.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The routing service returned no route between the given waypoints.
    #[error("no route returned between the requested waypoints")]
    NoRoute,

    #[error("tile raster decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Filesystem errors from the tile cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("tile cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
