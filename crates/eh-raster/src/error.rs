//! Raster-subsystem error type.

use thiserror::Error;

use eh_core::CoreError;
use eh_provider::ProviderError;

/// Errors produced by `eh-raster`.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Out-of-range zoom level.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A tile fetch failed; the mosaic is aborted, no partial raster is
    /// returned.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type RasterResult<T> = Result<T, RasterError>;
