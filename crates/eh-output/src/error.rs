//! Error types for eh-output.

use thiserror::Error;

/// Errors that can occur when persisting or summarizing a drive.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The operation requires prior computation that has not been run.
    #[error("nothing to operate on: {0}")]
    Empty(&'static str),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
