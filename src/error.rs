//! Error types for the preprocessing crate.
//!
//! A small `thiserror` hierarchy: invalid caller-supplied configuration is
//! the only recoverable condition; everything else surfaces as the wrapped
//! Polars error.

use thiserror::Error;

/// The main error type for preprocessing operations.
#[derive(Error, Debug)]
pub enum PrepError {
    /// A strategy, method, or threshold value the caller supplied is not
    /// accepted. Raised before any mutation of the wrapped table.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Column was not found in the dataset.
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Polars error wrapper.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PrepError {
    /// Whether this error is recoverable by correcting configuration and
    /// retrying the call.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PrepError>;
