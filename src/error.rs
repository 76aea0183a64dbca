//! Analytics error types

use thiserror::Error;

/// Analytics errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No row in the dataset carries a usable date; comparison periods
    /// cannot be selected. Fatal to the whole comparison.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A requested categorical dimension is not known to the engine.
    /// Recoverable per dimension in a multi-dimension run.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// Invalid comparison configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
