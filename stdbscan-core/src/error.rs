//! Error types for stdbscan-core.

use thiserror::Error;

/// Result type alias for stdbscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for clustering runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Metric is unknown or reserved but not implemented.
    #[error("unsupported metric: {0}")]
    UnsupportedMetric(String),

    /// Malformed configuration value.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A point carries a coordinate that cannot be clustered.
    #[error("invalid point {index}: {reason}")]
    InvalidPoint {
        /// Index of the offending point.
        index: usize,
        /// Why the point was rejected.
        reason: &'static str,
    },

    /// Columns of a point batch have different lengths.
    #[error("column length mismatch: x={x}, y={y}, t={t}")]
    LengthMismatch {
        /// Length of the x column.
        x: usize,
        /// Length of the y column.
        y: usize,
        /// Length of the t column.
        t: usize,
    },

    /// A run would need more of some resource than allowed.
    #[error("{resource} of {requested} exceeds the limit of {limit}")]
    ResourceLimitExceeded {
        /// What ran out, e.g. "grid cells".
        resource: &'static str,
        /// Amount the run would need.
        requested: u128,
        /// Configured or structural limit.
        limit: u128,
    },
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
