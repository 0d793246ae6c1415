//! Error types for geographic matching.

use thiserror::Error;

/// Result type for geographic operations.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors that can occur while loading or querying the geographic dataset.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The attribute dataset is absent or could not be parsed.
    ///
    /// Callers are expected to degrade: geometry without attributes is
    /// still usable.
    #[error("building attributes unavailable: {reason}")]
    MissingAttributes {
        /// Why the dataset could not be used.
        reason: String,
    },
}

impl GeoError {
    pub(crate) fn missing(reason: impl Into<String>) -> Self {
        Self::MissingAttributes {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GeoError {
    fn from(err: serde_json::Error) -> Self {
        Self::missing(format!("invalid GeoJSON: {err}"))
    }
}

impl From<std::io::Error> for GeoError {
    fn from(err: std::io::Error) -> Self {
        Self::missing(format!("cannot read dataset: {err}"))
    }
}
