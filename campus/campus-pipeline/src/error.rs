//! Error types for the campus pipeline.

use mesh_split::SplitError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that stop the pipeline.
///
/// A missing geographic dataset is not among them: the pipeline degrades
/// to geometry-only output instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Segmentation failed.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// The scene contains no mesh to split.
    #[error("scene contains no mesh")]
    NoMesh,

    /// The configuration is unusable.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What is wrong.
        reason: String,
    },

    /// A mesh dump or config file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
