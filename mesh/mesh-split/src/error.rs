//! Error types for mesh segmentation.

use thiserror::Error;

/// Result type for segmentation operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors that can occur while splitting a merged mesh.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Position and index buffers are inconsistent.
    #[error("malformed mesh: {reason}")]
    MalformedMesh {
        /// What is wrong with the buffers.
        reason: String,
    },

    /// No triangles to segment.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A cluster without triangles reached the rebuilder.
    #[error("cluster {cluster} has no triangles")]
    EmptyCluster {
        /// Position of the cluster in the clustering output.
        cluster: usize,
    },

    /// The adjacency distance is not a positive finite number.
    #[error("adjacency distance must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
}

impl SplitError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMesh {
            reason: reason.into(),
        }
    }
}
