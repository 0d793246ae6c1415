//! Parameters for connectivity clustering.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};

/// Default adjacency distance, in model units.
pub const DEFAULT_EPSILON: f64 = 5.0;

/// How adjacency candidates are found during clustering.
///
/// Both strategies evaluate the same predicate and produce identical
/// clusters; they only differ in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdjacencyStrategy {
    /// Hash vertices into cells of edge `epsilon` and only test triangles
    /// owning a vertex in a neighbouring cell.
    #[default]
    SpatialGrid,
    /// Test every unvisited triangle. Quadratic; kept as a reference.
    BruteForce,
}

/// Configuration for connectivity clustering.
///
/// # Example
///
/// ```
/// use mesh_split::{AdjacencyStrategy, ClusterParams};
///
/// let params = ClusterParams::default()
///     .with_epsilon(2.5)
///     .with_strategy(AdjacencyStrategy::BruteForce);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterParams {
    /// Two triangles are adjacent when any corner of one lies strictly
    /// closer than this to any corner of the other.
    ///
    /// Too large merges neighbouring buildings, too small fragments one
    /// building into pieces. Default: `5.0`
    pub epsilon: f64,

    /// Candidate search strategy. Default: [`AdjacencyStrategy::SpatialGrid`]
    pub strategy: AdjacencyStrategy,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            strategy: AdjacencyStrategy::default(),
        }
    }
}

impl ClusterParams {
    /// Set the adjacency distance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the candidate search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: AdjacencyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check that `epsilon` is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidEpsilon`] otherwise.
    pub fn validate(&self) -> SplitResult<()> {
        if self.epsilon.is_finite() && self.epsilon > 0.0 {
            Ok(())
        } else {
            Err(SplitError::InvalidEpsilon(self.epsilon))
        }
    }
}
