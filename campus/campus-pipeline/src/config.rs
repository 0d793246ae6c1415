//! Pipeline configuration.

use std::path::Path;

use geo_match::{DEFAULT_SCALE, GeoTransform};
use mesh_split::ClusterParams;
use mesh_types::{Aabb, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// How model coordinates are mapped into the dataset's coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Model units to geographic units. Default: `1e-4`
    pub scale: f64,

    /// Added after scaling. When `None`, the offset is derived so that
    /// the horizontal center of the whole model maps to the origin.
    pub offset: Option<[f64; 2]>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: None,
        }
    }
}

impl TransformConfig {
    /// Set the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set an explicit offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: [f64; 2]) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build the transform for a model with the given bounds.
    #[must_use]
    pub fn resolve(&self, model_bounds: &Aabb) -> GeoTransform {
        match self.offset {
            Some([x, y]) => GeoTransform::uniform(self.scale, Vector2::new(x, y)),
            None => GeoTransform::centered_on(model_bounds.horizontal_center(), self.scale),
        }
    }
}

/// Everything the pipeline needs besides its inputs.
///
/// # Example
///
/// ```
/// use campus_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{ "cluster": { "epsilon": 2.0 } }"#).unwrap();
/// assert_eq!(config.cluster.epsilon, 2.0);
/// assert_eq!(config.transform.scale, 1e-4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Clustering parameters.
    pub cluster: ClusterParams,
    /// Model-to-geographic transform.
    pub transform: TransformConfig,
    /// Tint every building green or red by match outcome.
    pub debug_view: bool,
}

impl PipelineConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json_str(text: &str) -> PipelineResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> PipelineResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Set the clustering parameters.
    #[must_use]
    pub fn with_cluster(mut self, cluster: ClusterParams) -> Self {
        self.cluster = cluster;
        self
    }

    /// Set the transform configuration.
    #[must_use]
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// Enable or disable the match debug tint.
    #[must_use]
    pub const fn with_debug_view(mut self, debug_view: bool) -> Self {
        self.debug_view = debug_view;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Split`] for a bad epsilon and
    /// [`PipelineError::Config`] for a non-finite or zero scale.
    pub fn validate(&self) -> PipelineResult<()> {
        self.cluster.validate()?;
        if !self.transform.scale.is_finite() || self.transform.scale == 0.0 {
            return Err(PipelineError::Config {
                reason: format!(
                    "transform scale must be finite and non-zero, got {}",
                    self.transform.scale
                ),
            });
        }
        if let Some(offset) = self.transform.offset {
            if offset.iter().any(|v| !v.is_finite()) {
                return Err(PipelineError::Config {
                    reason: format!("transform offset must be finite, got {offset:?}"),
                });
            }
        }
        Ok(())
    }
}
