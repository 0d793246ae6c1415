//! Joining building meshes to dataset records.

use std::fmt;
use std::sync::Arc;

use mesh_types::Aabb;
use nalgebra::{Point2, Point3};
use tracing::trace;

use crate::index::CentroidIndex;
use crate::record::{CentroidKey, GeoBuildingRecord};
use crate::transform::GeoTransform;

/// Outcome of joining one mesh to the dataset.
#[derive(Debug, Clone)]
pub struct BuildingMatch {
    /// Center of the mesh bounding box, in model space.
    pub raw_centroid: Point3<f64>,
    /// `raw_centroid` projected to geographic space.
    pub geo_coords: Point2<f64>,
    /// Rounded `geo_coords`, if finite.
    pub key: Option<CentroidKey>,
    /// The record stored under `key`, if any.
    pub record: Option<Arc<GeoBuildingRecord>>,
}

impl BuildingMatch {
    /// Check if a record was found.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.record.is_some()
    }
}

/// Join a mesh, given by its bounds, to the record with the same rounded
/// centroid.
#[must_use]
pub fn match_bounds(
    bounds: &Aabb,
    index: &CentroidIndex,
    transform: &GeoTransform,
) -> BuildingMatch {
    let raw_centroid = bounds.center();
    let geo_coords = transform.project(&raw_centroid);
    let key = CentroidKey::from_point(&geo_coords);
    let record = key.as_ref().and_then(|k| index.get(k)).cloned();

    if let Some(k) = key {
        trace!("Mesh centroid {:?} -> key {} ({})", raw_centroid, k, record.is_some());
    }

    BuildingMatch {
        raw_centroid,
        geo_coords,
        key,
        record,
    }
}

/// Running join counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStats {
    /// Meshes attempted.
    pub total: usize,
    /// Meshes that found a record.
    pub matched: usize,
}

impl MatchStats {
    /// Count one join attempt.
    pub fn record(&mut self, matched: bool) {
        self.total += 1;
        if matched {
            self.matched += 1;
        }
    }

    /// Meshes that found no record.
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }

    /// Percentage of meshes matched, `0.0` when nothing was attempted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} matched ({:.1}%)",
            self.matched,
            self.total,
            self.match_rate()
        )
    }
}
