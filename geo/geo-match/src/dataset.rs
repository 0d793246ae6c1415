//! The loaded building dataset.

use std::path::Path;
use std::sync::Arc;

use nalgebra::Point2;
use tracing::info;

use crate::error::GeoResult;
use crate::geojson::parse_feature_collection;
use crate::record::GeoBuildingRecord;

/// Read-only set of building records, shared by reference.
#[derive(Debug, Clone, Default)]
pub struct GeoDataset {
    /// Records in dataset order.
    pub records: Vec<Arc<GeoBuildingRecord>>,
}

impl GeoDataset {
    /// A dataset with no records.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap already-built records.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = GeoBuildingRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a GeoJSON feature collection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeoError::MissingAttributes`] if the text cannot be parsed.
    pub fn from_geojson_str(text: &str) -> GeoResult<Self> {
        let dataset = Self::from_records(parse_feature_collection(text)?);
        info!("Loaded {} building footprints", dataset.len());
        Ok(dataset)
    }

    /// Read and parse a GeoJSON file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeoError::MissingAttributes`] if the file cannot be
    /// read or parsed.
    pub fn from_path(path: &Path) -> GeoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&text)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose footprint contains `point`.
    #[must_use]
    pub fn find_containing(&self, point: &Point2<f64>) -> Option<&Arc<GeoBuildingRecord>> {
        self.records.iter().find(|r| r.contains(point))
    }
}
