//! Exact-key index from rounded centroid to record.

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::dataset::GeoDataset;
use crate::record::{CentroidKey, GeoBuildingRecord};

/// Two dataset records rounded to the same key.
///
/// The later record replaced the earlier one in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCollision {
    /// The shared key.
    pub key: CentroidKey,
    /// Dataset position of the record that was dropped.
    pub replaced: usize,
    /// Dataset position of the record that won.
    pub by: usize,
}

/// Map from [`CentroidKey`] to the record with that key.
#[derive(Debug, Clone, Default)]
pub struct CentroidIndex {
    entries: HashMap<CentroidKey, (usize, Arc<GeoBuildingRecord>)>,
    collisions: Vec<KeyCollision>,
}

impl CentroidIndex {
    /// Index every keyed record of `dataset`.
    ///
    /// Records without a key (empty rings) are skipped. When two records
    /// share a key, the later one wins and the collision is recorded.
    #[must_use]
    pub fn build(dataset: &GeoDataset) -> Self {
        let mut index = Self::default();
        let mut unkeyed = 0_usize;

        for (position, record) in dataset.records.iter().enumerate() {
            let Some(key) = record.key else {
                unkeyed += 1;
                continue;
            };
            if let Some((replaced, _)) = index.entries.insert(key, (position, Arc::clone(record))) {
                warn!(
                    "Centroid key {} shared by records {} and {}; keeping {}",
                    key, replaced, position, position
                );
                index.collisions.push(KeyCollision {
                    key,
                    replaced,
                    by: position,
                });
            }
        }

        debug!(
            "Indexed {} centroid keys ({} collisions, {} records without a ring)",
            index.entries.len(),
            index.collisions.len(),
            unkeyed
        );

        index
    }

    /// Record stored under `key`.
    #[must_use]
    pub fn get(&self, key: &CentroidKey) -> Option<&Arc<GeoBuildingRecord>> {
        self.entries.get(key).map(|(_, record)| record)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collisions seen while building, in dataset order.
    #[must_use]
    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BuildingAttributes;
    use nalgebra::Point2;

    fn record(id: &str, ring: &[[f64; 2]]) -> GeoBuildingRecord {
        GeoBuildingRecord::new(
            BuildingAttributes {
                id: Some(id.to_string()),
                ..Default::default()
            },
            ring.iter().map(|&[x, y]| Point2::new(x, y)).collect(),
        )
    }

    #[test]
    fn later_record_wins_on_collision() {
        // Both centroids round to (1.00, 1.00).
        let dataset = GeoDataset::from_records([
            record("first", &[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]),
            record("second", &[[0.001, 0.0], [2.001, 0.0], [2.001, 2.0], [0.001, 2.0]]),
            record("other", &[[10.0, 10.0], [12.0, 10.0], [11.0, 12.0]]),
        ]);
        let index = CentroidIndex::build(&dataset);

        assert_eq!(index.len(), 2);
        let key = CentroidKey { x: 100, y: 100 };
        let winner = index.get(&key).expect("keyed");
        assert_eq!(winner.attributes.id.as_deref(), Some("second"));
        assert!(Arc::ptr_eq(winner, &dataset.records[1]));
        assert_eq!(
            index.collisions(),
            &[KeyCollision {
                key,
                replaced: 0,
                by: 1
            }]
        );
    }

    #[test]
    fn unkeyed_records_are_skipped() {
        let dataset = GeoDataset::from_records([record("empty", &[])]);
        let index = CentroidIndex::build(&dataset);
        assert!(index.is_empty());
        assert!(index.collisions().is_empty());
    }
}
