//! Per-building output records.

use std::sync::Arc;

use geo_match::{BuildingMatch, CentroidKey, GeoBuildingRecord};
use mesh_split::ClusterMesh;
use mesh_types::{IndexedMesh, Material, Point2, Point3};

/// Where a building landed during the geographic join.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugInfo {
    /// Bounding-box center in model space.
    pub raw_centroid: Point3<f64>,
    /// `raw_centroid` in geographic space.
    pub geo_coords: Point2<f64>,
    /// Lookup key used for the join.
    pub key: Option<CentroidKey>,
    /// Whether a record was found.
    pub matched: bool,
}

/// One building cut out of the merged mesh.
#[derive(Debug, Clone)]
pub struct BuildingMesh {
    /// `Building_<n>`, numbered in cluster order from zero.
    pub name: String,
    /// Compact geometry with vertex normals.
    pub mesh: IndexedMesh,
    /// This building's own copy of the source material.
    pub material: Material,
    /// Faces of the merged mesh this building was cut from.
    pub source_faces: Vec<usize>,
    /// Bounding-box center in model space.
    pub centroid: Point3<f64>,
    /// Attached dataset record, if the join found one.
    pub record: Option<Arc<GeoBuildingRecord>>,
    /// Join metadata, set once the building has been matched.
    pub debug: Option<DebugInfo>,
}

impl BuildingMesh {
    /// Wrap a rebuilt cluster as building number `number`.
    #[must_use]
    pub fn from_cluster(number: usize, cluster: ClusterMesh, material: &Material) -> Self {
        let centroid = cluster.mesh.bounds().center();
        Self {
            name: format!("Building_{number}"),
            mesh: cluster.mesh,
            material: material.clone(),
            source_faces: cluster.source_faces,
            centroid,
            record: None,
            debug: None,
        }
    }

    /// Record the outcome of the geographic join.
    pub fn attach(&mut self, joined: BuildingMatch) {
        self.debug = Some(DebugInfo {
            raw_centroid: joined.raw_centroid,
            geo_coords: joined.geo_coords,
            key: joined.key,
            matched: joined.is_matched(),
        });
        self.record = joined.record;
    }

    /// Check if a record is attached.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.record.is_some()
    }

    /// Number of source triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.source_faces.len()
    }

    /// Display label: the record's label if matched, else the mesh name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.record
            .as_deref()
            .and_then(|r| r.attributes.label())
            .unwrap_or(&self.name)
    }

    /// Glow on hover.
    pub fn highlight(&mut self) {
        self.material.highlight();
    }

    /// Glow off.
    pub fn clear_highlight(&mut self) {
        self.material.clear_highlight();
    }

    /// Mark as the selected building.
    pub fn select(&mut self) {
        self.material.select();
    }

    /// Back to the neutral look.
    pub fn reset(&mut self) {
        self.material.reset();
    }

    /// Tint by match outcome.
    pub fn apply_debug_tint(&mut self) {
        self.material.debug_tint(self.is_matched());
    }
}
