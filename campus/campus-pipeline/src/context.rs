//! The pipeline context and its run.

use std::sync::Arc;

use geo_match::{
    CentroidIndex, GeoBuildingRecord, GeoDataset, GeoResult, GeoTransform, MatchStats,
    match_bounds,
};
use mesh_split::split_mesh;
use mesh_types::{Point2, Point3};
use tracing::{info, warn};

use crate::building::BuildingMesh;
use crate::config::PipelineConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{PipelineError, PipelineResult};
use crate::scene::{MeshNode, SceneNode};

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct CampusSplit {
    /// Buildings in cluster order.
    pub buildings: Vec<BuildingMesh>,
    /// The transform used for the join.
    pub transform: GeoTransform,
    /// Run counters.
    pub diagnostics: Diagnostics,
}

impl CampusSplit {
    /// Building with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&BuildingMesh> {
        self.buildings.iter().find(|b| b.name == name)
    }

    /// Building that carries `record`, compared by identity.
    #[must_use]
    pub fn building_for_record(&self, record: &Arc<GeoBuildingRecord>) -> Option<&BuildingMesh> {
        self.buildings
            .iter()
            .find(|b| b.record.as_ref().is_some_and(|r| Arc::ptr_eq(r, record)))
    }

    /// Mutable access by name, for highlight and selection.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut BuildingMesh> {
        self.buildings.iter_mut().find(|b| b.name == name)
    }

    /// Building whose footprint covers a geographic point.
    ///
    /// The point is mapped back into model space with the run's transform
    /// and tested against each building's ground-plane bounds. Returns
    /// `None` if the transform cannot be inverted.
    #[must_use]
    pub fn building_at_geo(&self, geo: &Point2<f64>) -> Option<&BuildingMesh> {
        let model = self.transform.to_model(geo)?;
        self.buildings
            .iter()
            .find(|b| b.mesh.bounds().contains_horizontal(&model))
    }
}

/// Configuration and dataset shared by every pipeline run.
///
/// Built once and passed by reference; the dataset is immutable and may be
/// queried from several threads.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    config: PipelineConfig,
    dataset: Arc<GeoDataset>,
    index: CentroidIndex,
    attributes_available: bool,
}

impl PipelineContext {
    /// Create a context from a configuration and a dataset load result.
    ///
    /// A failed dataset load is logged and replaced by an empty dataset;
    /// every building will then be unmatched.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: PipelineConfig, dataset: GeoResult<GeoDataset>) -> PipelineResult<Self> {
        config.validate()?;

        let (dataset, attributes_available) = match dataset {
            Ok(dataset) => (dataset, true),
            Err(err) => {
                warn!("{err}; continuing without building attributes");
                (GeoDataset::empty(), false)
            }
        };
        let index = CentroidIndex::build(&dataset);

        Ok(Self {
            config,
            dataset: Arc::new(dataset),
            index,
            attributes_available,
        })
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Shared handle to the dataset.
    #[must_use]
    pub fn dataset(&self) -> Arc<GeoDataset> {
        Arc::clone(&self.dataset)
    }

    /// The centroid index.
    #[must_use]
    pub fn index(&self) -> &CentroidIndex {
        &self.index
    }

    /// Whether a dataset was loaded.
    #[must_use]
    pub fn attributes_available(&self) -> bool {
        self.attributes_available
    }

    /// Split the scene's merged mesh.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoMesh`] if the scene has no mesh, or any
    /// error from [`Self::run`].
    pub fn run_scene(&self, scene: &SceneNode) -> PipelineResult<CampusSplit> {
        let mesh = scene.find_merged_mesh().ok_or(PipelineError::NoMesh)?;
        let meshes = scene.mesh_count();
        if meshes > 1 {
            warn!("Scene holds {} meshes; splitting only '{}'", meshes, mesh.name);
        }
        self.run(mesh)
    }

    /// Split a merged mesh into buildings and join them to the dataset.
    ///
    /// # Errors
    ///
    /// Fails on malformed or empty buffers.
    pub fn run(&self, mesh: &MeshNode) -> PipelineResult<CampusSplit> {
        let split = split_mesh(&mesh.positions, &mesh.indices, &self.config.cluster)?;
        let transform = self.config.transform.resolve(&mesh.bounds());

        let mut diagnostics = Diagnostics {
            triangle_count: split.clustering.triangle_count,
            cluster_count: split.clustering.len(),
            singleton_clusters: split.clustering.singleton_count(),
            skipped_clusters: split.skipped,
            no_adjacency: split.clustering.has_no_adjacency(),
            attributes_available: self.attributes_available,
            ..Diagnostics::default()
        };

        let mut stats = MatchStats::default();
        let buildings: Vec<_> = split
            .meshes
            .into_iter()
            .enumerate()
            .map(|(number, cluster)| {
                let mut building = BuildingMesh::from_cluster(number, cluster, &mesh.material);
                let joined = match_bounds(&building.mesh.bounds(), &self.index, &transform);
                stats.record(joined.is_matched());
                building.attach(joined);
                if self.config.debug_view {
                    building.apply_debug_tint();
                }
                building
            })
            .collect();

        diagnostics.set_matches(stats, self.index.collisions());
        if self.attributes_available {
            info!("Geographic join: {}", stats);
        }

        Ok(CampusSplit {
            buildings,
            transform,
            diagnostics,
        })
    }

    /// Dataset record whose footprint contains a geographic point.
    #[must_use]
    pub fn building_at(&self, geo: &Point2<f64>) -> Option<&Arc<GeoBuildingRecord>> {
        self.dataset.find_containing(geo)
    }

    /// Dataset record under a model-space point, using the run's transform.
    #[must_use]
    pub fn building_at_model(
        &self,
        model: &Point3<f64>,
        transform: &GeoTransform,
    ) -> Option<&Arc<GeoBuildingRecord>> {
        self.building_at(&transform.project(model))
    }
}
