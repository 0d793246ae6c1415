//! One-call segmentation: extract, cluster, rebuild.

use tracing::info;

use crate::cluster::{Clustering, cluster_triangles};
use crate::error::SplitResult;
use crate::extract::{RawMesh, raw_triangles};
use crate::params::ClusterParams;
use crate::rebuild::{ClusterMesh, rebuild_clusters};

/// Everything produced by [`split_mesh`].
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// The triangle partition.
    pub clustering: Clustering,
    /// One compact mesh per non-empty cluster.
    pub meshes: Vec<ClusterMesh>,
    /// Clusters that produced no mesh.
    pub skipped: Vec<usize>,
}

/// Segment a merged mesh into connected components.
///
/// # Errors
///
/// Fails fast on malformed buffers, an empty mesh or an invalid
/// adjacency distance. Empty clusters are skipped, not fatal.
///
/// # Example
///
/// ```
/// use mesh_split::{ClusterParams, split_mesh};
///
/// let positions = [
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
///     40.0, 0.0, 0.0, 41.0, 0.0, 0.0, 40.0, 0.0, 1.0,
/// ];
/// let indices = [0, 2, 1, 3, 5, 4];
///
/// let split = split_mesh(&positions, &indices, &ClusterParams::default()).unwrap();
/// assert_eq!(split.meshes.len(), 2);
/// ```
pub fn split_mesh(
    positions: &[f32],
    indices: &[u32],
    params: &ClusterParams,
) -> SplitResult<SplitOutput> {
    let raw = RawMesh::new(positions, indices)?;
    let triangles = raw_triangles(&raw)?;
    let clustering = cluster_triangles(&triangles, params)?;
    let rebuilt = rebuild_clusters(&raw, &triangles, &clustering);

    info!(
        "Split {} faces into {} meshes",
        raw.face_count(),
        rebuilt.meshes.len()
    );

    Ok(SplitOutput {
        clustering,
        meshes: rebuilt.meshes,
        skipped: rebuilt.skipped,
    })
}
