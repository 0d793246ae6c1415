//! Per-cluster mesh compaction.
//!
//! Every cluster is copied out of the merged buffers into its own compact
//! [`IndexedMesh`], with vertices deduplicated by exact coordinates.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3};
use tracing::{debug, warn};

use crate::cluster::Clustering;
use crate::error::{SplitError, SplitResult};
use crate::extract::{FaceTriangle, RawMesh};

/// The compact mesh of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMesh {
    /// Position of the cluster in the [`Clustering`] it came from.
    pub cluster: usize,
    /// Deduplicated geometry with per-vertex normals.
    pub mesh: IndexedMesh,
    /// Source face of each face in `mesh`, in the same order.
    pub source_faces: Vec<usize>,
}

impl ClusterMesh {
    /// Number of source triangles in this cluster.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.source_faces.len()
    }
}

/// Output of [`rebuild_clusters`].
#[derive(Debug, Clone, Default)]
pub struct RebuildOutput {
    /// One mesh per non-empty cluster, in cluster order.
    pub meshes: Vec<ClusterMesh>,
    /// Clusters that were skipped because they were empty or malformed.
    pub skipped: Vec<usize>,
}

/// Exact-match key for a vertex position. `-0.0` is folded into `0.0`.
fn vertex_key(p: [f32; 3]) -> [u32; 3] {
    p.map(|c| (c + 0.0).to_bits())
}

/// Build the compact mesh for one cluster.
///
/// `members` are positions into `triangles`; faces are emitted in that
/// order and vertices are numbered by first use.
///
/// # Errors
///
/// Returns [`SplitError::EmptyCluster`] if `members` is empty, and
/// [`SplitError::MalformedMesh`] if a member is not a position in
/// `triangles` or names a face outside `raw`.
// A cluster never has more vertices than the u32-indexed source.
#[allow(clippy::cast_possible_truncation)]
pub fn rebuild_cluster(
    raw: &RawMesh<'_>,
    triangles: &[FaceTriangle],
    cluster: usize,
    members: &[usize],
) -> SplitResult<ClusterMesh> {
    if members.is_empty() {
        return Err(SplitError::EmptyCluster { cluster });
    }

    let mut mesh = IndexedMesh::with_capacity(members.len() * 3, members.len());
    let mut source_faces = Vec::with_capacity(members.len());
    let mut vertex_map: HashMap<[u32; 3], u32> = HashMap::new();

    for &member in members {
        let face = triangles
            .get(member)
            .map(|t| t.face)
            .filter(|&face| face < raw.face_count())
            .ok_or_else(|| {
                SplitError::malformed(format!("cluster {cluster}: member {member} is out of range"))
            })?;
        let mut new_face = [0_u32; 3];

        for (slot, original) in raw.face(face).into_iter().enumerate() {
            let position = raw.position(original);
            let next = mesh.vertices.len() as u32;
            let index = *vertex_map.entry(vertex_key(position)).or_insert_with(|| {
                mesh.vertices.push(Point3::new(
                    f64::from(position[0]),
                    f64::from(position[1]),
                    f64::from(position[2]),
                ));
                next
            });
            new_face[slot] = index;
        }

        mesh.faces.push(new_face);
        source_faces.push(face);
    }

    mesh.compute_vertex_normals();

    Ok(ClusterMesh {
        cluster,
        mesh,
        source_faces,
    })
}

/// Build one compact mesh per cluster.
///
/// Empty or out-of-range clusters cannot come out of
/// [`crate::cluster_triangles`]; if one shows up anyway it is logged and
/// skipped.
///
/// # Example
///
/// ```
/// use mesh_split::{ClusterParams, RawMesh, cluster_triangles, raw_triangles, rebuild_clusters};
///
/// // Two triangles sharing an edge: 6 index slots, 4 distinct corners.
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
/// let indices = [0, 1, 2, 1, 3, 2];
/// let raw = RawMesh::new(&positions, &indices).unwrap();
/// let triangles = raw_triangles(&raw).unwrap();
/// let clustering = cluster_triangles(&triangles, &ClusterParams::default()).unwrap();
///
/// let output = rebuild_clusters(&raw, &triangles, &clustering);
/// assert_eq!(output.meshes.len(), 1);
/// assert_eq!(output.meshes[0].mesh.vertex_count(), 4);
/// ```
#[must_use]
pub fn rebuild_clusters(
    raw: &RawMesh<'_>,
    triangles: &[FaceTriangle],
    clustering: &Clustering,
) -> RebuildOutput {
    let mut output = RebuildOutput::default();

    for (cluster, members) in clustering.clusters.iter().enumerate() {
        match rebuild_cluster(raw, triangles, cluster, members) {
            Ok(mesh) => output.meshes.push(mesh),
            Err(err) => {
                warn!("Skipping cluster: {err}");
                output.skipped.push(cluster);
            }
        }
    }

    debug!(
        "Rebuilt {} cluster meshes ({} skipped)",
        output.meshes.len(),
        output.skipped.len()
    );

    output
}
