//! Connectivity clustering of triangles.
//!
//! Triangles are grouped into maximal connected components under the
//! corner-distance relation of [`mesh_types::Triangle::is_near`]. Each
//! component is one building.

use tracing::{debug, info, warn};

use crate::error::{SplitError, SplitResult};
use crate::extract::FaceTriangle;
use crate::grid::VertexGrid;
use crate::params::{AdjacencyStrategy, ClusterParams};

/// The result of clustering: a partition of triangle positions.
///
/// Clusters are ordered by their lowest triangle position, and the
/// positions inside each cluster are ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clustering {
    /// Triangle positions (into the extractor output) of each cluster.
    pub clusters: Vec<Vec<usize>>,
    /// Number of triangles that were clustered.
    pub triangle_count: usize,
}

impl Clustering {
    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if there are no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of single-triangle clusters.
    #[must_use]
    pub fn singleton_count(&self) -> usize {
        self.clusters.iter().filter(|c| c.len() == 1).count()
    }

    /// True when more than one triangle was clustered and none of them
    /// found a neighbour.
    #[must_use]
    pub fn has_no_adjacency(&self) -> bool {
        self.triangle_count > 1 && self.clusters.len() == self.triangle_count
    }

    /// Check that every position in `0..triangle_count` appears in
    /// exactly one cluster.
    #[must_use]
    pub fn is_partition(&self) -> bool {
        let mut seen = vec![false; self.triangle_count];
        for &idx in self.clusters.iter().flatten() {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Cluster id of every triangle position.
    #[must_use]
    pub fn assignments(&self) -> Vec<usize> {
        let mut out = vec![usize::MAX; self.triangle_count];
        for (cluster, members) in self.clusters.iter().enumerate() {
            for &idx in members {
                if let Some(slot) = out.get_mut(idx) {
                    *slot = cluster;
                }
            }
        }
        out
    }
}

/// Partition triangles into connected components.
///
/// Seeds are taken in ascending order; each seed grows depth-first through
/// a LIFO worklist. The visited set lives here, apart from the triangle
/// geometry, so the same triangles can be clustered again with other
/// parameters.
///
/// # Errors
///
/// Returns [`SplitError::InvalidEpsilon`] for a non-positive or non-finite
/// `params.epsilon`, and [`SplitError::EmptyMesh`] for an empty input.
///
/// # Example
///
/// ```
/// use mesh_split::{ClusterParams, cluster_triangles, extract_triangles};
///
/// // Two triangles sharing an edge, and one far away.
/// let positions = [
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0,
///     100.0, 0.0, 0.0, 101.0, 0.0, 0.0, 100.0, 1.0, 0.0,
/// ];
/// let indices = [0, 1, 2, 1, 3, 2, 4, 5, 6];
/// let triangles = extract_triangles(&positions, &indices).unwrap();
///
/// let clustering = cluster_triangles(&triangles, &ClusterParams::default()).unwrap();
/// assert_eq!(clustering.clusters, vec![vec![0, 1], vec![2]]);
/// ```
pub fn cluster_triangles(
    triangles: &[FaceTriangle],
    params: &ClusterParams,
) -> SplitResult<Clustering> {
    params.validate()?;
    if triangles.is_empty() {
        return Err(SplitError::EmptyMesh);
    }

    let grid = match params.strategy {
        AdjacencyStrategy::SpatialGrid => {
            let grid = VertexGrid::build(triangles, params.epsilon);
            debug!(
                "Bucketed {} triangles into {} grid cells",
                triangles.len(),
                grid.occupied_cells()
            );
            Some(grid)
        }
        AdjacencyStrategy::BruteForce => None,
    };

    let mut visited = vec![false; triangles.len()];
    let mut clusters = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..triangles.len() {
        if visited[seed] {
            continue;
        }

        let mut members = Vec::new();
        visited[seed] = true;
        stack.push(seed);

        while let Some(current) = stack.pop() {
            members.push(current);
            let tri = &triangles[current].triangle;

            let mut consider = |other: usize| {
                if !visited[other] && tri.is_near(&triangles[other].triangle, params.epsilon) {
                    visited[other] = true;
                    stack.push(other);
                }
            };

            match &grid {
                Some(grid) => grid.for_each_candidate(&triangles[current], &mut consider),
                None => (0..triangles.len()).for_each(&mut consider),
            }
        }

        members.sort_unstable();
        clusters.push(members);
    }

    let clustering = Clustering {
        clusters,
        triangle_count: triangles.len(),
    };

    info!(
        "Clustered {} triangles into {} components (epsilon {})",
        clustering.triangle_count,
        clustering.len(),
        params.epsilon
    );
    if clustering.has_no_adjacency() {
        warn!(
            "No two of {} triangles are within {} of each other; every cluster is a singleton",
            clustering.triangle_count, params.epsilon
        );
    }

    Ok(clustering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_triangles;

    /// A small fan of triangles around `origin`, all sharing corner 0.
    fn fan(origin: [f32; 3], count: u32, positions: &mut Vec<f32>, indices: &mut Vec<u32>) {
        let base = (positions.len() / 3) as u32;
        let [x, y, z] = origin;
        positions.extend_from_slice(&[x, y, z]);
        for k in 0..=count {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f32;
            positions.extend_from_slice(&[x + 1.0, y, z + t]);
        }
        for k in 0..count {
            indices.extend_from_slice(&[base, base + 1 + k, base + 2 + k]);
        }
    }

    fn isolated(count: usize, spacing: f32) -> Vec<FaceTriangle> {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for k in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let x = k as f32 * spacing;
            fan([x, 0.0, 0.0], 1, &mut positions, &mut indices);
        }
        extract_triangles(&positions, &indices).expect("valid")
    }

    #[test]
    fn two_groups() {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        fan([0.0, 0.0, 0.0], 3, &mut positions, &mut indices);
        fan([50.0, 0.0, 0.0], 2, &mut positions, &mut indices);
        let tris = extract_triangles(&positions, &indices).expect("valid");

        let clustering = cluster_triangles(&tris, &ClusterParams::default()).expect("clusters");
        assert_eq!(clustering.clusters, vec![vec![0, 1, 2], vec![3, 4]]);
        assert!(clustering.is_partition());
        assert!(!clustering.has_no_adjacency());
    }

    #[test]
    fn isolated_triangles_are_singletons() {
        let tris = isolated(6, 20.0);
        let clustering = cluster_triangles(&tris, &ClusterParams::default()).expect("clusters");
        assert_eq!(clustering.len(), 6);
        assert_eq!(clustering.singleton_count(), 6);
        assert!(clustering.has_no_adjacency());
    }

    #[test]
    fn huge_epsilon_gives_one_cluster() {
        let tris = isolated(6, 20.0);
        let params = ClusterParams::default().with_epsilon(1_000.0);
        let clustering = cluster_triangles(&tris, &params).expect("clusters");
        assert_eq!(clustering.len(), 1);
        assert_eq!(clustering.clusters[0], (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn chain_links_transitively() {
        // Consecutive triangles are 4 apart (within 5) but the ends are 20 apart.
        let tris = isolated(6, 5.0);
        let clustering = cluster_triangles(&tris, &ClusterParams::default()).expect("clusters");
        assert_eq!(clustering.len(), 1);
    }

    #[test]
    fn distance_equal_to_epsilon_is_not_adjacent() {
        // The closest corners are exactly `spacing - 1` apart.
        let tris = isolated(2, 5.0);
        let far = ClusterParams::default().with_epsilon(4.0);
        assert_eq!(cluster_triangles(&tris, &far).expect("clusters").len(), 2);
        let tris = isolated(2, 6.0);
        assert_eq!(
            cluster_triangles(&tris, &ClusterParams::default()).expect("clusters").len(),
            2
        );
    }

    #[test]
    fn strategies_agree() {
        let tris = isolated(12, 4.5);
        let grid = cluster_triangles(&tris, &ClusterParams::default().with_epsilon(4.0))
            .expect("clusters");
        let brute = cluster_triangles(
            &tris,
            &ClusterParams::default()
                .with_epsilon(4.0)
                .with_strategy(AdjacencyStrategy::BruteForce),
        )
        .expect("clusters");
        assert_eq!(grid, brute);
    }

    #[test]
    fn tiny_epsilon_far_from_origin_matches_brute_force() {
        // Coordinate / epsilon is far beyond the i64 range of grid cells.
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        fan([1_000.0, 0.0, -1_000.0], 2, &mut positions, &mut indices);
        fan([2_000.0, 0.0, 0.0], 1, &mut positions, &mut indices);
        let tris = extract_triangles(&positions, &indices).expect("valid");

        let params = ClusterParams::default().with_epsilon(1e-16);
        let grid = cluster_triangles(&tris, &params).expect("clusters");
        let brute = cluster_triangles(
            &tris,
            &params.clone().with_strategy(AdjacencyStrategy::BruteForce),
        )
        .expect("clusters");

        assert_eq!(grid, brute);
        // The fan shares its hub corner, so only the lone triangle splits off.
        assert_eq!(grid.clusters, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn empty_and_invalid_inputs() {
        assert!(matches!(
            cluster_triangles(&[], &ClusterParams::default()),
            Err(SplitError::EmptyMesh)
        ));
        let tris = isolated(1, 1.0);
        assert!(matches!(
            cluster_triangles(&tris, &ClusterParams::default().with_epsilon(0.0)),
            Err(SplitError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn assignments_follow_clusters() {
        let clustering = Clustering {
            clusters: vec![vec![0, 2], vec![1]],
            triangle_count: 3,
        };
        assert_eq!(clustering.assignments(), vec![0, 1, 0]);
        assert!(clustering.is_partition());

        let overlapping = Clustering {
            clusters: vec![vec![0, 1], vec![1]],
            triangle_count: 2,
        };
        assert!(!overlapping.is_partition());
    }
}
