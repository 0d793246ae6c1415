//! Segmentation of a merged mesh into connected components.
//!
//! A campus model often arrives as one mesh with every building fused
//! into the same vertex and index buffers. This crate recovers the
//! individual buildings from geometry alone:
//!
//! 1. [`extract_triangles`] resolves the flat buffers into triangles
//! 2. [`cluster_triangles`] groups triangles whose corners lie within a
//!    distance threshold of each other, transitively
//! 3. [`rebuild_clusters`] copies each group into a compact mesh with
//!    exact-match vertex deduplication and fresh normals
//!
//! [`split_mesh`] runs all three.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no rendering dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_split::{ClusterParams, split_mesh};
//!
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
//! let split = split_mesh(&positions, &[0, 2, 1], &ClusterParams::default()).unwrap();
//!
//! assert_eq!(split.clustering.len(), 1);
//! assert_eq!(split.meshes[0].triangle_count(), 1);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cluster;
mod error;
mod extract;
mod grid;
mod params;
mod rebuild;
mod split;

pub use cluster::{Clustering, cluster_triangles};
pub use error::{SplitError, SplitResult};
pub use extract::{FaceTriangle, RawMesh, extract_triangles, raw_triangles};
pub use params::{AdjacencyStrategy, ClusterParams, DEFAULT_EPSILON};
pub use rebuild::{ClusterMesh, RebuildOutput, rebuild_cluster, rebuild_clusters};
pub use split::{SplitOutput, split_mesh};
