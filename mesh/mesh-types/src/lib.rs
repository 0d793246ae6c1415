//! Core geometric types for campus mesh segmentation.
//!
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices and normals
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Material`] - The per-mesh display material
//!
//! # Layer 0
//!
//! No rendering dependencies. Everything here is plain data that the
//! segmentation and matching crates pass around.
//!
//! # Coordinate System
//!
//! Models are **Y-up**. The ground plane is spanned by X and Z, which is
//! what [`Aabb::horizontal_center`] projects onto.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Point3};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 0.0, 1.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod material;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use material::{Color, Material};
pub use mesh::IndexedMesh;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};
