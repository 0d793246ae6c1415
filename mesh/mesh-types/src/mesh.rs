//! Indexed triangle mesh.

use crate::{Aabb, Triangle};
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. `normals` is either empty or holds one unit normal
/// per vertex (see [`IndexedMesh::compute_vertex_normals`]).
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Point3};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,

    /// Per-vertex unit normals, empty until computed.
    pub normals: Vec<Vector3<f64>>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            normals: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces, without normals.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face, or any vertex it references, is out of
    /// bounds.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            *self.vertices.get(i0 as usize)?,
            *self.vertices.get(i1 as usize)?,
            *self.vertices.get(i2 as usize)?,
        ))
    }

    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Recompute per-vertex normals from the face topology.
    ///
    /// Each vertex normal is the normalized sum of the unnormalized normals
    /// of its incident faces, so larger faces weigh more. Vertices touched
    /// only by degenerate faces get a zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];

        for face_index in 0..self.faces.len() {
            let Some(tri) = self.triangle(face_index) else {
                continue;
            };
            let n = tri.normal_unnormalized();
            for &v in &self.faces[face_index] {
                sums[v as usize] += n;
            }
        }

        self.normals = sums
            .into_iter()
            .map(|n| n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros))
            .collect();
    }

    /// Flatten vertex positions into an `[x0, y0, z0, x1, ...]` buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // positions originate from f32 buffers
    pub fn positions_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Flatten faces into an index buffer.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }

    /// Check whether two vertices share exactly equal coordinates.
    ///
    /// `0.0` and `-0.0` compare equal.
    #[must_use]
    pub fn has_duplicate_vertices(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.vertices.len());
        !self
            .vertices
            .iter()
            .all(|p| seen.insert([p.x + 0.0, p.y + 0.0, p.z + 0.0].map(f64::to_bits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn mesh_is_empty() {
        assert!(IndexedMesh::new().is_empty());
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Point3::origin());
        assert!(mesh.is_empty());
        assert!(!quad().is_empty());
    }

    #[test]
    fn triangle_out_of_bounds() {
        let mut mesh = quad();
        mesh.faces.push([0, 1, 9]);
        assert!(mesh.triangle(2).is_none());
        assert!(mesh.triangle(1).is_some());
    }

    #[test]
    fn flat_quad_normals_point_up() {
        let mut mesh = quad();
        mesh.compute_vertex_normals();
        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            assert_relative_eq!(n.z, 1.0);
        }
    }

    #[test]
    fn flat_buffers() {
        let mesh = quad();
        assert_eq!(mesh.indices(), vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.positions_f32().len(), 12);
        assert_eq!(mesh.positions_f32()[3], 1.0);
    }

    #[test]
    fn duplicate_detection() {
        let mut mesh = quad();
        assert!(!mesh.has_duplicate_vertices());
        mesh.vertices.push(Point3::new(-0.0, 0.0, 0.0));
        assert!(mesh.has_duplicate_vertices());
    }

    #[test]
    fn bounds_of_quad() {
        let b = quad().bounds();
        assert_eq!(b.min, Point3::origin());
        assert_eq!(b.max, Point3::new(1.0, 1.0, 0.0));
    }
}
