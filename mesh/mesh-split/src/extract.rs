//! Triangle extraction from flat vertex and index buffers.

use mesh_types::Triangle;

use crate::error::{SplitError, SplitResult};

/// A validated, borrowed view of a merged mesh's raw buffers.
///
/// Construction checks that both buffers are made of triplets and that
/// every index addresses an existing vertex, so later stages can index
/// without bounds failures.
#[derive(Debug, Clone, Copy)]
pub struct RawMesh<'a> {
    positions: &'a [f32],
    indices: &'a [u32],
}

impl<'a> RawMesh<'a> {
    /// Validate and wrap raw buffers.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::MalformedMesh`] if either buffer length is not
    /// a multiple of 3 or an index is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_split::RawMesh;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// assert!(RawMesh::new(&positions, &[0, 1, 2]).is_ok());
    /// assert!(RawMesh::new(&positions, &[0, 1, 3]).is_err());
    /// assert!(RawMesh::new(&positions, &[0, 1]).is_err());
    /// ```
    pub fn new(positions: &'a [f32], indices: &'a [u32]) -> SplitResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(SplitError::malformed(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(SplitError::malformed(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let vertex_count = positions.len() / 3;
        if let Some((slot, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(SplitError::malformed(format!(
                "index {index} at slot {slot} is out of range (mesh has {vertex_count} vertices)"
            )));
        }

        Ok(Self { positions, indices })
    }

    /// Number of vertices in the position buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangular faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The raw position triplet of a vertex.
    #[must_use]
    pub fn position(&self, vertex: u32) -> [f32; 3] {
        let i = vertex as usize * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    /// The three vertex indices of a face.
    #[must_use]
    pub fn face(&self, face: usize) -> [u32; 3] {
        let i = face * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Resolve a face into a triangle.
    #[must_use]
    pub fn triangle(&self, face: usize) -> Triangle {
        let [a, b, c] = self.face(face);
        Triangle::from_f32(self.position(a), self.position(b), self.position(c))
    }
}

/// A triangle together with the face it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTriangle {
    /// Index of the source face (`index slot / 3`).
    pub face: usize,
    /// Resolved corner positions.
    pub triangle: Triangle,
}

/// Convert raw buffers into one [`FaceTriangle`] per face, in face order.
///
/// # Errors
///
/// Returns [`SplitError::MalformedMesh`] for inconsistent buffers and
/// [`SplitError::EmptyMesh`] if there are no faces.
///
/// # Example
///
/// ```
/// use mesh_split::extract_triangles;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
/// let triangles = extract_triangles(&positions, &[0, 1, 2, 1, 3, 2]).unwrap();
///
/// assert_eq!(triangles.len(), 2);
/// assert_eq!(triangles[1].face, 1);
/// ```
pub fn extract_triangles(positions: &[f32], indices: &[u32]) -> SplitResult<Vec<FaceTriangle>> {
    let raw = RawMesh::new(positions, indices)?;
    raw_triangles(&raw)
}

/// Same as [`extract_triangles`] for an already validated mesh.
///
/// # Errors
///
/// Returns [`SplitError::EmptyMesh`] if there are no faces.
pub fn raw_triangles(raw: &RawMesh<'_>) -> SplitResult<Vec<FaceTriangle>> {
    if raw.face_count() == 0 {
        return Err(SplitError::EmptyMesh);
    }

    Ok((0..raw.face_count())
        .map(|face| FaceTriangle {
            face,
            triangle: raw.triangle(face),
        })
        .collect())
}
