//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Stores resolved positions rather than indices, so it can be compared
/// against other triangles without access to the source buffers.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert_eq!(tri.normal_unnormalized().z, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from single-precision coordinate triplets.
    ///
    /// The widening to `f64` is exact, so equality of the source
    /// coordinates is preserved.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let tri = Triangle::from_f32([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    /// assert_eq!(tri.v1.x, 1.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_f32(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Self {
        let widen = |p: [f32; 3]| Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]));
        Self {
            v0: widen(v0),
            v1: widen(v1),
            v2: widen(v2),
        }
    }

    /// The three corners in winding order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Check whether any corner of `self` lies strictly closer than
    /// `distance` to any corner of `other`.
    ///
    /// The relation is symmetric. Triangles sharing a corner are always
    /// near for a positive `distance`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle;
    ///
    /// let a = Triangle::from_f32([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    /// let b = Triangle::from_f32([4.0, 0.0, 0.0], [9.0, 0.0, 0.0], [4.0, 5.0, 0.0]);
    ///
    /// assert!(a.is_near(&b, 5.0));   // (1,0,0) to (4,0,0) is 3 units
    /// assert!(!a.is_near(&b, 3.0));  // strict comparison
    /// ```
    #[must_use]
    pub fn is_near(&self, other: &Self, distance: f64) -> bool {
        let limit = distance * distance;
        self.vertices()
            .iter()
            .any(|a| other.vertices().iter().any(|b| (a - b).norm_squared() < limit))
    }
}
