//! Model-to-geographic coordinate transform.
//!
//! Models are Y-up, so the horizontal plane is X/Z. A model point maps to
//! geographic space as `geo = model.(x, z) * scale + offset`.

use nalgebra::{Point2, Point3, Vector2};

/// Default model-units-to-geographic-units scale.
pub const DEFAULT_SCALE: f64 = 1e-4;

/// Per-axis affine map from the model's horizontal plane to geographic
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoTransform {
    /// Multiplier on model `x` and `z`.
    pub scale: Vector2<f64>,
    /// Added after scaling.
    pub offset: Vector2<f64>,
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::uniform(DEFAULT_SCALE, Vector2::zeros())
    }
}

impl GeoTransform {
    /// Create a transform with separate scales per axis.
    #[must_use]
    pub const fn new(scale: Vector2<f64>, offset: Vector2<f64>) -> Self {
        Self { scale, offset }
    }

    /// Create a transform with the same scale on both axes.
    #[must_use]
    pub fn uniform(scale: f64, offset: Vector2<f64>) -> Self {
        Self::new(Vector2::new(scale, scale), offset)
    }

    /// Transform that maps the model's horizontal `center` to the geographic
    /// origin.
    #[must_use]
    pub fn centered_on(center: Point2<f64>, scale: f64) -> Self {
        Self::uniform(scale, -center.coords * scale)
    }

    /// Map a horizontal model point to geographic coordinates.
    #[must_use]
    pub fn to_geo(&self, model: &Point2<f64>) -> Point2<f64> {
        Point2::from(model.coords.component_mul(&self.scale) + self.offset)
    }

    /// Map a 3D model point to geographic coordinates, dropping height.
    #[must_use]
    pub fn project(&self, model: &Point3<f64>) -> Point2<f64> {
        self.to_geo(&Point2::new(model.x, model.z))
    }

    /// Map geographic coordinates back to the model's horizontal plane.
    ///
    /// Returns `None` if either scale is zero or the result is not finite.
    #[must_use]
    pub fn to_model(&self, geo: &Point2<f64>) -> Option<Point2<f64>> {
        if self.scale.x == 0.0 || self.scale.y == 0.0 {
            return None;
        }
        let p = Point2::from((geo.coords - self.offset).component_div(&self.scale));
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }
}
