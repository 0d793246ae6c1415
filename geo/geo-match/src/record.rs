//! Building records from the geographic dataset.

use std::fmt;

use nalgebra::Point2;

/// Descriptive attributes of one building.
///
/// Every field is optional: campus datasets are patchy, and a record with
/// nothing but an outline is still joinable.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingAttributes {
    /// Building name.
    pub name: Option<String>,
    /// Building number.
    pub number: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Height in dataset units.
    pub height: Option<f64>,
    /// Footprint area in dataset units.
    pub area: Option<f64>,
    /// Zoning designation.
    pub zone: Option<String>,
    /// Globally unique identifier.
    pub id: Option<String>,
}

impl BuildingAttributes {
    /// Best human-readable label: name, then number, then id.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.number.as_deref())
            .or(self.id.as_deref())
    }
}

/// Exact join key: a centroid rounded to two decimal places on each axis.
///
/// Stored as integer hundredths so that it hashes and compares exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CentroidKey {
    /// `x` in hundredths.
    pub x: i64,
    /// `y` in hundredths.
    pub y: i64,
}

impl CentroidKey {
    /// Round a point to the nearest hundredth on each axis.
    ///
    /// Returns `None` for non-finite coordinates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // geographic values are far below i64 range
    pub fn from_point(p: &Point2<f64>) -> Option<Self> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        Some(Self {
            x: (p.x * 100.0).round() as i64,
            y: (p.y * 100.0).round() as i64,
        })
    }

    /// The rounded point the key stands for.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x as f64 / 100.0, self.y as f64 / 100.0)
    }
}

impl fmt::Display for CentroidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.to_point();
        write!(f, "{:.2},{:.2}", p.x, p.y)
    }
}

/// One building from the dataset: attributes, outline, and join key.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoBuildingRecord {
    /// Descriptive attributes.
    pub attributes: BuildingAttributes,
    /// Outer ring of the footprint polygon.
    pub ring: Vec<Point2<f64>>,
    /// Arithmetic mean of the ring points.
    pub centroid: Point2<f64>,
    /// Rounded centroid, or `None` when the ring is empty.
    pub key: Option<CentroidKey>,
}

impl GeoBuildingRecord {
    /// Create a record, deriving its centroid and key from `ring`.
    #[must_use]
    pub fn new(attributes: BuildingAttributes, ring: Vec<Point2<f64>>) -> Self {
        let centroid = ring_centroid(&ring);
        let key = CentroidKey::from_point(&centroid);
        Self {
            attributes,
            ring,
            centroid,
            key,
        }
    }

    /// Check whether `point` lies inside the footprint.
    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        crate::polygon::point_in_ring(point, &self.ring)
    }
}

/// Arithmetic mean of the ring points.
///
/// A closing point that repeats the first is counted like any other, so
/// the mean leans slightly toward the first vertex. An empty ring gives
/// `NaN` coordinates.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ring_centroid(ring: &[Point2<f64>]) -> Point2<f64> {
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n, sy / n)
}
