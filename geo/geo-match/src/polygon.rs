//! Point-in-polygon containment.

use nalgebra::Point2;

/// Even-odd ray-casting test of `point` against a closed ring.
///
/// The ring is implicitly closed (last point connects back to the first);
/// a repeated closing point, as GeoJSON writes it, is harmless. Rings with
/// fewer than 3 points contain nothing.
///
/// # Example
///
/// ```
/// use geo_match::point_in_ring;
/// use nalgebra::Point2;
///
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ];
/// assert!(point_in_ring(&Point2::new(2.0, 2.0), &square));
/// assert!(!point_in_ring(&Point2::new(5.0, 2.0), &square));
/// ```
#[must_use]
pub fn point_in_ring(point: &Point2<f64>, ring: &[Point2<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&ring[i], &ring[j]);
        // Does the ray from `point` going +x cross edge (j, i)?
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
