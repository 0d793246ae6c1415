//! Spatial hash over triangle corners.
//!
//! Cells are cubes with edge `epsilon`. Two corners closer than `epsilon`
//! differ by less than one cell on every axis, so every adjacent triangle
//! owns a corner in the 3x3x3 block around some corner of the query.
//!
//! Cell coordinates saturate at the `i64` range. Saturation is monotone, so
//! the neighbourhood property still holds; far-out corners merely share
//! boundary cells and are filtered by the exact predicate.

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::extract::FaceTriangle;

type Cell = (i64, i64, i64);

/// Corner-to-triangle lookup keyed by grid cell.
#[derive(Debug, Clone)]
pub(crate) struct VertexGrid {
    cell_size: f64,
    cells: HashMap<Cell, Vec<usize>>,
}

impl VertexGrid {
    /// Bucket every corner of every triangle.
    ///
    /// `cell_size` must be positive and finite.
    pub(crate) fn build(triangles: &[FaceTriangle], cell_size: f64) -> Self {
        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();

        for (idx, tri) in triangles.iter().enumerate() {
            let mut own: [Option<Cell>; 3] = [None; 3];
            for (slot, corner) in tri.triangle.vertices().iter().enumerate() {
                let cell = pos_to_cell(corner, cell_size);
                // A triangle lies in a cell once, however many corners fall there.
                if own[..slot].contains(&Some(cell)) {
                    continue;
                }
                own[slot] = Some(cell);
                cells.entry(cell).or_default().push(idx);
            }
        }

        Self { cell_size, cells }
    }

    /// Call `visit` for every triangle owning a corner in the neighbourhood
    /// of any corner of `tri`.
    ///
    /// A candidate may be reported more than once, and the query triangle
    /// itself is reported too; callers filter with their visited set.
    pub(crate) fn for_each_candidate(&self, tri: &FaceTriangle, mut visit: impl FnMut(usize)) {
        for corner in &tri.triangle.vertices() {
            let cell = pos_to_cell(corner, self.cell_size);

            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let neighbor_cell = (
                            cell.0.saturating_add(dx),
                            cell.1.saturating_add(dy),
                            cell.2.saturating_add(dz),
                        );
                        if let Some(candidates) = self.cells.get(&neighbor_cell) {
                            for &other in candidates {
                                visit(other);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Number of occupied cells.
    pub(crate) fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

/// Convert position to spatial hash cell.
#[allow(clippy::cast_possible_truncation)] // saturating float-to-int casts are fine for bucketing
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> Cell {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}
