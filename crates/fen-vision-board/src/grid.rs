//! 8x8 partition of the canonical rectangle and point-to-cell assignment.

use fen_vision_core::CanonicalSize;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cells per board side.
pub const BOARD_SIZE: usize = 8;

/// Grid cell index; row 0 is the top row of the canonical frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: u8,
    pub col: u8,
}

impl CellIndex {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then(|| Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Self { row, col }))
    }

    /// Algebraic square name assuming the top row is rank 8 and the left
    /// column is file a.
    pub fn square_name(&self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE as u8 - self.row;
        format!("{file}{rank}")
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One grid cell as a polygon in canonical coordinates, vertices in
/// (top-left, top-right, bottom-right, bottom-left) order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub index: CellIndex,
    pub polygon: [Point2<f64>; 4],
}

impl Cell {
    #[inline]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        point_in_polygon(p, &self.polygon)
    }
}

/// Even-odd ray-casting containment test.
///
/// An edge counts as crossed when `min_y < p.y <= max_y`, `p.x <= max_x`
/// and `p.x` is left of (or on) the edge. For axis-aligned boxes this
/// yields the half-open region `(x0, x1] x (y0, y1]`: points on the top
/// or left border belong to the neighbouring cell.
pub fn point_in_polygon(p: Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for k in 0..n {
        let a = polygon[k];
        let b = polygon[(k + 1) % n];
        // The strict/non-strict y bounds never hold for horizontal edges.
        if p.y > a.y.min(b.y) && p.y <= a.y.max(b.y) && p.x <= a.x.max(b.x) {
            let crosses = a.x == b.x || p.x <= (p.y - a.y) * (b.x - a.x) / (b.y - a.y) + a.x;
            if crosses {
                inside = !inside;
            }
        }
    }
    inside
}

/// The 64 cells covering a canonical rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardGrid {
    size: CanonicalSize,
    cells: Vec<Cell>,
}

impl BoardGrid {
    /// Split `[0, width] x [0, height]` into 8x8 equal cells.
    pub fn partition(size: CanonicalSize) -> Self {
        let xs = grid_lines(size.width);
        let ys = grid_lines(size.height);

        let cells = CellIndex::all()
            .map(|index| {
                let (r, c) = (index.row as usize, index.col as usize);
                let (x0, x1, y0, y1) = (xs[c], xs[c + 1], ys[r], ys[r + 1]);
                Cell {
                    index,
                    polygon: [
                        Point2::new(x0, y0),
                        Point2::new(x1, y0),
                        Point2::new(x1, y1),
                        Point2::new(x0, y1),
                    ],
                }
            })
            .collect();

        Self { size, cells }
    }

    #[inline]
    pub fn size(&self) -> CanonicalSize {
        self.size
    }

    /// Cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.row as usize * BOARD_SIZE + index.col as usize]
    }

    /// First cell (row-major) whose polygon contains `p`.
    pub fn assign(&self, p: Point2<f64>) -> Option<CellIndex> {
        self.cells.iter().find(|c| c.contains(p)).map(|c| c.index)
    }
}

fn grid_lines(extent: u32) -> [f64; BOARD_SIZE + 1] {
    let extent = extent as f64;
    std::array::from_fn(|i| i as f64 / BOARD_SIZE as f64 * extent)
}
