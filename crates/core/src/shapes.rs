//! Shapes module - tetromino shape table and the rotation operator
//!
//! Every shape is a 4x4 occupancy matrix stored row-major (`cells[y][x]`).
//! Orientation is implicit: a rotated piece simply carries a rotated matrix.
//! There is no rotation-state bookkeeping and no kick table; see
//! [`crate::game_state::GameState::rotate`] for the one-column kick.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{ShapeKind, SHAPE_SIZE};

/// Offset of an occupied cell relative to the shape's top-left corner
pub type CellOffset = (i32, i32);

/// A 4x4 occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    cells: [[bool; SHAPE_SIZE]; SHAPE_SIZE],
}

const fn matrix(rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE]) -> Shape {
    let mut cells = [[false; SHAPE_SIZE]; SHAPE_SIZE];
    let mut y = 0;
    while y < SHAPE_SIZE {
        let mut x = 0;
        while x < SHAPE_SIZE {
            cells[y][x] = rows[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape { cells }
}

/// Base shapes, indexed by [`ShapeKind::index`]
pub const SHAPES: [Shape; 7] = [
    // I
    matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // O
    matrix([[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // T
    matrix([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // L
    matrix([[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // J
    matrix([[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // S
    matrix([[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // Z
    matrix([[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
];

/// Get the base (unrotated) shape for a kind
pub fn base_shape(kind: ShapeKind) -> Shape {
    SHAPES[kind.index()]
}

/// Rotate a matrix 90° clockwise: `new[x][n-1-y] = old[y][x]`
pub fn rotate_cw(shape: &Shape) -> Shape {
    let n = SHAPE_SIZE;
    let mut cells = [[false; SHAPE_SIZE]; SHAPE_SIZE];
    for y in 0..n {
        for x in 0..n {
            cells[x][n - 1 - y] = shape.cells[y][x];
        }
    }
    Shape { cells }
}

impl Shape {
    /// Build a shape from raw rows, mostly for tests and tooling
    pub const fn from_rows(rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        matrix(rows)
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < SHAPE_SIZE && y < SHAPE_SIZE && self.cells[y][x]
    }

    pub fn rows(&self) -> &[[bool; SHAPE_SIZE]; SHAPE_SIZE] {
        &self.cells
    }

    /// This shape rotated clockwise `times` quarter turns
    pub fn rotated(&self, times: u8) -> Self {
        let mut shape = *self;
        for _ in 0..(times % 4) {
            shape = rotate_cw(&shape);
        }
        shape
    }

    /// Offsets of the occupied cells, row by row
    ///
    /// Stack-only; the hot collision path never allocates.
    pub fn offsets(&self) -> ArrayVec<CellOffset, 16> {
        let mut out = ArrayVec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, filled) in row.iter().enumerate() {
                if *filled {
                    out.push((x as i32, y as i32));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_base_shape_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(base_shape(kind).cell_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_i_piece_becomes_vertical_column_two() {
        let rotated = rotate_cw(&base_shape(ShapeKind::I));
        assert_eq!(rotated.offsets().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotate_t_piece_once() {
        // .#..      ..#.
        // ###.  ->  ..##
        // ....      ..#.
        let rotated = rotate_cw(&base_shape(ShapeKind::T));
        assert_eq!(
            rotated,
            Shape::from_rows([[0, 0, 1, 0], [0, 0, 1, 1], [0, 0, 1, 0], [0, 0, 0, 0]])
        );
    }

    #[test]
    fn test_rotated_wraps_modulo_four() {
        let t = base_shape(ShapeKind::T);
        assert_eq!(t.rotated(4), t);
        assert_eq!(t.rotated(5), t.rotated(1));
    }

    #[test]
    fn test_offsets_are_row_major() {
        let s = base_shape(ShapeKind::S);
        assert_eq!(s.offsets().as_slice(), &[(1, 0), (2, 0), (0, 1), (1, 1)]);
    }
}
