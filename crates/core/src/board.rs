//! Board module - manages the game grid
//!
//! The board is a `columns x rows` grid where each cell is empty or holds the
//! color token of the piece that locked into it. Storage is a flat row-major
//! vector sized once at construction; dimensions never change afterwards.
//!
//! Coordinates: (x, y) where x grows to the right and y grows downwards, with
//! row 0 at the top. Rows above the board (`y < 0`) are open space: they never
//! collide and locks into them are discarded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shapes::Shape;
use crate::types::{Cell, ColorToken};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single cell position blocks a piece.
    ///
    /// Walls and the floor block, as do locked cells. Anything above the
    /// board is free.
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        if x < 0 || x as usize >= self.width {
            return true;
        }
        if y < 0 {
            return false;
        }
        if y as usize >= self.height {
            return true;
        }
        self.is_occupied(x, y)
    }

    /// Check whether `shape` placed with its top-left corner at (x, y) collides
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape
            .offsets()
            .iter()
            .any(|&(dx, dy)| self.blocks(x + dx, y + dy))
    }

    /// Lock a shape into the board with the given color.
    ///
    /// Cells above the board are dropped silently. Cells that are already
    /// occupied keep their existing color, so locked cells are write-once
    /// until a line clear removes them. Returns the number of cells written.
    pub fn lock(&mut self, shape: &Shape, x: i32, y: i32, color: ColorToken) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.offsets() {
            let Some(idx) = self.index(x + dx, y + dy) else {
                continue;
            };
            if self.cells[idx].is_none() {
                self.cells[idx] = Some(color);
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Get a row slice
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Remove row `y`, shift every row above it down by one and empty the top row
    fn remove_row(&mut self, y: usize) {
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Scans from the bottom row upwards. After removing a full row the same
    /// index is examined again, since it now holds the row that was above it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// FNV-1a 64-bit hash over the locked grid.
    ///
    /// Each cell contributes one byte: 0 for empty, the opacity token otherwise.
    pub fn grid_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for cell in &self.cells {
            let b = cell.map_or(0, |c| c.opacity_percent().max(1));
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for cell in self.row(y) {
                f.write_str(if cell.is_some() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
