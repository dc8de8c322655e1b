//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a piece kind.
//! Cells are stored in a flat row-major array, so width and height are fixed
//! by the type: no operation can change the board's dimensions.
//!
//! Coordinates are `(row, column)`: row 0 is the top (spawn area) and rows
//! grow downward; column 0 is the left wall.

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + column)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, column: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || column < 0 || column >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (column as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get the cell at `(row, column)`, `None` if out of bounds
    pub fn get(&self, row: i8, column: i8) -> Option<Cell> {
        Self::index(row, column).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(row, column)`; returns false if out of bounds
    pub fn set(&mut self, row: i8, column: i8, cell: Cell) -> bool {
        match Self::index(row, column) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// One row of cells, left to right
    ///
    /// # Panics
    ///
    /// Panics if `row >= BOARD_HEIGHT`.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * WIDTH..(row + 1) * WIDTH]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// The collision predicate.
    ///
    /// True iff some occupied cell of `shape`, translated by `(row, column)`,
    /// lies left of column 0, right of the last column, at or below the bottom
    /// edge, or on a non-empty board cell. There is no top bound: cells above
    /// row 0 only collide through the side walls.
    pub fn collides(&self, shape: &Shape, row: i8, column: i8) -> bool {
        shape.cells().any(|(dr, dc)| {
            let r = row + dr;
            let c = column + dc;
            if c < 0 || c >= BOARD_WIDTH as i8 || r >= BOARD_HEIGHT as i8 {
                return true;
            }
            match Self::index(r, c) {
                Some(idx) => self.cells[idx].is_some(),
                None => false,
            }
        })
    }

    /// Write the occupied cells of `shape` at `(row, column)` as `kind`.
    ///
    /// Cells falling outside the grid are skipped.
    pub fn merge(&mut self, shape: &Shape, row: i8, column: i8, kind: PieceKind) {
        for (dr, dc) in shape.cells() {
            self.set(row + dr, column + dc, Some(kind));
        }
    }

    /// Remove every full row, shift the rows above down, and backfill the top
    /// with empty rows.
    ///
    /// Returns the removed row indices (pre-clear coordinates), bottom to top.
    /// Uses a two-pointer compaction with no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, HEIGHT> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_row = HEIGHT;

        // Scan from bottom to top
        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
                }
            }
        }

        // Everything above the last kept row is vacated
        for cell in &mut self.cells[..write_row * WIDTH] {
            *cell = None;
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Copy into a 2D grid (render snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
