//! Shape module - square piece matrices and clockwise rotation
//!
//! Every piece is modelled as an N×N boolean matrix (N = 2, 3 or 4), including
//! the asymmetric ones, so a single rotation routine covers all seven kinds.
//! The O piece is 2×2 and maps onto itself under rotation.

use crate::types::PieceKind;

/// Largest bounding box side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Occupied cells of a piece inside its local bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Spawn orientation of the given kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_pattern(&["....", "....", "####", "...."]),
            PieceKind::O => Self::from_pattern(&["##", "##"]),
            PieceKind::T => Self::from_pattern(&["...", ".#.", "###"]),
            PieceKind::S => Self::from_pattern(&["...", ".##", "##."]),
            PieceKind::Z => Self::from_pattern(&["...", "##.", ".##"]),
            PieceKind::J => Self::from_pattern(&["...", "..#", "###"]),
            PieceKind::L => Self::from_pattern(&["...", "#..", "###"]),
        }
    }

    /// Build a shape from rows of `#` (occupied) and any other byte (empty).
    ///
    /// The side length is the number of rows, capped at [`MAX_SHAPE_SIZE`];
    /// anything beyond the square is ignored.
    pub fn from_pattern(rows: &[&str]) -> Self {
        let size = rows.len().min(MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, line) in rows.iter().take(size).enumerate() {
            for (column, byte) in line.bytes().take(size).enumerate() {
                cells[row][column] = byte == b'#';
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn is_set(&self, row: usize, column: usize) -> bool {
        row < self.size() && column < self.size() && self.cells[row][column]
    }

    /// Occupied cells as `(row, column)` offsets from the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let size = self.size();
        (0..size).flat_map(move |row| {
            (0..size)
                .filter(move |&column| self.cells[row][column])
                .map(move |column| (row as i8, column as i8))
        })
    }

    /// Rotate 90° clockwise: `new[column][size - 1 - row] = old[row][column]`
    pub fn rotate_cw(&self) -> Self {
        let size = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, line) in self.cells.iter().enumerate().take(size) {
            for (column, &set) in line.iter().enumerate().take(size) {
                cells[column][size - 1 - row] = set;
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}
