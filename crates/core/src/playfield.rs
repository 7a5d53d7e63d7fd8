//! Playfield module - the grid collecting locked pieces
//!
//! The field is `height` rows × `width` columns, stored as a flat row-major
//! array. Coordinates are (row, col) with row 0 at the top. Rows -1 and -2 form
//! the spawn buffer: they are never stored and always read as empty, so a piece
//! may hang partly above the visible field.

use crate::error::ConfigError;
use crate::piece::Shape;
use crate::types::{Cell, PieceName};

/// The playfield grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty field.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at (row, col)
    /// Returns None if outside the stored field
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if outside the stored field
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if (row, col) holds a locked cell
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Whether `shape` fits with its top-left corner at (row, col).
    ///
    /// Every occupied cell must lie within the column range and above the
    /// floor. Cells in the spawn buffer (negative rows) skip the occupancy
    /// check since nothing is ever stored there.
    pub fn is_valid_placement(&self, shape: &Shape, row: i32, col: i32) -> bool {
        shape.occupied().all(|(dr, dc)| {
            let r = row + dr;
            let c = col + dc;
            if c < 0 || c as usize >= self.width || r >= self.height as i32 {
                return false;
            }
            r < 0 || !self.is_occupied(r, c)
        })
    }

    /// Write `name` into every occupied cell of `shape` at (row, col).
    ///
    /// Cells still in the spawn buffer are dropped. Returns the number of cells
    /// written.
    pub fn commit(&mut self, shape: &Shape, name: PieceName, row: i32, col: i32) -> usize {
        let mut written = 0;
        for (dr, dc) in shape.occupied() {
            if row + dr < 0 {
                continue;
            }
            if self.set(row + dr, col + dc, Some(name)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row and collapse the rows above it.
    ///
    /// Scans bottom to top with a read and a write cursor: surviving rows are
    /// copied down to the write cursor, full rows are skipped. Whatever is left
    /// above the write cursor is reset to empty. Returns the number of rows
    /// removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_row = self.height;
        let mut cleared = 0;

        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    let dst_start = write_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Vacated rows at the top.
        self.cells[..write_row * width].fill(None);

        cleared
    }

    /// One row of cells
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of locked cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
