//! Piece module - square occupancy matrices and their rotation
//!
//! A shape is an N×N boolean matrix (N is 2, 3 or 4 for the standard set).
//! Shapes are immutable values: rotating produces a new matrix, so the active
//! piece and the next-piece preview never share mutable state.

use crate::error::ShapeError;
use crate::types::{PieceName, MAX_SHAPE_SIZE};

/// Square occupancy matrix, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values (any non-zero value is occupied).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let o = Shape::from_rows(&[[1, 1], [1, 1]]).unwrap();
    /// assert_eq!(o.size(), 2);
    /// assert!(Shape::from_rows(&[[0, 0], [0, 0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let size = rows.len();
        if size == 0 {
            return Err(ShapeError::Empty);
        }
        if size > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge(size));
        }
        for (row, r) in rows.iter().enumerate() {
            let len = r.as_ref().len();
            if len != size {
                return Err(ShapeError::NotSquare { row, len, size });
            }
        }

        let shape = Self::from_rows_unchecked(rows);
        if shape.cells.iter().all(|&c| !c) {
            return Err(ShapeError::NoOccupiedCells);
        }
        Ok(shape)
    }

    /// Build from rows already known to be square and non-empty.
    pub(crate) fn from_rows_unchecked<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let size = rows.len();
        let cells = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().map(|&v| v != 0))
            .collect();
        Self { size, cells }
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at (row, col) is occupied. Out of range is empty.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col]
    }

    /// One row of the matrix.
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Offsets (row, col) of every occupied cell, top to bottom, left to right.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &filled)| filled)
            .map(move |(i, _)| ((i / size) as i32, (i % size) as i32))
    }

    /// 90° clockwise rotation: `R[i][j] = M[N-1-j][i]`.
    ///
    /// Pure and unchecked; the caller validates the result against the
    /// playfield before using it.
    pub fn rotated(&self) -> Shape {
        let n = self.size;
        let mut cells = vec![false; n * n];
        for i in 0..n {
            for j in 0..n {
                cells[i * n + j] = self.cells[(n - 1 - j) * n + i];
            }
        }
        Shape { size: n, cells }
    }
}

/// A named shape in its current rotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub name: PieceName,
    pub shape: Shape,
}

impl Piece {
    pub fn new(name: PieceName, shape: Shape) -> Self {
        Self { name, shape }
    }

    /// The same piece turned 90° clockwise.
    pub fn rotated(&self) -> Piece {
        Piece {
            name: self.name,
            shape: self.shape.rotated(),
        }
    }
}

/// A piece positioned on the playfield.
///
/// `row`/`col` address the top-left corner of the piece matrix. Rows may be
/// negative while the piece is still in the spawn buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    pub fn new(piece: Piece, row: i32, col: i32) -> Self {
        Self { piece, row, col }
    }

    pub fn name(&self) -> PieceName {
        self.piece.name
    }

    pub fn shape(&self) -> &Shape {
        &self.piece.shape
    }

    /// Absolute (row, col) of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.piece
            .shape
            .occupied()
            .map(move |(r, c)| (self.row + r, self.col + c))
    }
}
