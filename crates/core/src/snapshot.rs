use crate::piece::{ActivePiece, Shape};
use crate::types::{Cell, PieceName};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub name: PieceName,
    pub shape: Shape,
    pub row: i32,
    pub col: i32,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            name: value.name(),
            shape: value.shape().clone(),
            row: value.row,
            col: value.col,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute (row, col) of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(move |(r, c)| (self.row + r, self.col + c))
    }
}

/// Owned copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major locked cells
    pub cells: Vec<Cell>,
    /// Falling piece; `None` once the game is over
    pub active: Option<ActiveSnapshot>,
    pub next: ActiveSnapshot,
    pub score: u64,
    pub level: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Locked cell at (row, col); `None` outside the field or when empty.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells[row * self.width + col]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = cell;
        }
    }
}
