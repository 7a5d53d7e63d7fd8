//! Construction-time errors.
//!
//! Runtime play has no error path: rejected moves are no-ops and game over is
//! an event. Only a malformed configuration can fail, and it fails before a
//! game exists.

use thiserror::Error;

use crate::types::PieceName;

/// Why a piece matrix was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("matrix has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("side length {0} exceeds the maximum of 4")]
    TooLarge(usize),
    #[error("matrix has no occupied cells")]
    NoOccupiedCells,
}

/// Malformed game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("playfield width must be greater than zero")]
    ZeroWidth,
    #[error("playfield height must be greater than zero")]
    ZeroHeight,
    #[error("piece catalog is empty")]
    EmptyCatalog,
    #[error("piece {0} appears more than once in the catalog")]
    DuplicatePiece(PieceName),
    #[error("invalid shape for piece {name}: {source}")]
    InvalidShape {
        name: PieceName,
        #[source]
        source: ShapeError,
    },
    #[error("playfield width {width} is narrower than the {size}-wide {name} piece")]
    FieldTooNarrow {
        width: usize,
        size: usize,
        name: PieceName,
    },
    #[error("piece {name} spawns at column {col}, outside a {width}-wide field")]
    SpawnOutOfBounds {
        name: PieceName,
        col: i32,
        width: usize,
    },
    #[error("minimum frame rate must be at least 1")]
    ZeroFrameRate,
    #[error("minimum frame rate {min} exceeds maximum frame rate {max}")]
    FrameRateRange { min: u32, max: u32 },
}
