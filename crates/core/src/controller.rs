//! Placement controller - moves, rotates and locks the active piece
//!
//! The controller owns the playfield, the active piece, the one-piece lookahead
//! and the sequencer that refills it. It has two states:
//!
//! - **Falling**: an active piece exists and input is accepted.
//! - **GameOver**: terminal. Every operation is a no-op.
//!
//! Rejected moves are normal play and simply return `false`. A failed soft
//! drop locks the piece; locking promotes the lookahead to active, draws a new
//! lookahead and ends the game if the promoted piece overlaps the stack.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace};

use crate::catalog::PieceCatalog;
use crate::piece::ActivePiece;
use crate::playfield::Playfield;
use crate::sequencer::PieceSequencer;
use crate::types::PieceName;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Falling,
    GameOver,
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    /// The piece that locked
    pub name: PieceName,
    pub row: i32,
    pub col: i32,
    /// Rows removed by this lock
    pub rows_cleared: usize,
    /// Field width, for scoring
    pub width: usize,
    /// The promoted piece collided at its spawn point
    pub game_over: bool,
}

/// Result of a soft drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved one row down
    Moved,
    /// The piece could not move and was locked
    Locked(LockReport),
    /// The game is over; nothing happened
    Ignored,
}

/// Orchestrates one active piece against the playfield.
#[derive(Debug, Clone)]
pub struct PlacementController<R = StdRng> {
    playfield: Playfield,
    catalog: PieceCatalog,
    sequencer: PieceSequencer<R>,
    active: ActivePiece,
    next: ActivePiece,
    state: ControllerState,
}

impl<R: Rng> PlacementController<R> {
    /// Draw the first active piece and its lookahead.
    ///
    /// `sequencer` must have been built from `catalog`.
    pub fn new(playfield: Playfield, catalog: PieceCatalog, mut sequencer: PieceSequencer<R>) -> Self {
        let width = playfield.width();
        let active = draw(&mut sequencer, &catalog, width);
        let next = draw(&mut sequencer, &catalog, width);
        Self {
            playfield,
            catalog,
            sequencer,
            active,
            next,
            state: ControllerState::Falling,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == ControllerState::GameOver
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// The lookahead piece, at its spawn position
    pub fn next(&self) -> &ActivePiece {
        &self.next
    }

    pub fn sequencer(&self) -> &PieceSequencer<R> {
        &self.sequencer
    }

    /// Shift the active piece by `offset` columns if it fits.
    pub fn move_horizontal(&mut self, offset: i32) -> bool {
        if self.is_game_over() {
            return false;
        }
        let col = self.active.col + offset;
        if self
            .playfield
            .is_valid_placement(self.active.shape(), self.active.row, col)
        {
            self.active.col = col;
            true
        } else {
            trace!(offset, col = self.active.col, "move rejected");
            false
        }
    }

    /// Rotate the active piece clockwise in place if the result fits.
    pub fn rotate(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let rotated = self.active.piece.rotated();
        if self
            .playfield
            .is_valid_placement(&rotated.shape, self.active.row, self.active.col)
        {
            self.active.piece = rotated;
            true
        } else {
            trace!(name = %self.active.name(), "rotation rejected");
            false
        }
    }

    /// Move down one row, or lock if the row below is blocked.
    pub fn soft_drop(&mut self) -> DropOutcome {
        if self.is_game_over() {
            return DropOutcome::Ignored;
        }
        let row = self.active.row + 1;
        if self
            .playfield
            .is_valid_placement(self.active.shape(), row, self.active.col)
        {
            self.active.row = row;
            DropOutcome::Moved
        } else {
            match self.lock() {
                Some(report) => DropOutcome::Locked(report),
                None => DropOutcome::Ignored,
            }
        }
    }

    /// Commit the active piece where it is, clear rows and bring in the next
    /// piece. Returns `None` once the game is over.
    pub fn lock(&mut self) -> Option<LockReport> {
        if self.is_game_over() {
            return None;
        }

        let locked = &self.active;
        self.playfield
            .commit(locked.shape(), locked.name(), locked.row, locked.col);
        let rows_cleared = self.playfield.clear_full_rows();

        let mut report = LockReport {
            name: locked.name(),
            row: locked.row,
            col: locked.col,
            rows_cleared,
            width: self.playfield.width(),
            game_over: false,
        };

        let width = self.playfield.width();
        let incoming = draw(&mut self.sequencer, &self.catalog, width);
        self.active = std::mem::replace(&mut self.next, incoming);

        if !self
            .playfield
            .is_valid_placement(self.active.shape(), self.active.row, self.active.col)
        {
            self.state = ControllerState::GameOver;
            report.game_over = true;
        }

        debug!(
            name = %report.name,
            row = report.row,
            col = report.col,
            rows_cleared,
            game_over = report.game_over,
            "piece locked"
        );
        Some(report)
    }

    #[cfg(test)]
    pub(crate) fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    #[cfg(test)]
    pub(crate) fn active_mut(&mut self) -> &mut ActivePiece {
        &mut self.active
    }
}

fn draw<R: Rng>(sequencer: &mut PieceSequencer<R>, catalog: &PieceCatalog, width: usize) -> ActivePiece {
    sequencer
        .next_spawn(catalog, width)
        .expect("sequencer draws names from the controller's catalog")
}
