//! Core game logic - playfield, pieces, scoring and the game session
//!
//! Everything here is deterministic given a seeded random source and has no
//! dependency on terminals or files. Front-ends drive a [`Game`] with
//! [`Game::tick`] and [`Game::apply`] and observe it through the
//! [`NotificationBus`] and [`Game::snapshot`].
//!
//! # Module Structure
//!
//! - [`playfield`]: the grid, placement checks, commits and row clearing
//! - [`piece`]: square shapes and clockwise rotation
//! - [`catalog`]: the immutable name → shape/color table
//! - [`sequencer`]: shuffled-bag piece generation and spawn positions
//! - [`controller`]: move, rotate, drop and lock the active piece
//! - [`scoring`]: row-clear awards and the derived level
//! - [`game_loop`]: frame pacing for forced drops
//! - [`events`]: synchronous publish/subscribe
//! - [`game`]: the session tying it all together
//! - [`config`], [`error`], [`snapshot`]
//!
//! # Rules
//!
//! - Seven pieces in a bag; every aligned run of seven draws holds each once
//! - Rotation is a plain clockwise matrix turn with no wall kicks
//! - A blocked soft drop locks the piece immediately
//! - Clearing `n` rows awards `n * width` plus a multi-row bonus
//! - The level is `score / 100 + 1`; the drop cadence shrinks by one frame per level
//! - The game ends when a freshly promoted piece overlaps the stack
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, GameConfig};
//! use blockfall_types::GameAction;
//!
//! let mut game = Game::with_seed(GameConfig::default(), 12345).unwrap();
//!
//! game.apply(GameAction::MoveRight);
//! game.apply(GameAction::Rotate);
//! while !game.is_game_over() && game.playfield().filled_count() == 0 {
//!     game.apply(GameAction::SoftDrop);
//! }
//!
//! assert_eq!(game.playfield().filled_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! The front-end calls [`Game::tick`] once per 16ms frame. At level `L` a drop
//! is forced every `max(10, 35 - L)` frames.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod game;
pub mod game_loop;
pub mod piece;
pub mod playfield;
pub mod scoring;
pub mod sequencer;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use catalog::{default_color, CatalogEntry, PieceCatalog};
pub use config::GameConfig;
pub use controller::{ControllerState, DropOutcome, LockReport, PlacementController};
pub use error::{ConfigError, ShapeError};
pub use events::{EventKind, GameEvent, NotificationBus, SubscriptionId};
pub use game::{Game, TickStatus};
pub use game_loop::GameLoop;
pub use piece::{ActivePiece, Piece, Shape};
pub use playfield::Playfield;
pub use scoring::{level_for_score, rows_award, ScoreEngine};
pub use sequencer::{spawn_position, PieceSequencer};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
