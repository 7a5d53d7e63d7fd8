//! Terminal input.
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`]. Nothing here
//! touches game state; the binary forwards the mapped action to the session.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
