//! Terminal front-end rendering.
//!
//! Game snapshots are drawn into a plain character framebuffer, which the
//! renderer then diffs against the previous frame and flushes to the terminal.
//! Field cells are two columns wide to keep blocks roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff, encode_full, TerminalRenderer};
