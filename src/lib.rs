//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,leaderboard,term,types}`
//! so integration tests and the binary share one import path.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_leaderboard as leaderboard;
pub use blockfall_term as term;
pub use blockfall_types as types;
