//! Shared types and defaults for the blockfall workspace.
//!
//! Everything here is plain data with no dependencies so that the engine, the
//! terminal front-end and the leaderboard can agree on names without pulling
//! each other in.
//!
//! # Field geometry
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FIELD_WIDTH` | 10 | Default playfield columns |
//! | `FIELD_HEIGHT` | 20 | Default visible playfield rows |
//! | `SPAWN_BUFFER_ROWS` | 2 | Virtual rows above the visible top |
//!
//! # Pacing
//!
//! The game loop counts frames between forced drops. The threshold is
//! `max(MIN_FRAME_RATE, MAX_FRAME_RATE - level)`, so level 1 drops every 34
//! frames and level 25 onwards drops every 10.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceName, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(PieceName::from_str("t"), Some(PieceName::T));
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!((FIELD_WIDTH, FIELD_HEIGHT), (10, 20));
//! ```

/// Default playfield width in cells
pub const FIELD_WIDTH: usize = 10;

/// Default playfield height in cells
pub const FIELD_HEIGHT: usize = 20;

/// Rows above the visible field where new pieces appear (indices -1 and -2)
pub const SPAWN_BUFFER_ROWS: i32 = 2;

/// Largest supported piece matrix side length
pub const MAX_SHAPE_SIZE: usize = 4;

/// Frames between forced drops at level 0 (the slowest cadence)
pub const MAX_FRAME_RATE: u32 = 35;

/// Floor on frames between forced drops (the fastest cadence)
pub const MIN_FRAME_RATE: u32 = 10;

/// Exponent base for the multi-row clear bonus
pub const ROW_BASE: u64 = 2;

/// Score needed to advance one level
pub const POINTS_PER_LEVEL: u64 = 100;

/// Fixed frame interval for the terminal front-end (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Number of entries kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Username used when none is supplied
pub const DEFAULT_USERNAME: &str = "Player";

/// The seven piece names
///
/// Each name selects a shape and a display color from the piece catalog:
/// - **I**: Cyan, 4-wide bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **T**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceName {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceName {
    /// All names in catalog order
    pub const ALL: [PieceName; 7] = [
        PieceName::I,
        PieceName::J,
        PieceName::L,
        PieceName::O,
        PieceName::S,
        PieceName::Z,
        PieceName::T,
    ];

    /// Parse a piece name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceName;
    ///
    /// assert_eq!(PieceName::from_str("i"), Some(PieceName::I));
    /// assert_eq!(PieceName::from_str("Z"), Some(PieceName::Z));
    /// assert_eq!(PieceName::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceName::I),
            "J" => Some(PieceName::J),
            "L" => Some(PieceName::L),
            "O" => Some(PieceName::O),
            "S" => Some(PieceName::S),
            "Z" => Some(PieceName::Z),
            "T" => Some(PieceName::T),
            _ => None,
        }
    }

    /// Single uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceName::I => "I",
            PieceName::J => "J",
            PieceName::L => "L",
            PieceName::O => "O",
            PieceName::S => "S",
            PieceName::Z => "Z",
            PieceName::T => "T",
        }
    }
}

impl std::fmt::Display for PieceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Discrete player inputs
///
/// The engine accepts exactly these four; everything else (quit, restart of the
/// process, leaderboard display) belongs to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Drop one row, locking if the piece cannot fall further
    SoftDrop,
    /// Rotate the active piece 90° clockwise
    Rotate,
}

impl GameAction {
    /// Parse an action name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
        }
    }
}

/// A cell on the playfield
///
/// - `None`: empty
/// - `Some(PieceName)`: locked cell, tagged with the piece that filled it
pub type Cell = Option<PieceName>;
