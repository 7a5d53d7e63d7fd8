//! Catalog module - the piece shapes and display colors
//!
//! The standard catalog holds the seven pieces in their spawn orientation:
//!
//! ```text
//! I        J      L      O     S      Z      T
//! ....     #..    ..#    ##    .##    ##.    .#.
//! ####     ###    ###    ##    ##.    .##    ###
//! ....     ...    ...          ...    ...    ...
//! ....
//! ```
//!
//! A catalog never changes after construction, so every lookup returns the
//! same matrix and color for the lifetime of a game.

use crate::error::{ConfigError, ShapeError};
use crate::piece::{Piece, Shape};
use crate::types::{PieceName, Rgb};

const I_ROWS: [[u8; 4]; 4] = [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
const J_ROWS: [[u8; 3]; 3] = [[1, 0, 0], [1, 1, 1], [0, 0, 0]];
const L_ROWS: [[u8; 3]; 3] = [[0, 0, 1], [1, 1, 1], [0, 0, 0]];
const O_ROWS: [[u8; 2]; 2] = [[1, 1], [1, 1]];
const S_ROWS: [[u8; 3]; 3] = [[0, 1, 1], [1, 1, 0], [0, 0, 0]];
const Z_ROWS: [[u8; 3]; 3] = [[1, 1, 0], [0, 1, 1], [0, 0, 0]];
const T_ROWS: [[u8; 3]; 3] = [[0, 1, 0], [1, 1, 1], [0, 0, 0]];

/// Default display color for a piece name.
pub fn default_color(name: PieceName) -> Rgb {
    match name {
        PieceName::I => Rgb::new(80, 220, 220),  // cyan
        PieceName::J => Rgb::new(80, 120, 220),  // blue
        PieceName::L => Rgb::new(255, 165, 0),   // orange
        PieceName::O => Rgb::new(240, 220, 80),  // yellow
        PieceName::S => Rgb::new(100, 220, 120), // green
        PieceName::Z => Rgb::new(220, 80, 80),   // red
        PieceName::T => Rgb::new(160, 90, 200),  // purple
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: PieceName,
    pub shape: Shape,
    pub color: Rgb,
}

impl CatalogEntry {
    /// Entry with the default color for `name`.
    pub fn new(name: PieceName, shape: Shape) -> Self {
        Self {
            name,
            shape,
            color: default_color(name),
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

/// Immutable lookup from piece name to shape and color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    entries: Vec<CatalogEntry>,
}

impl PieceCatalog {
    /// Build a custom catalog.
    ///
    /// Fails on an empty list, a repeated name, or a shape without any
    /// occupied cell.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(ConfigError::DuplicatePiece(entry.name));
            }
            if entry.shape.occupied().next().is_none() {
                return Err(ConfigError::InvalidShape {
                    name: entry.name,
                    source: ShapeError::NoOccupiedCells,
                });
            }
        }
        Ok(Self { entries })
    }

    /// The seven standard pieces.
    pub fn standard() -> Self {
        let entries = vec![
            CatalogEntry::new(PieceName::I, Shape::from_rows_unchecked(&I_ROWS)),
            CatalogEntry::new(PieceName::J, Shape::from_rows_unchecked(&J_ROWS)),
            CatalogEntry::new(PieceName::L, Shape::from_rows_unchecked(&L_ROWS)),
            CatalogEntry::new(PieceName::O, Shape::from_rows_unchecked(&O_ROWS)),
            CatalogEntry::new(PieceName::S, Shape::from_rows_unchecked(&S_ROWS)),
            CatalogEntry::new(PieceName::Z, Shape::from_rows_unchecked(&Z_ROWS)),
            CatalogEntry::new(PieceName::T, Shape::from_rows_unchecked(&T_ROWS)),
        ];
        Self { entries }
    }

    pub fn get(&self, name: PieceName) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn shape(&self, name: PieceName) -> Option<&Shape> {
        self.get(name).map(|e| &e.shape)
    }

    pub fn color(&self, name: PieceName) -> Option<Rgb> {
        self.get(name).map(|e| e.color)
    }

    /// A fresh piece in spawn orientation.
    pub fn piece(&self, name: PieceName) -> Option<Piece> {
        self.get(name).map(|e| Piece::new(e.name, e.shape.clone()))
    }

    /// Names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = PieceName> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Side length of the largest shape.
    pub fn max_shape_size(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.shape.size())
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
