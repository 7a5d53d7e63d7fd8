//! Sequencer module - bag randomization of piece names
//!
//! Every refill loads one of each catalog name in a uniformly random order
//! (Fisher-Yates via [`SliceRandom::shuffle`]), then draws pop from that bag
//! until it is empty. With the standard catalog this guarantees all seven
//! pieces appear in every aligned run of seven draws.
//!
//! The random source is a type parameter so tests can pin it with a seed.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::PieceCatalog;
use crate::piece::ActivePiece;
use crate::types::{PieceName, SPAWN_BUFFER_ROWS};

/// Upper bound on distinct names, one per [`PieceName`] variant.
pub const BAG_CAPACITY: usize = 7;

/// Where a piece enters the field: (row, col) of its matrix's top-left corner.
///
/// The column centers the matrix: `floor(width/2) - ceil(size/2)`. Other pieces
/// start at the top of the spawn buffer; the I starts one row lower since its
/// cells sit on matrix row 1.
pub fn spawn_position(name: PieceName, shape_size: usize, field_width: usize) -> (i32, i32) {
    let col = (field_width / 2) as i32 - shape_size.div_ceil(2) as i32;
    let row = if name == PieceName::I {
        1 - SPAWN_BUFFER_ROWS
    } else {
        -SPAWN_BUFFER_ROWS
    };
    (row, col)
}

/// Shuffled-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceSequencer<R = StdRng> {
    /// One of each name, in catalog order
    names: ArrayVec<PieceName, BAG_CAPACITY>,
    /// Remaining names of the current bag; drawn from the back
    bag: ArrayVec<PieceName, BAG_CAPACITY>,
    rng: R,
    refills: u64,
}

impl PieceSequencer<StdRng> {
    /// Deterministic sequencer for a given seed
    pub fn with_seed(catalog: &PieceCatalog, seed: u64) -> Self {
        Self::new(catalog, StdRng::seed_from_u64(seed))
    }

    /// Sequencer seeded from the operating system
    pub fn from_entropy(catalog: &PieceCatalog) -> Self {
        Self::new(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> PieceSequencer<R> {
    /// Create a sequencer over the catalog's names.
    ///
    /// The bag starts empty; the first draw fills it.
    pub fn new(catalog: &PieceCatalog, rng: R) -> Self {
        let names = catalog.names().take(BAG_CAPACITY).collect();
        Self {
            names,
            bag: ArrayVec::new(),
            rng,
            refills: 0,
        }
    }

    /// Load a freshly shuffled full set of names
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(self.names.iter().copied());
        self.bag.shuffle(&mut self.rng);
        self.refills += 1;
        debug!(refill = self.refills, bag = ?self.bag, "piece bag refilled");
    }

    /// Draw the next name, refilling first if the bag is empty
    pub fn next(&mut self) -> PieceName {
        if self.bag.is_empty() {
            self.refill();
        }
        self.bag
            .pop()
            .expect("bag is refilled from a non-empty catalog")
    }

    /// Draw the next name and position it at its spawn point
    pub fn next_spawn(&mut self, catalog: &PieceCatalog, field_width: usize) -> Option<ActivePiece> {
        let name = self.next();
        let piece = catalog.piece(name)?;
        let (row, col) = spawn_position(name, piece.shape.size(), field_width);
        Some(ActivePiece::new(piece, row, col))
    }

    /// Names still waiting in the current bag, next draw last
    pub fn remaining(&self) -> &[PieceName] {
        &self.bag
    }

    /// How many bags have been shuffled so far
    pub fn refills(&self) -> u64 {
        self.refills
    }
}
