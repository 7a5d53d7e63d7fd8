//! Game session - ties the engine components together
//!
//! A [`Game`] owns the placement controller, the score engine, the frame
//! pacer and the notification bus. It is the single entry point for both the
//! tick source and player input, so every mutation happens on one call stack
//! and a drop can never interleave with a manual move.
//!
//! Events for one lock are published in this order:
//!
//! 1. `rows-filled` (only when rows were cleared)
//! 2. `score-changed` (only when rows were cleared)
//! 3. `piece-placed`
//! 4. `game-over` (only when the next piece cannot spawn)

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::catalog::PieceCatalog;
use crate::config::GameConfig;
use crate::controller::{DropOutcome, LockReport, PlacementController};
use crate::error::ConfigError;
use crate::events::{EventKind, GameEvent, NotificationBus, SubscriptionId};
use crate::game_loop::GameLoop;
use crate::piece::ActivePiece;
use crate::playfield::Playfield;
use crate::scoring::ScoreEngine;
use crate::sequencer::PieceSequencer;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::GameAction;

/// Result of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Frame counted, no drop due yet
    Waiting,
    /// Forced drop moved the piece down
    Dropped,
    /// Forced drop locked the piece
    Locked,
    /// The game is over; nothing was scheduled
    Stopped,
}

/// One game session.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    config: GameConfig,
    controller: PlacementController<R>,
    score: ScoreEngine,
    game_loop: GameLoop,
    bus: NotificationBus,
}

impl Game<StdRng> {
    /// Standard pieces, sequencer seeded from the operating system.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_parts(config, PieceCatalog::standard(), StdRng::from_entropy())
    }

    /// Standard pieces, deterministic sequence.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_parts(config, PieceCatalog::standard(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Build a session from a custom catalog and random source.
    pub fn with_parts(config: GameConfig, catalog: PieceCatalog, rng: R) -> Result<Self, ConfigError> {
        config.validate(&catalog)?;
        let playfield = Playfield::new(config.width, config.height)?;
        let sequencer = PieceSequencer::new(&catalog, rng);
        let controller = PlacementController::new(playfield, catalog, sequencer);

        Ok(Self {
            config,
            controller,
            score: ScoreEngine::new(config.row_base),
            game_loop: GameLoop::new(config.min_frame_rate, config.max_frame_rate),
            bus: NotificationBus::new(),
        })
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Apply a player input. Returns whether anything changed.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.controller.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.controller.move_horizontal(1)
    }

    pub fn rotate(&mut self) -> bool {
        self.controller.rotate()
    }

    /// Drop one row, locking if blocked. False only once the game is over.
    pub fn soft_drop(&mut self) -> bool {
        !matches!(self.drop_once(), DropOutcome::Ignored)
    }

    /// Advance one frame.
    ///
    /// Publishes `render-requested` on every frame while the game runs and
    /// forces a soft drop whenever the level-dependent cadence is reached.
    pub fn tick(&mut self) -> TickStatus {
        if self.controller.is_game_over() {
            self.game_loop.stop();
        }
        if !self.game_loop.is_running() {
            return TickStatus::Stopped;
        }

        self.bus.publish(&GameEvent::RenderRequested);

        if !self.game_loop.advance(self.score.level()) {
            return TickStatus::Waiting;
        }
        match self.drop_once() {
            DropOutcome::Moved => TickStatus::Dropped,
            DropOutcome::Locked(_) => TickStatus::Locked,
            DropOutcome::Ignored => TickStatus::Stopped,
        }
    }

    fn drop_once(&mut self) -> DropOutcome {
        let outcome = self.controller.soft_drop();
        if let DropOutcome::Locked(report) = outcome {
            self.on_lock(report);
        }
        outcome
    }

    fn on_lock(&mut self, report: LockReport) {
        if report.rows_cleared > 0 {
            self.bus.publish(&GameEvent::RowsFilled {
                count: report.rows_cleared,
                width: report.width,
            });
            self.score.on_rows_filled(report.rows_cleared, report.width);
            self.bus.publish(&GameEvent::ScoreChanged {
                score: self.score.score(),
                level: self.score.level(),
            });
        }

        self.bus.publish(&GameEvent::PiecePlaced);

        if report.game_over {
            self.game_loop.stop();
            info!(
                score = self.score.score(),
                level = self.score.level(),
                "game over"
            );
            self.bus.publish(&GameEvent::GameOver {
                score: self.score.score(),
                level: self.score.level(),
            });
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn is_game_over(&self) -> bool {
        self.controller.is_game_over()
    }

    /// Frames between forced drops at the current level.
    pub fn cadence(&self) -> u32 {
        self.game_loop.cadence(self.score.level())
    }

    pub fn playfield(&self) -> &Playfield {
        self.controller.playfield()
    }

    pub fn active(&self) -> &ActivePiece {
        self.controller.active()
    }

    pub fn next(&self) -> &ActivePiece {
        self.controller.next()
    }

    pub fn controller(&self) -> &PlacementController<R> {
        &self.controller
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let field = self.controller.playfield();
        GameSnapshot {
            width: field.width(),
            height: field.height(),
            cells: field.cells().to_vec(),
            active: (!self.is_game_over()).then(|| ActiveSnapshot::from(self.active())),
            next: ActiveSnapshot::from(self.next()),
            score: self.score(),
            level: self.level(),
            game_over: self.is_game_over(),
        }
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut PlacementController<R> {
        &mut self.controller
    }
}
