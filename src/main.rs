//! Terminal runner (default binary).
//!
//! Drives one game at a fixed 16ms frame, forwards key presses to the session
//! and records the final score on the leaderboard when the game ends.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::core::{EventKind, Game, GameConfig, GameEvent, PieceCatalog};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::leaderboard::{self, Leaderboard};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

/// Falling-block puzzle game for the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Name recorded on the leaderboard (defaults to the last one used)
    #[arg(short, long)]
    username: Option<String>,

    /// Seed for a reproducible piece sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file
    #[arg(long, value_name = "PATH")]
    scores: Option<PathBuf>,

    /// Print the leaderboard and exit
    #[arg(long)]
    leaderboard: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let scores_path = args.scores.clone().unwrap_or_else(leaderboard::default_path);
    let board = Leaderboard::load(&scores_path)?;

    if args.leaderboard {
        print!("{}", board.render_table());
        return Ok(());
    }

    let username = leaderboard::normalize_username(
        args.username
            .as_deref()
            .or(board.last_username())
            .unwrap_or_default(),
    );

    let config = GameConfig::from_env();
    let game = match args.seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    }
    .context("invalid game configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, game, &username, board, scores_path);
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to the file named by `BLOCKFALL_LOG_PATH`; the terminal belongs to the
/// game. Without it, nothing is logged.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("BLOCKFALL_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("opening log file {path:?}"))?;
    let filter = EnvFilter::try_from_env("BLOCKFALL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    mut game: Game,
    username: &str,
    board: Leaderboard,
    scores_path: PathBuf,
) -> Result<()> {
    info!(username, "game started");

    let dirty = Rc::new(Cell::new(true));
    {
        let dirty = Rc::clone(&dirty);
        game.subscribe(EventKind::RenderRequested, move |_| dirty.set(true));
    }

    let board = Rc::new(RefCell::new(board));
    {
        let board = Rc::clone(&board);
        let dirty = Rc::clone(&dirty);
        let username = username.to_string();
        game.subscribe(EventKind::GameOver, move |event| {
            dirty.set(true);
            let GameEvent::GameOver { score, .. } = *event else {
                return;
            };
            let mut board = board.borrow_mut();
            let rank = board.record(&username, score);
            info!(score, ?rank, "score recorded");
            if let Err(err) = board.save(&scores_path) {
                warn!(error = %err, "failed to save leaderboard");
            }
        });
    }

    let view = GameView::new(&PieceCatalog::standard());
    let mut frame = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        if dirty.replace(false) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&game.snapshot(), username, Viewport::new(w, h), &mut frame);
            term.present(&mut frame)?;
        }

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if game.apply(action) {
                            dirty.set(true);
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty.set(true);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            game.tick();
        }
    }
}
