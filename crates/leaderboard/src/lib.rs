//! Persistent leaderboard.
//!
//! Best score per username, top [`LEADERBOARD_CAPACITY`] only, stored as JSON
//! under the user's config directory. The engine never reads it; the binary
//! records the final score when a game ends.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use blockfall_types as types;

use crate::types::{DEFAULT_USERNAME, LEADERBOARD_CAPACITY};

const DIR_NAME: &str = "blockfall";
const FILENAME: &str = "leaderboard.json";

/// One ranked entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub username: String,
    pub score: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Sorted by score, highest first
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_username: Option<String>,
}

/// `$XDG_CONFIG_HOME/blockfall/leaderboard.json`, falling back to
/// `~/.config/blockfall/leaderboard.json`.
pub fn default_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join(DIR_NAME).join(FILENAME)
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a leaderboard file. A missing file is an empty board; anything
    /// unparseable is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no leaderboard yet");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        let mut board: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        board.normalize();
        Ok(board)
    }

    /// Write the leaderboard, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        // Write then rename so a crash never leaves a truncated file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
        debug!(path = %path.display(), entries = self.entries.len(), "leaderboard saved");
        Ok(())
    }

    /// Record a finished game.
    ///
    /// An existing user keeps the higher of the stored and new score. Returns
    /// the 1-based rank if the user is on the board afterwards.
    pub fn record(&mut self, username: &str, score: u64) -> Option<usize> {
        let username = normalize_username(username);
        match self.entries.iter_mut().find(|e| e.username == username) {
            Some(entry) => entry.score = entry.score.max(score),
            None => self.entries.push(Entry {
                username: username.clone(),
                score,
            }),
        }
        self.normalize();
        self.last_username = Some(username.clone());
        self.rank(&username)
    }

    /// Stable sort, highest score first, then cap.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self, username: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.username == username)
            .map(|e| e.score)
    }

    /// 1-based position of `username`.
    pub fn rank(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.username == username)
            .map(|i| i + 1)
    }

    pub fn last_username(&self) -> Option<&str> {
        self.last_username.as_deref()
    }

    /// Plain-text table: rank, name, score.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:>3}  {:<20} {:>10}", "#", "NAME", "SCORE");
        if self.entries.is_empty() {
            let _ = writeln!(out, "     (no scores yet)");
        }
        for (i, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(out, "{:>3}  {:<20} {:>10}", i + 1, entry.username, entry.score);
        }
        out
    }
}

/// Trimmed name, or the default when blank.
pub fn normalize_username(username: &str) -> String {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        DEFAULT_USERNAME.to_string()
    } else {
        trimmed.to_string()
    }
}
