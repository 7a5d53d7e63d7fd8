//! Scoring module - row-clear awards and level progression
//!
//! Clearing `n` rows on a field `w` cells wide awards `n * w`. Clearing more
//! than one row at once adds a bonus of `w * base^(2n-3)`, so every extra row
//! multiplies the bonus by `base^2`. With the default base of 2 on a 10-wide
//! field:
//!
//! | Rows | Base | Bonus | Total |
//! |------|------|-------|-------|
//! | 1 | 10 | 0 | 10 |
//! | 2 | 20 | 20 | 40 |
//! | 3 | 30 | 80 | 110 |
//! | 4 | 40 | 320 | 360 |
//!
//! The level is `floor(score / 100) + 1` and is always derived from the score.

use crate::types::POINTS_PER_LEVEL;

/// Points for clearing `count` rows on a field `width` cells wide.
pub fn rows_award(count: usize, width: usize, row_base: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    let width = width as u64;

    let base = count.saturating_mul(width);
    if count == 1 {
        return base;
    }

    let exponent = u32::try_from(count.saturating_mul(2) - 3).unwrap_or(u32::MAX);
    let bonus = row_base.saturating_pow(exponent).saturating_mul(width);
    base.saturating_add(bonus)
}

/// Level for a cumulative score (starts at 1).
pub fn level_for_score(score: u64) -> u32 {
    u32::try_from(score / POINTS_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// Cumulative score for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEngine {
    score: u64,
    row_base: u64,
}

impl ScoreEngine {
    pub fn new(row_base: u64) -> Self {
        Self { score: 0, row_base }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current level, recomputed from the score on every call.
    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    pub fn row_base(&self) -> u64 {
        self.row_base
    }

    /// Award points for a row clear and return the amount added.
    pub fn on_rows_filled(&mut self, count: usize, width: usize) -> u64 {
        let award = rows_award(count, width, self.row_base);
        self.score = self.score.saturating_add(award);
        award
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(crate::types::ROW_BASE)
    }
}
