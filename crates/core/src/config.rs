//! Game configuration.

use std::env;
use std::str::FromStr;

use crate::catalog::PieceCatalog;
use crate::error::ConfigError;
use crate::sequencer::spawn_position;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, MAX_FRAME_RATE, MIN_FRAME_RATE, ROW_BASE};

/// Tunables for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Fastest cadence: frames between drops never go below this
    pub min_frame_rate: u32,
    /// Cadence at level 0
    pub max_frame_rate: u32,
    /// Exponent base for the multi-row bonus
    pub row_base: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            min_frame_rate: MIN_FRAME_RATE,
            max_frame_rate: MAX_FRAME_RATE,
            row_base: ROW_BASE,
        }
    }
}

impl GameConfig {
    /// Read overrides from environment variables.
    ///
    /// - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`
    /// - `BLOCKFALL_MIN_FRAME_RATE`, `BLOCKFALL_MAX_FRAME_RATE`
    /// - `BLOCKFALL_ROW_BASE`
    ///
    /// Missing or unparseable values fall back to the defaults. The result is
    /// not validated; see [`GameConfig::validate`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            width: env_or("BLOCKFALL_WIDTH", defaults.width),
            height: env_or("BLOCKFALL_HEIGHT", defaults.height),
            min_frame_rate: env_or("BLOCKFALL_MIN_FRAME_RATE", defaults.min_frame_rate),
            max_frame_rate: env_or("BLOCKFALL_MAX_FRAME_RATE", defaults.max_frame_rate),
            row_base: env_or("BLOCKFALL_ROW_BASE", defaults.row_base),
        }
    }

    /// Check the configuration against the catalog it will be played with.
    pub fn validate(&self, catalog: &PieceCatalog) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(widest) = catalog
            .entries()
            .iter()
            .max_by_key(|e| e.shape.size())
            .filter(|e| e.shape.size() > self.width)
        {
            return Err(ConfigError::FieldTooNarrow {
                width: self.width,
                size: widest.shape.size(),
                name: widest.name,
            });
        }
        // Odd widths can push a centered matrix's left edge past column 0.
        for entry in catalog.entries() {
            let (_, col) = spawn_position(entry.name, entry.shape.size(), self.width);
            let outside = entry.shape.occupied().any(|(_, c)| {
                let x = col + c;
                x < 0 || x as usize >= self.width
            });
            if outside {
                return Err(ConfigError::SpawnOutOfBounds {
                    name: entry.name,
                    col,
                    width: self.width,
                });
            }
        }
        if self.min_frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.min_frame_rate > self.max_frame_rate {
            return Err(ConfigError::FrameRateRange {
                min: self.min_frame_rate,
                max: self.max_frame_rate,
            });
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 20);
        assert_eq!(config.validate(&PieceCatalog::standard()), Ok(()));
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&PieceCatalog::standard()),
            Err(ConfigError::ZeroWidth)
        );
    }

    #[test]
    fn test_narrow_field_rejected() {
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&PieceCatalog::standard()),
            Err(ConfigError::FieldTooNarrow {
                width: 3,
                size: 4,
                name: crate::types::PieceName::I,
            })
        );
    }

    #[test]
    fn test_spawn_outside_odd_field_rejected() {
        use crate::catalog::CatalogEntry;
        use crate::types::PieceName;

        let t = PieceCatalog::standard().shape(PieceName::T).unwrap().clone();
        let t_only = PieceCatalog::new(vec![CatalogEntry::new(PieceName::T, t)]).unwrap();
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&t_only),
            Err(ConfigError::SpawnOutOfBounds {
                name: PieceName::T,
                col: -1,
                width: 3,
            })
        );

        let config = GameConfig {
            width: 4,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(&t_only), Ok(()));
    }

    #[test]
    fn test_frame_rate_range() {
        let catalog = PieceCatalog::standard();
        let config = GameConfig {
            min_frame_rate: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(&catalog), Err(ConfigError::ZeroFrameRate));

        let config = GameConfig {
            min_frame_rate: 40,
            max_frame_rate: 35,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(&catalog),
            Err(ConfigError::FrameRateRange { min: 40, max: 35 })
        );
    }

    #[test]
    fn test_env_parse_fallback() {
        // Unset keys use the default.
        assert_eq!(env_or("BLOCKFALL_TEST_UNSET_KEY", 42usize), 42);
    }
}
