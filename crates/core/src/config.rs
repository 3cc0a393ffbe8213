//! Engine configuration
//!
//! Every field has a default, so hosts can deserialize partial JSON objects or
//! read overrides from the environment. Validation happens once, when a game is
//! constructed; nothing is re-checked at call time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::ScoreTable;
use crate::types::{DEFAULT_COLUMNS, DEFAULT_DROP_INTERVAL_MS, DEFAULT_ROWS, SHAPE_SIZE};

/// Configuration rejected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("columns must be positive")]
    NoColumns,
    #[error("rows must be positive")]
    NoRows,
    #[error("board must be at least {min} columns wide to fit a piece, got {columns}")]
    TooNarrow { columns: u16, min: u16 },
    #[error("drop interval must be positive")]
    ZeroDropInterval,
    #[error("score table must have at least one entry")]
    EmptyScoreTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub columns: u16,
    pub rows: u16,
    pub drop_interval_ms: u32,
    pub score_table: ScoreTable,
    /// Seed for piece generation; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            score_table: ScoreTable::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Read overrides from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults:
    /// `DROP_STACK_COLUMNS`, `DROP_STACK_ROWS`, `DROP_STACK_DROP_MS`, `DROP_STACK_SEED`.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            columns: parsed("DROP_STACK_COLUMNS").unwrap_or(defaults.columns),
            rows: parsed("DROP_STACK_ROWS").unwrap_or(defaults.rows),
            drop_interval_ms: parsed("DROP_STACK_DROP_MS").unwrap_or(defaults.drop_interval_ms),
            score_table: defaults.score_table,
            seed: parsed("DROP_STACK_SEED"),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if (self.columns as usize) < SHAPE_SIZE {
            return Err(ConfigError::TooNarrow {
                columns: self.columns,
                min: SHAPE_SIZE as u16,
            });
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.score_table.is_empty() {
            return Err(ConfigError::EmptyScoreTable);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.columns, 20);
        assert_eq!(config.rows, 15);
        assert_eq!(config.drop_interval_ms, 520);
        assert_eq!(config.score_table.as_slice(), &[0, 100, 300, 500, 800]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let bad = EngineConfig {
            columns: 0,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::NoColumns));

        let bad = EngineConfig {
            rows: 0,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::NoRows));

        let bad = EngineConfig {
            drop_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::ZeroDropInterval));

        let bad = EngineConfig {
            score_table: ScoreTable::new(Vec::new()),
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::EmptyScoreTable));
    }

    #[test]
    fn test_rejects_board_narrower_than_a_shape() {
        let bad = EngineConfig {
            columns: 3,
            ..EngineConfig::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::TooNarrow { columns: 3, min: 4 })
        );
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = EngineConfig::from_env();
    }
}
