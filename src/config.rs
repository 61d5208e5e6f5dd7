//! Static game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Largest board side the engine accepts.
pub const MAX_BOARD_SIZE: usize = 64;

/// Top-level configuration handed to the orchestrator at construction.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the board.
    board_size: usize,
    /// Automated player timing.
    bot: BotConfig,
    /// Score bounds and reference turn times.
    scoring: ScoringConfig,
    /// Where match snapshots are kept.
    storage: StorageConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            bot: BotConfig::default(),
            scoring: ScoringConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Replaces the bot timing.
    pub fn with_bot(mut self, bot: BotConfig) -> Self {
        self.bot = bot;
        self
    }

    /// Replaces the scoring bounds.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Replaces the storage settings.
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Checks every section for values the engine cannot work with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::new(format!(
                "board_size must be between 1 and {} (got {})",
                MAX_BOARD_SIZE, self.board_size
            )));
        }
        self.bot.validate()?;
        self.scoring.validate()?;
        if self.storage.key.is_empty() {
            return Err(ConfigError::new("storage.key must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Delay bounds for the automated player, in seconds.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(default)]
pub struct BotConfig {
    /// Shortest thinking time.
    min_delay_secs: f64,
    /// Longest thinking time.
    max_delay_secs: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: 1.0,
            max_delay_secs: 3.0,
        }
    }
}

impl BotConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_delay_secs.is_nan()
            || self.min_delay_secs < 0.0
            || !self.max_delay_secs.is_finite()
        {
            return Err(ConfigError::new(
                "bot delays must be finite and non-negative".to_string(),
            ));
        }
        if self.min_delay_secs > self.max_delay_secs {
            return Err(ConfigError::new(format!(
                "bot.min_delay_secs ({}) exceeds bot.max_delay_secs ({})",
                self.min_delay_secs, self.max_delay_secs
            )));
        }
        Ok(())
    }
}

/// Score bounds and the turn times that map onto them.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score for the slowest win.
    win_min: i64,
    /// Score for the fastest win.
    win_max: i64,
    /// Score for the slowest draw.
    draw_min: i64,
    /// Score for the fastest draw.
    draw_max: i64,
    /// Score for any loss.
    lose_score: i64,
    /// Average turn time at or below which the maximum is awarded.
    fast_turn_secs: f64,
    /// Average turn time at or above which the minimum is awarded.
    slow_turn_secs: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_min: 50,
            win_max: 100,
            draw_min: 2,
            draw_max: 49,
            lose_score: 1,
            fast_turn_secs: 10.0,
            slow_turn_secs: 20.0,
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.win_min > self.win_max {
            return Err(ConfigError::new(format!(
                "scoring.win_min ({}) exceeds scoring.win_max ({})",
                self.win_min, self.win_max
            )));
        }
        if self.draw_min > self.draw_max {
            return Err(ConfigError::new(format!(
                "scoring.draw_min ({}) exceeds scoring.draw_max ({})",
                self.draw_min, self.draw_max
            )));
        }
        if !self.fast_turn_secs.is_finite() || !self.slow_turn_secs.is_finite() {
            return Err(ConfigError::new(format!(
                "scoring turn times must be finite (fast {}, slow {})",
                self.fast_turn_secs, self.slow_turn_secs
            )));
        }
        if self.fast_turn_secs >= self.slow_turn_secs {
            return Err(ConfigError::new(format!(
                "scoring.fast_turn_secs ({}) must be below scoring.slow_turn_secs ({})",
                self.fast_turn_secs, self.slow_turn_secs
            )));
        }
        Ok(())
    }
}

/// Which store backend holds snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// Lost when the process exits.
    Memory,
    /// One JSON file per key.
    #[default]
    File,
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to construct.
    backend: StorageBackend,
    /// Directory for the file backend.
    dir: PathBuf,
    /// Key the match snapshot is stored under.
    key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            dir: PathBuf::from("save_files"),
            key: crate::storage::DEFAULT_SAVE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Replaces the backend.
    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Replaces the save directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let config = GameConfig::default();
        assert_eq!(*config.board_size(), 3);
        assert_eq!(*config.bot().min_delay_secs(), 1.0);
        assert_eq!(*config.scoring().win_max(), 100);
        assert_eq!(*config.scoring().lose_score(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml(
            r#"
            board_size = 4

            [scoring]
            win_max = 120

            [storage]
            backend = "memory"
            "#,
        )
        .expect("valid config");
        assert_eq!(*config.board_size(), 4);
        assert_eq!(*config.scoring().win_max(), 120);
        assert_eq!(*config.scoring().win_min(), 50);
        assert_eq!(*config.storage().backend(), StorageBackend::Memory);
        assert_eq!(config.storage().key(), "CurrentGameSave");
    }

    #[test]
    fn test_rejects_inverted_turn_times() {
        let result = GameConfig::from_toml(
            r#"
            [scoring]
            fast_turn_secs = 20.0
            slow_turn_secs = 10.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_finite_turn_times() {
        assert!(GameConfig::from_toml("[scoring]\nslow_turn_secs = nan\n").is_err());
        assert!(GameConfig::from_toml("[scoring]\nslow_turn_secs = inf\n").is_err());
        assert!(GameConfig::from_toml("[scoring]\nfast_turn_secs = -inf\n").is_err());
    }

    #[test]
    fn test_rejects_oversized_board() {
        assert!(GameConfig::from_toml("board_size = 4294967296").is_err());
        let edge = GameConfig::default().with_board_size(MAX_BOARD_SIZE);
        assert!(edge.validate().is_ok());
        let over = GameConfig::default().with_board_size(MAX_BOARD_SIZE + 1);
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_board_and_inverted_delays() {
        assert!(GameConfig::from_toml("board_size = 0").is_err());
        let bad_bot = GameConfig::default().with_bot(BotConfig::new(3.0, 1.0));
        assert!(bad_bot.validate().is_err());
    }
}
