//! Session configuration.

use crate::games::tictactoe::{Grid, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Options recognized by a game session.
///
/// Every key is optional in TOML; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Who places the first mark.
    #[serde(default)]
    starting_player: Player,

    /// Pause before the computer's mark appears, in seconds.
    #[serde(default = "default_thinking_delay")]
    ai_thinking_delay_secs: f64,

    /// Board side length.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Marks in a row needed to win.
    #[serde(default = "default_win_length")]
    win_length: usize,
}

fn default_thinking_delay() -> f64 {
    0.5
}

fn default_board_size() -> usize {
    3
}

fn default_win_length() -> usize {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_player: Player::default(),
            ai_thinking_delay_secs: default_thinking_delay(),
            board_size: default_board_size(),
            win_length: default_win_length(),
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

        let config = Self::from_toml_str(&content)?;
        info!(starting_player = %config.starting_player, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::new("board_size must be at least 1".to_string()));
        }
        if self.win_length == 0 || self.win_length > self.board_size {
            return Err(ConfigError::new(format!(
                "win_length must be between 1 and board_size ({}), got {}",
                self.board_size, self.win_length
            )));
        }
        if !self.ai_thinking_delay_secs.is_finite() || self.ai_thinking_delay_secs < 0.0 {
            return Err(ConfigError::new(format!(
                "ai_thinking_delay_secs must be a non-negative number, got {}",
                self.ai_thinking_delay_secs
            )));
        }
        Ok(())
    }

    /// Returns a copy with a different starting player.
    pub fn with_starting_player(mut self, player: Player) -> Self {
        self.starting_player = player;
        self
    }

    /// Returns a copy with a different thinking delay, in seconds.
    pub fn with_thinking_delay_secs(mut self, secs: f64) -> Self {
        self.ai_thinking_delay_secs = secs;
        self
    }

    /// Returns a copy with a different board size and win length.
    pub fn with_board(mut self, board_size: usize, win_length: usize) -> Self {
        self.board_size = board_size;
        self.win_length = win_length;
        self
    }

    /// Thinking delay as a duration. Invalid values collapse to zero.
    pub fn thinking_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.ai_thinking_delay_secs).unwrap_or_default()
    }

    /// Board geometry.
    pub fn grid(&self) -> Grid {
        Grid::new(self.board_size, self.win_length)
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
    #[instrument(skip(message))]
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
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.starting_player(), Player::Human);
        assert_eq!(config.thinking_delay(), Duration::from_millis(500));
        assert_eq!(config.grid(), Grid::new(3, 3));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("starting_player = \"computer\"").unwrap();
        assert_eq!(*config.starting_player(), Player::Computer);
        assert_eq!(*config.ai_thinking_delay_secs(), 0.5);
        assert_eq!(*config.board_size(), 3);
    }

    #[test]
    fn test_rejects_long_win_length() {
        let err = GameConfig::from_toml_str("win_length = 4").unwrap_err();
        assert!(err.message.contains("win_length"));
    }

    #[test]
    fn test_rejects_negative_delay() {
        assert!(GameConfig::from_toml_str("ai_thinking_delay_secs = -1.0").is_err());
    }

    #[test]
    fn test_rejects_unknown_key() {
        assert!(GameConfig::from_toml_str("difficulty = \"hard\"").is_err());
    }
}
