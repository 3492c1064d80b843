//! User configuration read from ~/.numcrunch/config.json.

use super::constants::{ADVANCE_DELAY_MS, DEFAULT_PLAYER_NAME, FEEDBACK_CLEAR_MS};
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.json";

/// Every field is optional in the file; missing ones take the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Name shown for the live entry on the leaderboard.
    pub player_name: String,
    /// Pause between a resolved round and the next one.
    pub advance_delay_ms: u64,
    /// How long error feedback stays on screen.
    pub feedback_clear_ms: u64,
    /// `log` level filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Fixed RNG seed for reproducible deals.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            advance_delay_ms: ADVANCE_DELAY_MS,
            feedback_clear_ms: FEEDBACK_CLEAR_MS,
            log_level: "warn".to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load() -> Self {
        load_json_or_default::<GameConfig>(CONFIG_FILE).sanitized()
    }

    /// Replace values that would break the game with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.player_name.trim().is_empty() {
            self.player_name = defaults.player_name;
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            self.log_level = defaults.log_level;
        }
        self
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.player_name, "You");
        assert_eq!(config.advance_delay_ms, 2000);
        assert_eq!(config.feedback_clear_ms, 3000);
        assert_eq!(config.level_filter(), log::LevelFilter::Warn);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "player_name": "Ada", "seed": 9 }"#).unwrap();
        assert_eq!(config.player_name, "Ada");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.advance_delay_ms, ADVANCE_DELAY_MS);
    }

    #[test]
    fn test_sanitize() {
        let config = GameConfig {
            player_name: "   ".to_string(),
            log_level: "chatty".to_string(),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.player_name, "You");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_level_filter_parses() {
        let config = GameConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }
}
