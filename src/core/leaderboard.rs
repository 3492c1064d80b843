//! In-memory leaderboard: fixed seed entries plus the live player score.

use super::constants::LEADERBOARD_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// A ranked row ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub score: u64,
    pub is_player: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub player_name: String,
}

impl Leaderboard {
    pub fn seeded(player_name: impl Into<String>) -> Self {
        let entries = [
            ("Math Wizard", 1250),
            ("Number Ninja", 980),
            ("Puzzle Master", 750),
        ]
        .into_iter()
        .map(|(name, score)| LeaderboardEntry {
            name: name.to_string(),
            score,
        })
        .collect();

        Self {
            entries,
            player_name: player_name.into(),
        }
    }

    /// Seed entries plus the player (once they have scored), best first,
    /// truncated to the display size. Ties keep seed entries ahead.
    pub fn standings(&self, player_score: u64) -> Vec<Standing> {
        let mut rows: Vec<(&str, u64, bool)> = self
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.score, false))
            .collect();
        if player_score > 0 {
            rows.push((self.player_name.as_str(), player_score, true));
        }
        rows.sort_by(|a, b| b.1.cmp(&a.1));

        rows.into_iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(i, (name, score, is_player))| Standing {
                rank: i + 1,
                name: name.to_string(),
                score,
                is_player,
            })
            .collect()
    }

    /// 1-based rank the player would hold with `player_score`.
    pub fn player_rank(&self, player_score: u64) -> usize {
        1 + self
            .entries
            .iter()
            .filter(|e| e.score >= player_score)
            .count()
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::seeded(super::constants::DEFAULT_PLAYER_NAME)
    }
}
