use super::leaderboard::Leaderboard;
use crate::round::expression::Expression;
use crate::round::generator::round_duration;
use crate::round::types::{NumberSlot, RoundPhase};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Message shown under the equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub severity: Severity,
}

impl Feedback {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Error messages clear themselves after a short delay.
    pub fn auto_clears(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Whole-session game state. Owned by a `Session`; the UI only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub level: u32,
    pub streak: u32,
    pub target: u32,
    pub slots: Vec<NumberSlot>,
    pub expression: Expression,
    pub time_left: u32,
    pub phase: RoundPhase,
    pub feedback: Option<Feedback>,
    pub leaderboard: Leaderboard,
    /// Rounds started this session, including the current one.
    pub rounds_played: u32,
    pub rounds_solved: u32,
    pub best_streak: u32,
}

impl GameState {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            score: 0,
            level: 1,
            streak: 0,
            target: 0,
            slots: Vec::new(),
            expression: Expression::new(),
            time_left: round_duration(1),
            phase: RoundPhase::Active,
            feedback: None,
            leaderboard: Leaderboard::seeded(player_name),
            rounds_played: 0,
            rounds_solved: 0,
            best_streak: 0,
        }
    }

    /// Seconds on the clock when the current round started.
    pub fn round_duration(&self) -> u32 {
        round_duration(self.level)
    }

    /// Fraction of round time left, 0.0..=1.0.
    pub fn time_fraction(&self) -> f64 {
        let total = self.round_duration();
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.time_left) / f64::from(total)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new("You");
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.streak, 0);
        assert!(state.expression.is_empty());
        assert!(state.phase.is_active());
        assert_eq!(state.leaderboard.player_name, "You");
    }

    #[test]
    fn test_time_fraction() {
        let mut state = GameState::new("You");
        state.time_left = 34;
        assert_eq!(state.time_fraction(), 1.0);
        state.time_left = 17;
        assert_eq!(state.time_fraction(), 0.5);
        state.time_left = 0;
        assert_eq!(state.time_fraction(), 0.0);
    }

    #[test]
    fn test_only_errors_auto_clear() {
        assert!(Feedback::new("x", Severity::Error).auto_clears());
        assert!(!Feedback::new("x", Severity::Success).auto_clears());
        assert!(!Feedback::new("x", Severity::Info).auto_clears());
    }
}
