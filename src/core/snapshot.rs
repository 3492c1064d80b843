//! Read-only view of a session handed to the renderer.

use super::game_state::{Feedback, GameState};
use super::leaderboard::Standing;
use crate::round::types::{NumberSlot, RoundPhase};
use serde::Serialize;

/// Placeholder shown while no token has been picked.
pub const EMPTY_EQUATION_HINT: &str = "Select numbers and operators to build your equation";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub score: u64,
    pub level: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub target: u32,
    pub numbers: Vec<NumberSlot>,
    /// Equation as typed, e.g. `"2 + 3"`. Empty when nothing is selected.
    pub equation: String,
    pub time_left: u32,
    pub round_duration: u32,
    pub time_fraction: f64,
    pub phase: RoundPhase,
    pub feedback: Option<Feedback>,
    pub standings: Vec<Standing>,
    pub player_rank: usize,
    pub rounds_played: u32,
    pub rounds_solved: u32,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            streak: state.streak,
            best_streak: state.best_streak,
            target: state.target,
            numbers: state.slots.clone(),
            equation: state.expression.to_string(),
            time_left: state.time_left,
            round_duration: state.round_duration(),
            time_fraction: state.time_fraction(),
            phase: state.phase,
            feedback: state.feedback.clone(),
            standings: state.leaderboard.standings(state.score),
            player_rank: state.leaderboard.player_rank(state.score),
            rounds_played: state.rounds_played,
            rounds_solved: state.rounds_solved,
        }
    }

    /// Equation text, or the hint when it is empty.
    pub fn equation_display(&self) -> &str {
        if self.equation.is_empty() {
            EMPTY_EQUATION_HINT
        } else {
            &self.equation
        }
    }
}

/// Format a score with thousands separators, e.g. `12,345`.
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
