//! Round state transitions on a `GameState`.
//!
//! These functions know nothing about timers. The session decides when a
//! countdown tick or a delayed round change happens and calls in here.

use super::expression::Expression;
use super::generator::{generate_numbers, generate_target, round_duration};
use super::scoring::{judge, points, Verdict};
use super::types::{NumberSlot, Operator, Resolution, RoundPhase, SlotState};
use crate::core::error::{GrammarError, RoundError};
use crate::core::game_state::GameState;
use rand::Rng;

/// What a submission did to the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    Correct { points: u64, result: f64 },
    Incorrect { result: f64 },
}

/// What one countdown tick did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Running { time_left: u32 },
    TimedOut,
    /// The round was already resolved; nothing changed.
    Idle,
}

/// Deal a fresh round at the current level. Score, level and streak carry over.
pub fn start_round<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.slots = generate_numbers(state.level, rng)
        .into_iter()
        .map(NumberSlot::new)
        .collect();
    state.target = generate_target(state.level, rng);
    state.expression = Expression::new();
    state.time_left = round_duration(state.level);
    state.phase = RoundPhase::Active;
    state.rounds_played += 1;
}

fn ensure_active(state: &GameState) -> Result<(), RoundError> {
    if state.phase.is_active() {
        Ok(())
    } else {
        Err(RoundError::RoundResolved)
    }
}

/// Add the number in `slot` to the expression and mark it pending use.
pub fn select_number(state: &mut GameState, slot: usize) -> Result<(), RoundError> {
    ensure_active(state)?;
    let number = match state.slots.get(slot) {
        Some(s) if s.is_selectable() => *s,
        _ => return Err(GrammarError::SlotUnavailable { slot }.into()),
    };
    state.expression.select_number(slot, number.value)?;
    state.slots[slot].state = SlotState::Selected;
    Ok(())
}

pub fn select_operator(state: &mut GameState, op: Operator) -> Result<(), RoundError> {
    ensure_active(state)?;
    state.expression.select_operator(op)?;
    Ok(())
}

/// Empty the expression and release every pending slot.
pub fn clear_expression(state: &mut GameState) {
    state.expression.clear();
    for slot in state.slots.iter_mut() {
        if slot.state == SlotState::Selected {
            slot.state = SlotState::Available;
        }
    }
}

/// Check the expression against the target and apply score and streak.
/// On error nothing changes.
pub fn submit(state: &mut GameState) -> Result<SubmitOutcome, RoundError> {
    ensure_active(state)?;
    let verdict = judge(state.expression.tokens(), state.target)?;

    match verdict {
        Verdict::Correct { result } => {
            let earned = points(state.time_left, state.level, state.streak);
            state.score += earned;
            state.streak += 1;
            state.best_streak = state.best_streak.max(state.streak);
            state.rounds_solved += 1;

            for &slot in state.expression.selected_slots() {
                if let Some(s) = state.slots.get_mut(slot) {
                    s.state = SlotState::Used;
                }
            }
            state.phase = RoundPhase::Resolved(Resolution::Correct);
            Ok(SubmitOutcome::Correct {
                points: earned,
                result,
            })
        }
        Verdict::Incorrect { result } => {
            state.streak = 0;
            clear_expression(state);
            Ok(SubmitOutcome::Incorrect { result })
        }
    }
}

/// Take one second off the clock; at zero the round times out.
pub fn countdown_tick(state: &mut GameState) -> CountdownOutcome {
    if !state.phase.is_active() {
        return CountdownOutcome::Idle;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left > 0 {
        return CountdownOutcome::Running {
            time_left: state.time_left,
        };
    }
    state.streak = 0;
    state.phase = RoundPhase::Resolved(Resolution::Timeout);
    CountdownOutcome::TimedOut
}
