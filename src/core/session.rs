//! Session controller: owns the game state, the RNG and the round timers.
//!
//! All mutation goes through here. Each operation runs to completion, and
//! timer work only happens inside [`Session::advance_ms`], so user actions
//! and timer callbacks never interleave.

use super::config::GameConfig;
use super::constants::COUNTDOWN_INTERVAL_MS;
use super::error::RoundError;
use super::game_state::{Feedback, GameState, Severity};
use super::scheduler::{Scheduler, TaskHandle};
use super::snapshot::GameSnapshot;
use crate::round::evaluator::format_value;
use crate::round::logic::{self, CountdownOutcome, SubmitOutcome};
use crate::round::types::{Operator, Resolution, RoundPhase};
use rand::Rng;
use std::time::Duration;

/// Deferred work owned by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTask {
    /// Repeating one-second countdown for the active round.
    Countdown,
    /// One-shot move to the next round after a resolution.
    AdvanceRound { level_up: bool },
    /// One-shot removal of error feedback.
    ClearFeedback,
}

/// Discrete input events from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    SelectNumber(usize),
    Operator(Operator),
    Submit,
    Clear,
    NewRound,
}

/// Notifications for the host, drained with [`Session::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RoundStarted { level: u32, target: u32 },
    CountdownTick { time_left: u32 },
    Solved { points: u64, score: u64 },
    Missed { result: f64 },
    TimedOut,
    LevelUp { level: u32 },
    Feedback(Feedback),
    FeedbackCleared,
}

pub struct Session<R: Rng> {
    state: GameState,
    config: GameConfig,
    rng: R,
    scheduler: Scheduler<RoundTask>,
    countdown: Option<TaskHandle>,
    transition: Option<TaskHandle>,
    feedback_clear: Option<TaskHandle>,
    events: Vec<SessionEvent>,
}

impl<R: Rng> Session<R> {
    /// Create a session and deal the first round.
    pub fn new(config: GameConfig, rng: R) -> Self {
        let state = GameState::new(config.player_name.clone());
        let mut session = Self::bare(config, state, rng);
        session.start_new_round();
        session
    }

    /// Wrap an existing state. Its current round continues with the clock
    /// running if it is still active.
    pub fn with_state(config: GameConfig, state: GameState, rng: R) -> Self {
        let mut session = Self::bare(config, state, rng);
        if session.state.phase.is_active() {
            session.countdown = Some(
                session
                    .scheduler
                    .schedule_repeating(RoundTask::Countdown, COUNTDOWN_INTERVAL_MS),
            );
        }
        session
    }

    fn bare(config: GameConfig, state: GameState, rng: R) -> Self {
        Self {
            state,
            config,
            rng,
            scheduler: Scheduler::new(),
            countdown: None,
            transition: None,
            feedback_clear: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// Number of timers currently pending.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deal a new round at the current level, replacing any timers left
    /// over from the previous one.
    pub fn start_new_round(&mut self) {
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.transition.take() {
            self.scheduler.cancel(handle);
        }

        logic::start_round(&mut self.state, &mut self.rng);
        self.countdown = Some(
            self.scheduler
                .schedule_repeating(RoundTask::Countdown, COUNTDOWN_INTERVAL_MS),
        );

        log::info!(
            "round {} started: level {} target {} numbers {:?}",
            self.state.rounds_played,
            self.state.level,
            self.state.target,
            self.state.slots.iter().map(|s| s.value).collect::<Vec<_>>()
        );
        self.events.push(SessionEvent::RoundStarted {
            level: self.state.level,
            target: self.state.target,
        });
    }

    /// Player asked for fresh numbers, feedback cleared. A solved round
    /// still earns its level; otherwise the level stays.
    pub fn request_new_round(&mut self) {
        if self.state.phase == RoundPhase::Resolved(Resolution::Correct) {
            self.level_up();
        }
        self.start_new_round();
        self.clear_feedback();
    }

    pub fn select_number(&mut self, slot: usize) -> Result<(), RoundError> {
        let result = logic::select_number(&mut self.state, slot);
        match result {
            Ok(()) => log::debug!("selected slot {}: {}", slot, self.state.expression),
            Err(err) => self.reject(err),
        }
        result
    }

    pub fn select_operator(&mut self, op: Operator) -> Result<(), RoundError> {
        let result = logic::select_operator(&mut self.state, op);
        match result {
            Ok(()) => log::debug!("selected {}: {}", op, self.state.expression),
            Err(err) => self.reject(err),
        }
        result
    }

    /// Empty the equation. Also drops the feedback line while the round is live.
    pub fn clear(&mut self) {
        logic::clear_expression(&mut self.state);
        if self.state.phase.is_active() {
            self.clear_feedback();
        }
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, RoundError> {
        let equation = self.state.expression.to_string();
        let outcome = match logic::submit(&mut self.state) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.reject(err);
                return Err(err);
            }
        };

        match outcome {
            SubmitOutcome::Correct { points, .. } => {
                log::info!(
                    "solved '{}' = {} for {} points (score {}, streak {})",
                    equation,
                    self.state.target,
                    points,
                    self.state.score,
                    self.state.streak
                );
                if let Some(handle) = self.countdown.take() {
                    self.scheduler.cancel(handle);
                }
                self.schedule_advance(true);
                self.events.push(SessionEvent::Solved {
                    points,
                    score: self.state.score,
                });
                self.show_feedback(Feedback::new(
                    format!("\u{1F389} Correct! +{} points!", points),
                    Severity::Success,
                ));
            }
            SubmitOutcome::Incorrect { result } => {
                log::debug!("missed: '{}' = {} != {}", equation, result, self.state.target);
                self.events.push(SessionEvent::Missed { result });
                self.show_feedback(Feedback::new(
                    format!(
                        "\u{274C} {} \u{2260} {}. Try again!",
                        format_value(result),
                        self.state.target
                    ),
                    Severity::Error,
                ));
            }
        }
        Ok(outcome)
    }

    /// Dispatch one host input.
    pub fn handle_input(&mut self, input: SessionInput) -> Result<(), RoundError> {
        match input {
            SessionInput::SelectNumber(slot) => self.select_number(slot),
            SessionInput::Operator(op) => self.select_operator(op),
            SessionInput::Submit => self.submit().map(|_| ()),
            SessionInput::Clear => {
                self.clear();
                Ok(())
            }
            SessionInput::NewRound => {
                self.request_new_round();
                Ok(())
            }
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.advance_ms(ms);
    }

    /// Advance the logical clock, running every task that falls due in order.
    pub fn advance_ms(&mut self, ms: u64) {
        let horizon = self.scheduler.now_ms().saturating_add(ms);
        while let Some((handle, task)) = self.scheduler.pop_due(horizon) {
            self.run_task(handle, task);
        }
        self.scheduler.advance_to(horizon);
    }

    fn run_task(&mut self, handle: TaskHandle, task: RoundTask) {
        match task {
            RoundTask::Countdown => match logic::countdown_tick(&mut self.state) {
                CountdownOutcome::Running { time_left } => {
                    self.events.push(SessionEvent::CountdownTick { time_left });
                }
                CountdownOutcome::TimedOut => {
                    log::info!(
                        "round {} timed out at level {}",
                        self.state.rounds_played,
                        self.state.level
                    );
                    self.scheduler.cancel(handle);
                    self.countdown = None;
                    self.schedule_advance(false);
                    self.events.push(SessionEvent::CountdownTick { time_left: 0 });
                    self.events.push(SessionEvent::TimedOut);
                    self.show_feedback(Feedback::new(
                        "\u{23F0} Time's up! Try the next one!",
                        Severity::Error,
                    ));
                }
                CountdownOutcome::Idle => {
                    self.scheduler.cancel(handle);
                    self.countdown = None;
                }
            },
            RoundTask::AdvanceRound { level_up } => {
                self.transition = None;
                if level_up {
                    self.level_up();
                }
                self.start_new_round();
            }
            RoundTask::ClearFeedback => {
                self.feedback_clear = None;
                self.state.feedback = None;
                self.events.push(SessionEvent::FeedbackCleared);
            }
        }
    }

    fn level_up(&mut self) {
        self.state.level += 1;
        log::info!("level up: {}", self.state.level);
        self.events.push(SessionEvent::LevelUp {
            level: self.state.level,
        });
    }

    fn schedule_advance(&mut self, level_up: bool) {
        if let Some(handle) = self.transition.take() {
            self.scheduler.cancel(handle);
        }
        self.transition = Some(self.scheduler.schedule_once(
            RoundTask::AdvanceRound { level_up },
            self.config.advance_delay_ms,
        ));
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        if let Some(handle) = self.feedback_clear.take() {
            self.scheduler.cancel(handle);
        }
        if feedback.auto_clears() {
            self.feedback_clear = Some(
                self.scheduler
                    .schedule_once(RoundTask::ClearFeedback, self.config.feedback_clear_ms),
            );
        }
        self.state.feedback = Some(feedback.clone());
        self.events.push(SessionEvent::Feedback(feedback));
    }

    fn clear_feedback(&mut self) {
        if let Some(handle) = self.feedback_clear.take() {
            self.scheduler.cancel(handle);
        }
        if self.state.feedback.take().is_some() {
            self.events.push(SessionEvent::FeedbackCleared);
        }
    }

    fn reject(&mut self, err: RoundError) {
        log::debug!("rejected action: {:?}", err);
        if err.is_user_facing() {
            self.show_feedback(Feedback::new(err.to_string(), Severity::Error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GrammarError;
    use crate::round::types::{NumberSlot, SlotState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Session on a hand-dealt round: numbers 2, 3, 4, 10, target 5, 30s.
    fn fixed_session() -> Session<ChaCha8Rng> {
        let mut state = GameState::new("You");
        state.slots = [2, 3, 4, 10].into_iter().map(NumberSlot::new).collect();
        state.target = 5;
        state.time_left = 30;
        state.rounds_played = 1;
        Session::with_state(GameConfig::default(), state, seeded_rng())
    }

    fn enter(session: &mut Session<ChaCha8Rng>, inputs: &[SessionInput]) {
        for &input in inputs {
            session.handle_input(input).unwrap();
        }
    }

    fn two_plus_three() -> [SessionInput; 3] {
        [
            SessionInput::SelectNumber(0),
            SessionInput::Operator(Operator::Add),
            SessionInput::SelectNumber(1),
        ]
    }

    #[test]
    fn test_new_session_deals_first_round() {
        let mut session = Session::new(GameConfig::default(), seeded_rng());
        let state = session.state();
        assert_eq!(state.level, 1);
        assert_eq!(state.slots.len(), 4);
        assert_eq!(state.time_left, 34);
        assert_eq!(session.pending_timers(), 1);
        assert!(matches!(
            session.take_events().as_slice(),
            [SessionEvent::RoundStarted { level: 1, .. }]
        ));
    }

    #[test]
    fn test_countdown_ticks_each_second() {
        let mut session = fixed_session();
        session.advance_ms(999);
        assert_eq!(session.state().time_left, 30);
        session.advance_ms(1);
        assert_eq!(session.state().time_left, 29);
        session.tick(Duration::from_millis(3000));
        assert_eq!(session.state().time_left, 26);
    }

    #[test]
    fn test_correct_then_advance_after_delay() {
        let mut session = fixed_session();
        session.advance_ms(4000);
        enter(&mut session, &two_plus_three());

        let outcome = session.submit().unwrap();

        // 100 + 26*2 + 1*10 + 0*5
        assert_eq!(
            outcome,
            SubmitOutcome::Correct {
                points: 162,
                result: 5.0
            }
        );
        assert_eq!(session.state().score, 162);
        assert_eq!(session.state().streak, 1);
        assert_eq!(
            session.state().phase,
            RoundPhase::Resolved(Resolution::Correct)
        );
        assert_eq!(
            session.state().feedback.as_ref().map(|f| f.severity),
            Some(Severity::Success)
        );

        // Clock stops while resolved.
        session.advance_ms(1999);
        assert_eq!(session.state().time_left, 26);
        assert_eq!(session.state().level, 1);

        session.advance_ms(1);
        assert_eq!(session.state().level, 2);
        assert!(session.state().phase.is_active());
        assert_eq!(session.state().time_left, 33);
        assert_eq!(session.state().score, 162);
        assert_eq!(session.state().streak, 1);
        assert_eq!(session.state().rounds_played, 2);
    }

    #[test]
    fn test_incorrect_keeps_round_running() {
        let mut session = fixed_session();
        session.state.streak = 3;
        enter(
            &mut session,
            &[
                SessionInput::SelectNumber(0),
                SessionInput::Operator(Operator::Multiply),
                SessionInput::SelectNumber(1),
            ],
        );
        session.submit().unwrap();

        let state = session.state();
        assert_eq!(state.streak, 0);
        assert_eq!(state.score, 0);
        assert!(state.expression.is_empty());
        assert!(state.phase.is_active());
        assert_eq!(
            state.feedback.as_ref().map(|f| f.message.as_str()),
            Some("\u{274C} 6 \u{2260} 5. Try again!")
        );

        session.advance_ms(1000);
        assert_eq!(session.state().time_left, 29);
    }

    #[test]
    fn test_timeout_restarts_same_level() {
        let mut session = fixed_session();
        session.state.level = 3;
        session.state.streak = 2;
        session.state.time_left = 2;

        session.advance_ms(2000);
        assert_eq!(session.state().time_left, 0);
        assert_eq!(session.state().streak, 0);
        assert_eq!(
            session.state().phase,
            RoundPhase::Resolved(Resolution::Timeout)
        );
        let events = session.take_events();
        assert!(events.contains(&SessionEvent::TimedOut));

        session.advance_ms(2000);
        assert_eq!(session.state().level, 3);
        assert!(session.state().phase.is_active());
        assert_eq!(session.state().time_left, 32);
    }

    #[test]
    fn test_error_feedback_auto_clears() {
        let mut session = fixed_session();
        assert_eq!(
            session.select_operator(Operator::Add),
            Err(RoundError::Grammar(GrammarError::LeadingOperator))
        );
        assert_eq!(
            session.state().feedback,
            Some(Feedback::new("Select a number first!", Severity::Error))
        );

        session.advance_ms(2999);
        assert!(session.state().feedback.is_some());
        session.advance_ms(1);
        assert!(session.state().feedback.is_none());
    }

    #[test]
    fn test_newer_error_restarts_clear_timer() {
        let mut session = fixed_session();
        let _ = session.select_operator(Operator::Add);
        session.advance_ms(2000);
        let _ = session.submit();

        session.advance_ms(1500);
        assert_eq!(
            session.state().feedback.as_ref().map(|f| f.message.as_str()),
            Some("Build an equation first!")
        );
        session.advance_ms(1500);
        assert!(session.state().feedback.is_none());
    }

    #[test]
    fn test_division_by_zero_surfaces_invalid_equation() {
        let mut state = GameState::new("You");
        state.slots = [8, 0, 4, 10].into_iter().map(NumberSlot::new).collect();
        state.target = 5;
        state.time_left = 30;
        let mut session = Session::with_state(GameConfig::default(), state, seeded_rng());

        enter(
            &mut session,
            &[
                SessionInput::SelectNumber(0),
                SessionInput::Operator(Operator::Divide),
                SessionInput::SelectNumber(1),
            ],
        );
        assert!(session.submit().is_err());
        assert_eq!(
            session.state().feedback.as_ref().map(|f| f.message.as_str()),
            Some("Invalid equation!")
        );
        assert_eq!(session.state().expression.tokens().len(), 3);
    }

    #[test]
    fn test_actions_rejected_silently_while_resolved() {
        let mut session = fixed_session();
        enter(&mut session, &two_plus_three());
        session.submit().unwrap();
        let feedback = session.state().feedback.clone();

        assert_eq!(
            session.select_number(2),
            Err(RoundError::RoundResolved)
        );
        assert_eq!(session.state().feedback, feedback);
        assert_eq!(session.state().slots[0].state, SlotState::Used);
    }

    #[test]
    fn test_new_round_after_solve_keeps_level_up() {
        let mut session = fixed_session();
        enter(&mut session, &two_plus_three());
        session.submit().unwrap();
        session.take_events();

        session.request_new_round();
        assert_eq!(session.state().level, 2);
        assert!(session.state().phase.is_active());
        assert!(session.state().feedback.is_none());
        assert_eq!(session.pending_timers(), 1);
        assert!(session
            .take_events()
            .contains(&SessionEvent::LevelUp { level: 2 }));

        // The stale advance from the solved round must not fire.
        session.advance_ms(5000);
        assert_eq!(session.state().level, 2);
        assert_eq!(session.state().time_left, 28);
        assert_eq!(session.state().streak, 1);
    }

    #[test]
    fn test_new_round_mid_round_keeps_level() {
        let mut session = fixed_session();
        session.request_new_round();
        assert_eq!(session.state().level, 1);
        assert_eq!(session.state().time_left, 34);
    }

    #[test]
    fn test_rapid_restarts_keep_one_countdown() {
        let mut session = Session::new(GameConfig::default(), seeded_rng());
        for _ in 0..5 {
            session.request_new_round();
        }
        assert_eq!(session.pending_timers(), 1);
        session.advance_ms(1000);
        assert_eq!(session.state().time_left, 33);
    }

    #[test]
    fn test_clear_resets_equation() {
        let mut session = fixed_session();
        enter(
            &mut session,
            &[
                SessionInput::SelectNumber(2),
                SessionInput::Operator(Operator::Subtract),
            ],
        );
        session.handle_input(SessionInput::Clear).unwrap();
        session.handle_input(SessionInput::Clear).unwrap();
        assert!(session.state().expression.is_empty());
        assert_eq!(session.state().slots[2].state, SlotState::Available);
    }

    #[test]
    fn test_custom_delays_from_config() {
        let config = GameConfig {
            advance_delay_ms: 500,
            ..Default::default()
        };
        let mut state = GameState::new("You");
        state.slots = [2, 3, 4, 10].into_iter().map(NumberSlot::new).collect();
        state.target = 5;
        state.time_left = 30;
        let mut session = Session::with_state(config, state, seeded_rng());
        enter(&mut session, &two_plus_three());
        session.submit().unwrap();
        session.advance_ms(500);
        assert_eq!(session.state().level, 2);
    }
}
