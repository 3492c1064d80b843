//! Session state, timers, configuration and error types.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod error;
pub mod game_state;
pub mod leaderboard;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use config::GameConfig;
pub use constants::*;
pub use error::*;
pub use game_state::*;
pub use leaderboard::{Leaderboard, LeaderboardEntry, Standing};
pub use scheduler::{Scheduler, TaskHandle};
pub use session::{RoundTask, Session, SessionEvent, SessionInput};
pub use snapshot::{format_score, GameSnapshot};
