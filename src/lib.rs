//! numcrunch - terminal arithmetic puzzle game.
//!
//! Combine the dealt numbers with `+ - * /` to hit the target before the
//! clock runs out. This library holds the round engine and the session
//! controller; the binary adds the terminal UI.

pub mod core;
pub mod round;
pub mod utils;

pub use crate::core::{
    GameConfig, GameSnapshot, GameState, RoundError, Session, SessionEvent, SessionInput,
};
pub use crate::round::{evaluate, Operator, Token};
