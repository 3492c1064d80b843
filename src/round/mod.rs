//! The round engine: dealing numbers, building an equation, scoring it.

#![allow(unused_imports)]

pub mod evaluator;
pub mod expression;
pub mod generator;
pub mod logic;
pub mod scoring;
pub mod types;

pub use evaluator::{evaluate, format_value};
pub use expression::Expression;
pub use generator::{generate_numbers, generate_target, round_duration};
pub use logic::{CountdownOutcome, SubmitOutcome};
pub use scoring::{judge, points, Verdict};
pub use types::*;
