//! Round data structures: tokens, operators and number slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four arithmetic operators a player can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | 'X' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A unit of the expression being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Number(u32),
    Operator(Operator),
}

impl Token {
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Where a number card stands within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotState {
    #[default]
    Available,
    /// Part of the expression being built, not yet submitted.
    Selected,
    /// Consumed by a correct equation.
    Used,
}

/// A number card dealt for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSlot {
    pub value: u32,
    pub state: SlotState,
}

impl NumberSlot {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            state: SlotState::Available,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.state == SlotState::Available
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Correct,
    Timeout,
}

/// Per-round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Active,
    /// Waiting for the delayed transition into the next round.
    Resolved(Resolution),
}

impl RoundPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, RoundPhase::Active)
    }
}
