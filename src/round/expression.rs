//! Expression builder.
//!
//! Tokens always alternate number / operator. A trailing operator is allowed
//! while building; only submission rejects it.

use super::types::{Operator, Token};
use crate::core::error::GrammarError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The equation a player is assembling, plus the slot behind each number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    tokens: Vec<Token>,
    /// Slot index of every number token, in order of selection.
    slots: Vec<usize>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Slot indices that are pending use.
    pub fn selected_slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Append the number held in `slot`.
    pub fn select_number(&mut self, slot: usize, value: u32) -> Result<(), GrammarError> {
        if matches!(self.last(), Some(Token::Number(_))) {
            return Err(GrammarError::NumberAfterNumber);
        }
        self.tokens.push(Token::Number(value));
        self.slots.push(slot);
        Ok(())
    }

    pub fn select_operator(&mut self, op: Operator) -> Result<(), GrammarError> {
        match self.last() {
            None => Err(GrammarError::LeadingOperator),
            Some(Token::Operator(_)) => Err(GrammarError::OperatorAfterOperator),
            Some(Token::Number(_)) => {
                self.tokens.push(Token::Operator(op));
                Ok(())
            }
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.slots.clear();
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
