//! Error kinds raised by the round engine.
//!
//! None of these are fatal. The session rejects the offending action,
//! leaves state untouched and turns the error into a feedback message.

use thiserror::Error;

/// A build-time action that would break the number/operator alternation,
/// or that targets a number slot that cannot be used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Select an operator first!")]
    NumberAfterNumber,
    #[error("Select a number first!")]
    LeadingOperator,
    #[error("Cannot add operator after operator!")]
    OperatorAfterOperator,
    #[error("That number is not available!")]
    SlotUnavailable { slot: usize },
}

/// A token sequence that cannot be evaluated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidExpressionError {
    #[error("Build an equation first!")]
    Empty,
    #[error("Equation cannot end with an operator!")]
    TrailingOperator,
    #[error("Invalid equation!")]
    Malformed { position: usize },
}

/// Arithmetic that has no finite answer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Invalid equation!")]
    DivisionByZero,
    #[error("Invalid equation!")]
    NonFinite,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpressionError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Anything a session operation can reject.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpressionError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("The round is over")]
    RoundResolved,
}

impl From<EvalError> for RoundError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::InvalidExpression(e) => RoundError::InvalidExpression(e),
            EvalError::Arithmetic(e) => RoundError::Arithmetic(e),
        }
    }
}

impl RoundError {
    /// Whether the player should see this error as a feedback message.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, RoundError::RoundResolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_messages() {
        assert_eq!(
            GrammarError::NumberAfterNumber.to_string(),
            "Select an operator first!"
        );
        assert_eq!(
            GrammarError::LeadingOperator.to_string(),
            "Select a number first!"
        );
        assert_eq!(
            GrammarError::OperatorAfterOperator.to_string(),
            "Cannot add operator after operator!"
        );
    }

    #[test]
    fn test_arithmetic_surfaces_as_invalid_equation() {
        let err: RoundError = EvalError::from(ArithmeticError::DivisionByZero).into();
        assert_eq!(err, RoundError::Arithmetic(ArithmeticError::DivisionByZero));
        assert_eq!(err.to_string(), "Invalid equation!");
    }

    #[test]
    fn test_eval_error_flattens_into_round_error() {
        let err: RoundError = EvalError::from(InvalidExpressionError::TrailingOperator).into();
        assert_eq!(
            err,
            RoundError::InvalidExpression(InvalidExpressionError::TrailingOperator)
        );
        assert_eq!(err.to_string(), "Equation cannot end with an operator!");
    }

    #[test]
    fn test_round_resolved_is_silent() {
        assert!(!RoundError::RoundResolved.is_user_facing());
        assert!(RoundError::from(GrammarError::LeadingOperator).is_user_facing());
    }
}
