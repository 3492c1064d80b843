//! Answer checking and points.

use super::evaluator::evaluate;
use super::types::Token;
use crate::core::constants::{
    ANSWER_TOLERANCE, BASE_POINTS, LEVEL_BONUS_PER_LEVEL, STREAK_BONUS_PER_STREAK,
    TIME_BONUS_PER_SECOND,
};
use crate::core::error::EvalError;

/// Outcome of comparing an evaluated expression with the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Correct { result: f64 },
    Incorrect { result: f64 },
}

impl Verdict {
    pub fn result(&self) -> f64 {
        match self {
            Verdict::Correct { result } | Verdict::Incorrect { result } => *result,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }
}

/// Points awarded for a correct answer. `streak` is the count before this
/// answer is added to it.
pub fn points(time_left: u32, level: u32, streak: u32) -> u64 {
    let time_bonus = u64::from(time_left) * TIME_BONUS_PER_SECOND;
    let level_bonus = u64::from(level) * LEVEL_BONUS_PER_LEVEL;
    let streak_bonus = u64::from(streak) * STREAK_BONUS_PER_STREAK;
    BASE_POINTS + time_bonus + level_bonus + streak_bonus
}

pub fn matches_target(result: f64, target: u32) -> bool {
    (result - f64::from(target)).abs() < ANSWER_TOLERANCE
}

/// Evaluate `tokens` and compare against `target`.
pub fn judge(tokens: &[Token], target: u32) -> Result<Verdict, EvalError> {
    let result = evaluate(tokens)?;
    if matches_target(result, target) {
        Ok(Verdict::Correct { result })
    } else {
        Ok(Verdict::Incorrect { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{ArithmeticError, InvalidExpressionError};
    use crate::round::types::Operator;

    fn two_plus_three() -> Vec<Token> {
        vec![
            Token::Number(2),
            Token::Operator(Operator::Add),
            Token::Number(3),
        ]
    }

    #[test]
    fn test_points_formula() {
        // 100 + 30*2 + 1*10 + 0*5
        assert_eq!(points(30, 1, 0), 170);
        // 100 + 12*2 + 4*10 + 3*5
        assert_eq!(points(12, 4, 3), 179);
        assert_eq!(points(0, 1, 0), 110);
    }

    #[test]
    fn test_judge_correct() {
        let verdict = judge(&two_plus_three(), 5).unwrap();
        assert!(verdict.is_correct());
        assert_eq!(verdict.result(), 5.0);
    }

    #[test]
    fn test_judge_incorrect() {
        let verdict = judge(&two_plus_three(), 6).unwrap();
        assert_eq!(verdict, Verdict::Incorrect { result: 5.0 });
    }

    #[test]
    fn test_judge_fractional_never_matches_integer_target() {
        let tokens = vec![
            Token::Number(10),
            Token::Operator(Operator::Divide),
            Token::Number(3),
        ];
        assert!(!judge(&tokens, 3).unwrap().is_correct());
    }

    #[test]
    fn test_judge_propagates_errors() {
        let trailing = vec![Token::Number(2), Token::Operator(Operator::Add)];
        assert_eq!(
            judge(&trailing, 2),
            Err(EvalError::InvalidExpression(
                InvalidExpressionError::TrailingOperator
            ))
        );

        let div_zero = vec![
            Token::Number(2),
            Token::Operator(Operator::Divide),
            Token::Number(0),
        ];
        assert_eq!(
            judge(&div_zero, 2),
            Err(EvalError::Arithmetic(ArithmeticError::DivisionByZero))
        );
    }

    #[test]
    fn test_tolerance() {
        assert!(matches_target(5.0005, 5));
        assert!(!matches_target(5.01, 5));
    }
}
