//! Left-to-right expression evaluation.
//!
//! There is no operator precedence: `2 + 3 * 4` is `(2 + 3) * 4 = 20`.

use super::types::{Operator, Token};
use crate::core::error::{ArithmeticError, EvalError, InvalidExpressionError};

fn apply(lhs: f64, op: Operator, rhs: f64) -> Result<f64, ArithmeticError> {
    let value = match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => {
            if rhs == 0.0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            lhs / rhs
        }
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFinite)
    }
}

/// Round to two decimals, halves towards positive infinity.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Evaluate `tokens` strictly left to right and round to two decimals.
///
/// The sequence must be number, operator, number, ... ending on a number.
pub fn evaluate(tokens: &[Token]) -> Result<f64, EvalError> {
    let (first, rest) = match tokens {
        [] => return Err(InvalidExpressionError::Empty.into()),
        [.., Token::Operator(_)] => return Err(InvalidExpressionError::TrailingOperator.into()),
        [Token::Operator(_), ..] => {
            return Err(InvalidExpressionError::Malformed { position: 0 }.into())
        }
        [Token::Number(first), rest @ ..] => (*first, rest),
    };

    let mut result = f64::from(first);
    for (i, pair) in rest.chunks(2).enumerate() {
        let position = 1 + i * 2;
        match *pair {
            [Token::Operator(op), Token::Number(n)] => {
                result = apply(result, op, f64::from(n))?;
            }
            [Token::Operator(_), Token::Operator(_)] => {
                return Err(InvalidExpressionError::Malformed {
                    position: position + 1,
                }
                .into());
            }
            _ => return Err(InvalidExpressionError::Malformed { position }.into()),
        }
    }

    let rounded = round_to_cents(result);
    if !rounded.is_finite() {
        return Err(ArithmeticError::NonFinite.into());
    }
    Ok(rounded)
}

/// Render an evaluation result the way the feedback line shows it:
/// whole numbers without decimals, otherwise up to two places.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').to_string()
    }
}
