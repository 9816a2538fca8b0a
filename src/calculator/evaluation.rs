//! Pure evaluation helpers used by the engine.
//!
//! Nothing in here touches engine state. Every operation that can fail
//! returns a [`CalcError`]; the engine decides what to show.

use std::f64::consts;

use thiserror::Error;

use super::command::{BinaryOperator, UnaryFunction};

/// Largest `n` whose factorial still fits in an `f64`.
pub const MAX_FACTORIAL: i64 = 170;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Attempted to divide by zero.")]
    DivideByZero,
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("The input string '{input}' was not in a correct format.")]
    ParseFailure { input: String },
}

/// Parse display text as an operand.
pub fn parse_operand(text: &str) -> Result<f64, CalcError> {
    text.parse::<f64>().map_err(|_| CalcError::ParseFailure {
        input: text.to_string(),
    })
}

/// Evaluate `lhs op rhs`.
pub fn apply_binary(lhs: f64, op: BinaryOperator, rhs: f64) -> Result<f64, CalcError> {
    match op {
        BinaryOperator::Add => Ok(lhs + rhs),
        BinaryOperator::Subtract => Ok(lhs - rhs),
        BinaryOperator::Multiply => Ok(lhs * rhs),
        BinaryOperator::Divide if rhs == 0.0 => Err(CalcError::DivideByZero),
        BinaryOperator::Divide => Ok(lhs / rhs),
        BinaryOperator::Power => Ok(lhs.powf(rhs)),
    }
}

/// Evaluate a unary function. Trigonometric functions take degrees.
pub fn apply_unary(function: UnaryFunction, value: f64) -> Result<f64, CalcError> {
    let result = match function {
        UnaryFunction::Sin => value.to_radians().sin(),
        UnaryFunction::Cos => value.to_radians().cos(),
        UnaryFunction::Tg => value.to_radians().tan(),
        UnaryFunction::Square => value.powi(2),
        UnaryFunction::Reciprocal if value == 0.0 => return Err(CalcError::DivideByZero),
        UnaryFunction::Reciprocal => 1.0 / value,
        UnaryFunction::Abs => value.abs(),
        UnaryFunction::Sqrt => value.sqrt(),
        UnaryFunction::Pi => consts::PI,
        UnaryFunction::E => consts::E,
        UnaryFunction::Pow10 => 10f64.powf(value),
        UnaryFunction::Log => value.log10(),
        UnaryFunction::Ln => value.ln(),
    };
    Ok(result)
}

/// Factorial of a non-negative integer up to [`MAX_FACTORIAL`].
pub fn factorial(n: i64) -> Result<f64, CalcError> {
    if n < 0 {
        return Err(CalcError::InvalidArgument(
            "Factorial of negative number is undefined",
        ));
    }
    if n > MAX_FACTORIAL {
        return Err(CalcError::InvalidArgument(
            "Value too large for factorial calculation",
        ));
    }

    Ok((2..=n).fold(1.0, |acc, i| acc * i as f64))
}

/// Format a number the way it is shown on the display and in the trail.
///
/// Uses the shortest representation that parses back to the same value.
/// Very large and very small magnitudes switch to `E` notation with a
/// signed, two-digit exponent.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        // Also covers negative zero.
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-4..1e15).contains(&magnitude) {
        format_scientific(value)
    } else {
        format!("{}", value)
    }
}

fn format_scientific(value: f64) -> String {
    let formatted = format!("{:e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}E{}{:0>2}", mantissa, sign, digits)
}
