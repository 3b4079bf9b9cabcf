//! Binary operators and the arithmetic behind a commit.
//!
//! Everything here is plain `f64` math with no precedence: the engine folds
//! each operand into the accumulator strictly left to right.

use serde::Serialize;
use thiserror::Error;

/// One of the four operator keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol shown on the keypad button.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// Arithmetic failure that puts the engine into its latched error state.
///
/// These never reach the caller as a `Result`; the engine shows the error
/// token instead and keeps the variant for logging and inspection.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathError {
    #[error("division by zero")]
    DivideByZero,
    #[error("square root of a negative number")]
    NegativeSquareRoot,
}

/// Fold `operand` into `accumulator` with `operator`.
///
/// Only division is guarded; a zero divisor yields [`MathError::DivideByZero`]
/// and leaves the accumulator for the caller to remember.
pub fn combine(accumulator: f64, operator: Operator, operand: f64) -> Result<f64, MathError> {
    match operator {
        Operator::Add => Ok(accumulator + operand),
        Operator::Subtract => Ok(accumulator - operand),
        Operator::Multiply => Ok(accumulator * operand),
        Operator::Divide => {
            if operand == 0.0 {
                Err(MathError::DivideByZero)
            } else {
                Ok(accumulator / operand)
            }
        }
    }
}

/// Square root that refuses negative input.
pub fn square_root(value: f64) -> Result<f64, MathError> {
    if value < 0.0 {
        Err(MathError::NegativeSquareRoot)
    } else {
        Ok(value.sqrt())
    }
}

/// Reciprocal with no zero guard: `1/0` is infinite.
pub fn reciprocal(value: f64) -> f64 {
    1.0 / value
}
