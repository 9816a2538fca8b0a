//! Calculator engine.
//!
//! This module provides:
//! - Typed keypad commands and label parsing
//! - Pure evaluation helpers for binary operators, unary functions and factorial
//! - The engine state machine producing a display value and an expression trail
//! - Tokenizing typed key labels for headless use

mod command;
mod engine;
mod evaluation;
mod keys;
mod snapshot;

pub use command::{BinaryOperator, Bracket, Command, Function, KeyError, UnaryFunction};
pub use engine::{ERROR_DISPLAY, Engine, INITIAL_DISPLAY, Mode};
pub use evaluation::{
    CalcError, MAX_FACTORIAL, apply_binary, apply_unary, factorial, format_number, parse_operand,
};
pub use keys::parse_keys;
pub use snapshot::Snapshot;
