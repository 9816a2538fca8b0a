//! Keypad commands accepted by the calculator engine.
//!
//! Every button on the keypad maps to exactly one [`Command`]. Labels are
//! parsed with [`FromStr`] so a UI (or the headless shell) can forward the
//! text printed on a button without knowing the engine's types.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a key label does not name any keypad button.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key: {0}")]
    Unknown(String),
    #[error("digit out of range: {0}")]
    DigitOutOfRange(u8),
}

/// Binary operators that wait for a second operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    /// The symbol written into the trail.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Bracket keys. They shape the trail only and never group evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Open,
    Close,
}

/// Single-operand functions. `Pi` and `E` ignore their operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tg,
    Square,
    Reciprocal,
    Abs,
    Sqrt,
    Pi,
    E,
    Pow10,
    Log,
    Ln,
}

impl UnaryFunction {
    /// Button label, also used as the function name in the trail.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tg => "tg",
            Self::Square => "x^2",
            Self::Reciprocal => "1/x",
            Self::Abs => "|x|",
            Self::Sqrt => "2√x",
            Self::Pi => "π",
            Self::E => "e",
            Self::Pow10 => "10^x",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }
}

/// Function buttons. Power and factorial have their own flows in the
/// engine; everything else is a plain unary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Unary(UnaryFunction),
    /// `x^y`: captures the display as base and waits for the exponent.
    PowerStart,
    /// `n!`
    Factorial,
}

/// One keypad button press.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A digit `0..=9`. Build with [`Command::digit`] to have the range checked.
    Digit(u8),
    DecimalPoint,
    SignChange,
    Operator(BinaryOperator),
    Bracket(Bracket),
    Function(Function),
    Equals,
    ClearEntry,
    ClearAll,
    /// Raw text typed straight into the display. Not validated until the
    /// next command parses it.
    Paste(String),
}

impl Command {
    /// Digit press for `value`, rejecting anything above 9.
    pub fn digit(value: u8) -> Result<Self, KeyError> {
        if value > 9 {
            return Err(KeyError::DigitOutOfRange(value));
        }
        Ok(Self::Digit(value))
    }
}

impl FromStr for Command {
    type Err = KeyError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let command = match label {
            "." => Self::DecimalPoint,
            "+/-" | "±" => Self::SignChange,
            "+" => Self::Operator(BinaryOperator::Add),
            "-" => Self::Operator(BinaryOperator::Subtract),
            "*" => Self::Operator(BinaryOperator::Multiply),
            "/" => Self::Operator(BinaryOperator::Divide),
            "^" => Self::Operator(BinaryOperator::Power),
            "(" => Self::Bracket(Bracket::Open),
            ")" => Self::Bracket(Bracket::Close),
            "=" => Self::Equals,
            "CE" => Self::ClearEntry,
            "C" => Self::ClearAll,
            "x^y" => Self::Function(Function::PowerStart),
            "n!" => Self::Function(Function::Factorial),
            "sin" => Self::Function(Function::Unary(UnaryFunction::Sin)),
            "cos" => Self::Function(Function::Unary(UnaryFunction::Cos)),
            "tg" => Self::Function(Function::Unary(UnaryFunction::Tg)),
            "x^2" => Self::Function(Function::Unary(UnaryFunction::Square)),
            "1/x" => Self::Function(Function::Unary(UnaryFunction::Reciprocal)),
            "|x|" | "abs" => Self::Function(Function::Unary(UnaryFunction::Abs)),
            "2√x" | "sqrt" => Self::Function(Function::Unary(UnaryFunction::Sqrt)),
            "π" | "pi" => Self::Function(Function::Unary(UnaryFunction::Pi)),
            "e" => Self::Function(Function::Unary(UnaryFunction::E)),
            "10^x" => Self::Function(Function::Unary(UnaryFunction::Pow10)),
            "log" => Self::Function(Function::Unary(UnaryFunction::Log)),
            "ln" => Self::Function(Function::Unary(UnaryFunction::Ln)),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::digit(c as u8 - b'0')?,
                    _ => return Err(KeyError::Unknown(label.to_string())),
                }
            }
        };
        Ok(command)
    }
}
