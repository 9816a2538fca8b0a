//! The calculator state machine.
//!
//! An [`Engine`] owns the display text, the expression trail, the running
//! accumulator and the current [`Mode`]. Commands are applied one at a
//! time; after each one the UI reads [`Engine::display`] and
//! [`Engine::trail`] (or a [`Snapshot`]) and re-renders.

use tracing::{debug, warn};

use super::command::{BinaryOperator, Bracket, Command, Function, UnaryFunction};
use super::evaluation::{
    CalcError, apply_binary, apply_unary, factorial, format_number, parse_operand,
};
use super::snapshot::Snapshot;

/// Display text after construction and after a clear.
pub const INITIAL_DISPLAY: &str = "0";

/// Display text while the engine is in the error state.
pub const ERROR_DISPLAY: &str = "Error";

/// Mutually exclusive engine modes.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// No operation in progress.
    Idle,
    /// A binary operator is waiting for its right operand.
    AwaitingBinaryOp(BinaryOperator),
    /// `x^y` was pressed; `base` is raised to the next operand on `=`.
    /// `bracket_open` tracks a `(` typed around the exponent.
    PowerPending { base: f64, bracket_open: bool },
    /// A `(` is open. Brackets only shape the trail, so any operator that
    /// was pending when it opened is carried along untouched.
    BracketOpen { pending: Option<BinaryOperator> },
    /// The last command failed. The next command resets first.
    Error,
}

/// Keypad calculator state: display, trail, accumulator and mode.
#[derive(Debug, Clone)]
pub struct Engine {
    display: String,
    trail: String,
    last_result: f64,
    mode: Mode,
    new_input_expected: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// A cleared engine showing `0` with an empty trail.
    pub fn new() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            trail: String::new(),
            last_result: 0.0,
            mode: Mode::Idle,
            new_input_expected: false,
        }
    }

    /// Current operand text, or [`ERROR_DISPLAY`].
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Expression history, or the last error message.
    pub fn trail(&self) -> &str {
        &self.trail
    }

    /// Whether the last command failed.
    pub fn is_error(&self) -> bool {
        self.mode == Mode::Error
    }

    /// The current mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The accumulator of the in-progress binary computation.
    pub fn last_result(&self) -> f64 {
        self.last_result
    }

    /// Copy of the two rendered strings and the error flag.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            trail: self.trail.clone(),
            is_error: self.is_error(),
        }
    }

    /// Apply a single command.
    ///
    /// Failures never escape: they put the engine into [`Mode::Error`],
    /// which the following command clears before doing anything else.
    pub fn apply(&mut self, command: Command) {
        debug!(?command, mode = ?self.mode, "applying command");

        if self.mode == Mode::Error {
            self.reset();
        }

        let outcome = match command {
            Command::Digit(digit) => {
                self.press_digit(digit);
                Ok(())
            }
            Command::DecimalPoint => {
                self.press_decimal_point();
                Ok(())
            }
            Command::SignChange => {
                self.change_sign();
                Ok(())
            }
            Command::Operator(op) => self.press_operator(op),
            Command::Bracket(bracket) => {
                self.press_bracket(bracket);
                Ok(())
            }
            Command::Function(Function::Unary(function)) => self.press_function(function),
            Command::Function(Function::PowerStart) => self.start_power(),
            Command::Function(Function::Factorial) => self.press_factorial(),
            Command::Equals => self.press_equals(),
            Command::ClearEntry => {
                self.clear_entry();
                Ok(())
            }
            Command::ClearAll => {
                self.reset();
                Ok(())
            }
            Command::Paste(text) => {
                self.paste(&text);
                Ok(())
            }
        };

        if let Err(err) = outcome {
            self.enter_error(err);
        }
    }

    /// Apply commands in order.
    pub fn apply_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply(command);
        }
    }

    /// Reset every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn clear_entry(&mut self) {
        self.display = INITIAL_DISPLAY.to_string();
        self.new_input_expected = false;
    }

    fn enter_error(&mut self, err: CalcError) {
        warn!(error = %err, "command failed");
        self.display = ERROR_DISPLAY.to_string();
        self.trail = err.to_string();
        self.mode = Mode::Error;
    }

    fn press_digit(&mut self, digit: u8) {
        let Some(digit) = char::from_digit(u32::from(digit), 10) else {
            warn!(digit, "ignoring out-of-range digit");
            return;
        };

        if self.new_input_expected {
            self.start_new_trail_if_finished();
            self.display = digit.to_string();
            self.new_input_expected = false;
        } else if self.display == INITIAL_DISPLAY {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    fn press_decimal_point(&mut self) {
        if self.new_input_expected {
            self.display = "0.".to_string();
            self.new_input_expected = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn change_sign(&mut self) {
        if self.display == INITIAL_DISPLAY {
            return;
        }
        self.display = match self.display.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.display),
        };
    }

    fn paste(&mut self, text: &str) {
        if self.new_input_expected {
            self.start_new_trail_if_finished();
            self.new_input_expected = false;
        }
        self.display = text.trim().to_string();
    }

    fn press_operator(&mut self, op: BinaryOperator) -> Result<(), CalcError> {
        let current = self.current_operand()?;
        self.start_new_trail_if_finished();

        match self.pending_operator() {
            Some(pending) => self.evaluate_pending(pending, current)?,
            None => self.last_result = current,
        }

        self.mode = match self.mode {
            Mode::BracketOpen { .. } => Mode::BracketOpen { pending: Some(op) },
            _ => Mode::AwaitingBinaryOp(op),
        };
        self.trail
            .push_str(&format!("{} {} ", format_number(self.last_result), op));
        self.new_input_expected = true;
        Ok(())
    }

    fn press_bracket(&mut self, bracket: Bracket) {
        match bracket {
            Bracket::Open => {
                self.start_new_trail_if_finished();
                match self.mode {
                    Mode::AwaitingBinaryOp(op) => {
                        self.mode = Mode::BracketOpen { pending: Some(op) }
                    }
                    Mode::Idle => self.mode = Mode::BracketOpen { pending: None },
                    Mode::PowerPending { base, .. } => {
                        self.mode = Mode::PowerPending {
                            base,
                            bracket_open: true,
                        }
                    }
                    // Already open: the bracket only shows up in the trail.
                    Mode::BracketOpen { .. } | Mode::Error => {}
                }
                self.trail.push('(');
            }
            Bracket::Close => match self.mode {
                Mode::BracketOpen { pending } => {
                    self.close_bracket_in_trail();
                    self.mode = pending.map_or(Mode::Idle, Mode::AwaitingBinaryOp);
                }
                Mode::PowerPending {
                    base,
                    bracket_open: true,
                } => {
                    self.close_bracket_in_trail();
                    self.mode = Mode::PowerPending {
                        base,
                        bracket_open: false,
                    };
                }
                _ => {}
            },
        }
        self.new_input_expected = true;
    }

    fn press_function(&mut self, function: UnaryFunction) -> Result<(), CalcError> {
        let value = self.current_operand()?;
        let result = apply_unary(function, value)?;

        self.start_new_trail_if_finished();
        self.display = format_number(result);
        self.trail
            .push_str(&format!("{}({})", function.label(), format_number(value)));
        self.new_input_expected = true;
        Ok(())
    }

    fn start_power(&mut self) -> Result<(), CalcError> {
        let base = self.current_operand()?;

        self.start_new_trail_if_finished();
        self.mode = Mode::PowerPending {
            base,
            bracket_open: false,
        };
        self.trail.push_str(&format!("{}^", format_number(base)));
        self.new_input_expected = true;
        Ok(())
    }

    fn press_factorial(&mut self) -> Result<(), CalcError> {
        // Saturating truncation toward zero; NaN becomes 0.
        let n = self.current_operand()?.trunc() as i64;
        let result = factorial(n)?;

        self.start_new_trail_if_finished();
        self.display = format_number(result);
        self.trail.push_str(&format!("{}!", n));
        self.new_input_expected = true;
        Ok(())
    }

    fn press_equals(&mut self) -> Result<(), CalcError> {
        if let Mode::PowerPending { base, bracket_open } = self.mode {
            let exponent = self.current_operand()?;
            let result = base.powf(exponent);

            // The base and `^` were written when power mode started; a
            // closed bracket has already written the exponent.
            let bracketed =
                bracket_open || (self.new_input_expected && self.trail.ends_with(')'));
            if bracket_open {
                self.close_bracket_in_trail();
            }
            if bracketed {
                self.trail.push_str(" =");
            } else {
                self.trail
                    .push_str(&format!("{} =", format_number(exponent)));
            }
            self.display = format_number(result);
            self.last_result = result;
            self.mode = Mode::Idle;
            self.new_input_expected = true;
            return Ok(());
        }

        // The pending operator survives `=`, so repeating `=` or pressing
        // another operator applies it again to the result.
        if let Some(pending) = self.pending_operator() {
            let current = self.current_operand()?;
            if self.expression_finished() {
                self.trail = format!("{} {} ", format_number(self.last_result), pending);
            }
            let finished = format!("{}{} =", self.trail, self.display);
            self.evaluate_pending(pending, current)?;
            self.trail = finished;
            self.new_input_expected = true;
            return Ok(());
        }

        if let Mode::BracketOpen { .. } = self.mode {
            self.close_bracket_in_trail();
            self.mode = Mode::Idle;
            self.new_input_expected = true;
        }

        Ok(())
    }

    fn close_bracket_in_trail(&mut self) {
        self.trail.push_str(&self.display);
        self.trail.push(')');
    }

    fn pending_operator(&self) -> Option<BinaryOperator> {
        match self.mode {
            Mode::AwaitingBinaryOp(op) => Some(op),
            Mode::BracketOpen { pending } => pending,
            _ => None,
        }
    }

    fn evaluate_pending(&mut self, op: BinaryOperator, current: f64) -> Result<(), CalcError> {
        self.last_result = apply_binary(self.last_result, op, current)?;
        self.display = format_number(self.last_result);
        Ok(())
    }

    fn current_operand(&self) -> Result<f64, CalcError> {
        parse_operand(&self.display)
    }

    fn expression_finished(&self) -> bool {
        self.trail.ends_with('=')
    }

    fn start_new_trail_if_finished(&mut self) {
        if self.expression_finished() {
            self.trail.clear();
        }
    }
}
