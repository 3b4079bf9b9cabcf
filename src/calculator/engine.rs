//! The calculator state machine.
//!
//! One accumulator, one pending operator, one memory register and a handful
//! of mode flags. Every key press is a state transition; the caller renders
//! whatever [`Calculator::display`] returns afterwards.

use serde::Deserialize;

use super::evaluation::{self, MathError, Operator};
use super::format::{self, DEFAULT_FRACTION_DIGITS};
use super::keys::{Key, KeyError};

/// How results and errors are shown.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum digits after the decimal point in a rendered result.
    pub fraction_digits: u8,
    /// Text shown while a math error is on screen.
    pub error_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            error_text: "Math Error".to_string(),
        }
    }
}

/// What the display currently holds.
#[derive(Clone, Debug, PartialEq)]
enum Screen {
    /// Text the user is typing.
    Entry(String),
    /// A computed value, rendered on demand.
    Result(f64),
    /// The error token.
    Error,
}

/// Mode flags that decide how the next key is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// A result is on screen; the next digit starts a fresh number.
    pub showing_result: bool,
    /// An operator was just applied; the next digit starts a fresh number.
    pub operation_performed: bool,
    /// The last key touched memory; the next digit starts a fresh number
    /// and backspace is frozen.
    pub memory_touched: bool,
    /// Equals was just pressed; the next digit starts a fresh number and
    /// backspace is frozen.
    pub equals_pressed: bool,
    /// The operand on screen has already been folded into the accumulator.
    pub operator_applied: bool,
}

/// Four-function calculator engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    settings: DisplaySettings,
    screen: Screen,
    accumulator: f64,
    pending: Option<Operator>,
    memory: f64,
    latched: Option<MathError>,
    /// Accumulator value at the moment the error latched.
    error_operand: f64,
    flags: Flags,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_settings(DisplaySettings::default())
    }

    pub fn with_settings(settings: DisplaySettings) -> Self {
        Self {
            settings,
            screen: Screen::Entry("0".to_string()),
            accumulator: 0.0,
            pending: None,
            memory: 0.0,
            latched: None,
            error_operand: 0.0,
            flags: Flags::default(),
        }
    }

    /// Text to show on the calculator screen.
    pub fn display(&self) -> String {
        match &self.screen {
            Screen::Entry(text) => text.clone(),
            Screen::Result(value) => format::render(*value, self.settings.fraction_digits),
            Screen::Error => self.settings.error_text.clone(),
        }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// The latched math error, if one has not been cleared yet.
    pub fn math_error(&self) -> Option<MathError> {
        self.latched
    }

    /// Whether the error token is on screen.
    pub fn is_error(&self) -> bool {
        self.screen == Screen::Error
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Apply a key press and return the new display text.
    pub fn press(&mut self, key: Key) -> String {
        let shown = match key {
            Key::Digit(_) | Key::Point => match key.to_char() {
                Some(token) => self.enter_token(token),
                None => {
                    tracing::warn!(key = ?key, "digit out of range, ignored");
                    self.display()
                }
            },
            Key::Operator(op) => self.apply_operator(op),
            Key::Equals => self.equals(),
            Key::Negate => self.negate(),
            Key::SquareRoot => self.square_root(),
            Key::Percent => self.percent(),
            Key::Reciprocal => self.reciprocal(),
            Key::MemoryAdd => self.memory_add(),
            Key::MemorySubtract => self.memory_subtract(),
            Key::MemoryRecall => self.memory_recall(),
            Key::MemoryClear => self.memory_clear(),
            Key::MemoryStore => self.memory_store(),
            Key::Backspace => self.backspace(),
            Key::ClearAll => self.clear_all(),
        };
        tracing::debug!(key = %key, display = %shown, "key pressed");
        shown
    }

    /// Successor state after `key`, leaving `self` untouched.
    pub fn next(&self, key: Key) -> Self {
        let mut next = self.clone();
        next.press(key);
        next
    }

    /// Type a digit or the decimal point.
    pub fn digit_or_dot(&mut self, token: char) -> Result<String, KeyError> {
        if !token.is_ascii_digit() && token != '.' {
            return Err(KeyError::InvalidToken(token));
        }
        Ok(self.enter_token(token))
    }

    fn enter_token(&mut self, token: char) -> String {
        let mut reset = !matches!(self.screen, Screen::Entry(_));
        let flags = &mut self.flags;
        for flag in [
            &mut flags.showing_result,
            &mut flags.operation_performed,
            &mut flags.memory_touched,
            &mut flags.equals_pressed,
        ] {
            if *flag {
                *flag = false;
                reset = true;
            }
        }

        let current = match &self.screen {
            Screen::Entry(text) if !reset => text.as_str(),
            _ => "0",
        };
        let text = format::push_token(current, token);
        self.screen = Screen::Entry(text);
        self.flags.operator_applied = false;
        self.display()
    }

    /// Commit the operand on screen, then queue `op` for the next one.
    pub fn apply_operator(&mut self, op: Operator) -> String {
        self.commit();
        self.pending = Some(op);
        self.flags.operation_performed = true;
        self.display()
    }

    /// Commit the operand on screen and clear the pending operator.
    ///
    /// Pressing equals again without new input changes nothing; the last
    /// operation is not repeated.
    pub fn equals(&mut self) -> String {
        if self.is_error() {
            self.latched = None;
            self.accumulator = 0.0;
            self.show_result(0.0);
        } else {
            self.commit();
            self.pending = None;
        }
        self.flags.operation_performed = false;
        self.flags.equals_pressed = true;
        self.display()
    }

    /// Toggle the sign of the number on screen.
    pub fn negate(&mut self) -> String {
        if self.latched.is_some() || self.is_error() || self.display() == "0" {
            return self.display();
        }
        self.screen = match &self.screen {
            Screen::Entry(text) => Screen::Entry(format::toggle_sign(text)),
            Screen::Result(value) => Screen::Result(-value),
            Screen::Error => Screen::Error,
        };
        self.flags.operator_applied = false;
        self.display()
    }

    pub fn square_root(&mut self) -> String {
        if self.latched.take().is_some() {
            self.accumulator = self.error_operand;
        } else {
            self.equals();
        }

        match evaluation::square_root(self.accumulator) {
            Ok(value) => {
                self.accumulator = value;
                self.show_result(value);
                self.flags.operator_applied = false;
            }
            Err(err) => self.latch(err),
        }
        self.display()
    }

    /// Divide the result by 100.
    pub fn percent(&mut self) -> String {
        self.resume_or_equals();
        self.accumulator /= 100.0;
        self.show_result(self.accumulator);
        self.flags.operator_applied = false;
        self.display()
    }

    /// Replace the result with `1/x`. A zero result shows infinity.
    pub fn reciprocal(&mut self) -> String {
        self.resume_or_equals();
        self.accumulator = evaluation::reciprocal(self.accumulator);
        self.show_result(self.accumulator);
        self.flags.operator_applied = false;
        self.display()
    }

    pub fn memory_add(&mut self) -> String {
        self.update_memory(1.0)
    }

    pub fn memory_subtract(&mut self) -> String {
        self.update_memory(-1.0)
    }

    fn update_memory(&mut self, sign: f64) -> String {
        match self.operand() {
            Some(value) => self.memory += sign * value,
            None => tracing::debug!("no operand on screen, memory unchanged"),
        }
        self.flags.memory_touched = true;
        self.flags.operator_applied = false;
        self.display()
    }

    pub fn memory_recall(&mut self) -> String {
        self.show_result(self.memory);
        self.flags.memory_touched = true;
        self.display()
    }

    pub fn memory_clear(&mut self) -> String {
        self.memory = 0.0;
        self.display()
    }

    /// Press equals, then store the result in memory.
    pub fn memory_store(&mut self) -> String {
        self.equals();
        self.memory = self.accumulator;
        self.flags.memory_touched = true;
        self.display()
    }

    /// Delete the last typed character.
    ///
    /// Frozen right after a memory key or equals, and while the error token
    /// is on screen.
    pub fn backspace(&mut self) -> String {
        if self.flags.memory_touched || self.flags.equals_pressed {
            return self.display();
        }
        let text = match &self.screen {
            Screen::Error => return self.display(),
            Screen::Entry(text) => format::backspace(text),
            Screen::Result(value) if value.is_finite() => {
                format::backspace(&format::render(*value, self.settings.fraction_digits))
            }
            Screen::Result(_) => "0".to_string(),
        };
        self.screen = Screen::Entry(text);
        self.display()
    }

    /// Reset everything, memory included. Display settings are kept.
    pub fn clear_all(&mut self) -> String {
        let settings = std::mem::take(&mut self.settings);
        *self = Self::with_settings(settings);
        self.display()
    }

    /// Fold the operand on screen into the accumulator.
    fn commit(&mut self) {
        let was_latched = self.latched.take().is_some();
        if was_latched {
            self.accumulator = self.error_operand;
        }

        if !self.flags.operator_applied {
            match self.pending {
                None => {
                    if let Some(value) = self.operand() {
                        self.accumulator = value;
                    }
                    self.show_result(self.accumulator);
                }
                Some(op) => {
                    let operand = if was_latched && self.is_error() {
                        Some(1.0)
                    } else {
                        self.operand()
                    };
                    match operand {
                        Some(value) => match evaluation::combine(self.accumulator, op, value) {
                            Ok(result) => {
                                tracing::trace!(
                                    operator = op.symbol(),
                                    lhs = self.accumulator,
                                    rhs = value,
                                    result,
                                    "commit"
                                );
                                self.accumulator = result;
                                self.show_result(result);
                            }
                            Err(err) => self.latch(err),
                        },
                        None => self.show_result(self.accumulator),
                    }
                }
            }
            self.flags.operator_applied = true;
        }
        self.flags.operation_performed = true;
    }

    /// Restore the pre-error value when the error token is showing, press
    /// equals otherwise.
    fn resume_or_equals(&mut self) {
        if self.is_error() {
            self.latched = None;
            self.accumulator = self.error_operand;
        } else {
            self.equals();
        }
    }

    /// Numeric value of the screen, if it holds one.
    fn operand(&self) -> Option<f64> {
        match &self.screen {
            Screen::Entry(text) => {
                let value = format::parse_entry(text);
                if value.is_none() {
                    tracing::warn!(entry = %text, "entry is not a number");
                }
                value
            }
            Screen::Result(value) => Some(*value),
            Screen::Error => None,
        }
    }

    fn show_result(&mut self, value: f64) {
        self.screen = Screen::Result(value);
        self.flags.showing_result = true;
    }

    fn latch(&mut self, err: MathError) {
        tracing::warn!(error = %err, accumulator = self.accumulator, "math error");
        self.error_operand = self.accumulator;
        self.latched = Some(err);
        self.pending = None;
        self.screen = Screen::Error;
        self.flags.showing_result = true;
    }
}
