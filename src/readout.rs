//! Snapshot of the calculator screen handed to a front end.

use serde::Serialize;

use crate::calculator::{Calculator, MathError, Operator};

/// Everything a shell needs to draw the calculator after a key press.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readout {
    /// Text for the main display, rendered verbatim.
    pub display: String,
    /// Whether the display shows the error token.
    pub is_error: bool,
    /// The latched error, kept until the next committing key.
    pub math_error: Option<MathError>,
    /// Whether the memory register holds a value (the "M" indicator).
    pub memory_in_use: bool,
    /// Operator waiting for its right-hand operand.
    pub pending_operator: Option<Operator>,
    /// The display as a plain number for copying.
    /// None while the error token is showing.
    pub copy_text: Option<String>,
}

impl Readout {
    /// Capture the current state of a calculator.
    pub fn from_calculator(calc: &Calculator) -> Self {
        let display = calc.display();
        let is_error = calc.is_error();
        Self {
            copy_text: (!is_error).then(|| display.clone()),
            display,
            is_error,
            math_error: calc.math_error(),
            memory_in_use: calc.memory() != 0.0,
            pending_operator: calc.pending_operator(),
        }
    }

    /// Text to copy to the clipboard.
    /// Falls back to the display so the error message can still be copied.
    pub fn text_for_clipboard(&self) -> &str {
        self.copy_text.as_deref().unwrap_or(&self.display)
    }
}

impl From<&Calculator> for Readout {
    fn from(calc: &Calculator) -> Self {
        Self::from_calculator(calc)
    }
}
