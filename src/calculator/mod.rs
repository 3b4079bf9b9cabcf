//! Calculator engine for the four-function keypad.
//!
//! This module provides:
//! - The key-driven state machine behind the calculator display
//! - Operator arithmetic and the latched math errors
//! - Rendering of results and editing of typed entries
//! - Parsing of keypad labels and key sequences

mod engine;
mod evaluation;
mod format;
mod keys;

pub use engine::{Calculator, DisplaySettings, Flags};
pub use evaluation::{MathError, Operator};
pub use format::{DEFAULT_FRACTION_DIGITS, render};
pub use keys::{Key, KeyError, parse_keys};
