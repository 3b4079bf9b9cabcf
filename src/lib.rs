//! State engine for a four-function desktop calculator.
//!
//! The [`calculator::Calculator`] interprets keypad presses against a single
//! running value and exposes the text to show on screen. A front end only
//! forwards key events and renders [`readout::Readout`] snapshots.
//!
//! ```
//! use deskcalc::calculator::{Calculator, parse_keys};
//!
//! let mut calc = Calculator::new();
//! for key in parse_keys("1 + 2 + 3 =").unwrap() {
//!     calc.press(key);
//! }
//! assert_eq!(calc.display(), "6");
//! ```

pub mod calculator;
pub mod config;
pub mod logging;
pub mod readout;
