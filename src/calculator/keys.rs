//! Key labels for the calculator keypad.
//!
//! Maps button captions (and a few typing-friendly aliases) to [`Key`]
//! values, and splits a compact key sequence such as `12+3=` into keys.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::evaluation::Operator;

lazy_static! {
    /// Matches a single key label. Longer labels come first so that `+/-`
    /// wins over `+` and `mc` wins over `c`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)\+/-|±|1/x|<--|←|backspace|back|sqrt|√|m\+|m-|m−|mc|mr|ms|ac|clear|c|[0-9]|[.+\-−*×/÷=%]"
    ).unwrap();
}

/// Errors raised when turning user text into keys.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("`{0}` is neither a digit nor a decimal point")]
    InvalidToken(char),
}

/// A single button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Digit 0-9. Prefer [`Key::digit`], which rejects anything larger;
    /// an out-of-range digit is ignored by the engine.
    Digit(u8),
    Point,
    Operator(Operator),
    Equals,
    /// `+/-`
    Negate,
    SquareRoot,
    Percent,
    /// `1/x`
    Reciprocal,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    MemoryStore,
    Backspace,
    ClearAll,
}

impl Key {
    /// Digit key for `d`, or `None` unless `d` is 0-9.
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self::Digit(d))
    }

    /// Caption printed on the keypad button.
    pub fn label(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Self::Digit(d) => DIGITS.get(*d as usize).copied().unwrap_or("?"),
            Self::Point => ".",
            Self::Operator(op) => op.symbol(),
            Self::Equals => "=",
            Self::Negate => "+/-",
            Self::SquareRoot => "√",
            Self::Percent => "%",
            Self::Reciprocal => "1/x",
            Self::MemoryAdd => "M+",
            Self::MemorySubtract => "M-",
            Self::MemoryRecall => "MR",
            Self::MemoryClear => "MC",
            Self::MemoryStore => "MS",
            Self::Backspace => "<--",
            Self::ClearAll => "C",
        }
    }

    /// The character a digit or point key types, if any.
    pub fn to_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(*d as u32, 10),
            Self::Point => Some('.'),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        let key = match label.as_str() {
            "." => Self::Point,
            "+" => Self::Operator(Operator::Add),
            "-" | "−" => Self::Operator(Operator::Subtract),
            "*" | "×" => Self::Operator(Operator::Multiply),
            "/" | "÷" => Self::Operator(Operator::Divide),
            "=" => Self::Equals,
            "+/-" | "±" => Self::Negate,
            "√" | "sqrt" => Self::SquareRoot,
            "%" => Self::Percent,
            "1/x" => Self::Reciprocal,
            "m+" => Self::MemoryAdd,
            "m-" | "m−" => Self::MemorySubtract,
            "mr" => Self::MemoryRecall,
            "mc" => Self::MemoryClear,
            "ms" => Self::MemoryStore,
            "<--" | "←" | "back" | "backspace" => Self::Backspace,
            "c" | "ac" | "clear" => Self::ClearAll,
            other => other
                .parse::<u8>()
                .ok()
                .filter(|_| other.len() == 1)
                .and_then(Self::digit)
                .ok_or_else(|| KeyError::UnknownKey(s.trim().to_string()))?,
        };
        Ok(key)
    }
}

/// Split a key sequence into keys.
///
/// Labels may be run together (`12+3=`) or separated by whitespace
/// (`MC 5 M+`). Anything that is not a known label is an error.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyError> {
    let mut keys = Vec::new();
    let mut last_end = 0;

    for token in KEY_TOKEN.find_iter(input) {
        check_gap(&input[last_end..token.start()])?;
        keys.push(token.as_str().parse()?);
        last_end = token.end();
    }
    check_gap(&input[last_end..])?;

    Ok(keys)
}

fn check_gap(gap: &str) -> Result<(), KeyError> {
    let gap = gap.trim();
    if gap.is_empty() {
        Ok(())
    } else {
        Err(KeyError::UnknownKey(gap.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_captions() {
        assert_eq!("7".parse(), Ok(Key::Digit(7)));
        assert_eq!(".".parse(), Ok(Key::Point));
        assert_eq!("+/-".parse(), Ok(Key::Negate));
        assert_eq!("1/x".parse(), Ok(Key::Reciprocal));
        assert_eq!("<--".parse(), Ok(Key::Backspace));
        assert_eq!("MS".parse(), Ok(Key::MemoryStore));
        assert_eq!("C".parse(), Ok(Key::ClearAll));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("×".parse(), Ok(Key::Operator(Operator::Multiply)));
        assert_eq!("÷".parse(), Ok(Key::Operator(Operator::Divide)));
        assert_eq!("−".parse(), Ok(Key::Operator(Operator::Subtract)));
        assert_eq!("sqrt".parse(), Ok(Key::SquareRoot));
        assert_eq!("m+".parse(), Ok(Key::MemoryAdd));
        assert_eq!("Clear".parse(), Ok(Key::ClearAll));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            "12".parse::<Key>(),
            Err(KeyError::UnknownKey("12".to_string()))
        );
        assert!("^".parse::<Key>().is_err());
    }

    #[test]
    fn test_label_roundtrip() {
        let keys = [
            Key::Digit(0),
            Key::Digit(9),
            Key::Point,
            Key::Operator(Operator::Add),
            Key::Operator(Operator::Subtract),
            Key::Operator(Operator::Multiply),
            Key::Operator(Operator::Divide),
            Key::Equals,
            Key::Negate,
            Key::SquareRoot,
            Key::Percent,
            Key::Reciprocal,
            Key::MemoryAdd,
            Key::MemorySubtract,
            Key::MemoryRecall,
            Key::MemoryClear,
            Key::MemoryStore,
            Key::Backspace,
            Key::ClearAll,
        ];
        for key in keys {
            assert_eq!(key.label().parse(), Ok(key), "label {}", key);
        }
    }

    #[test]
    fn test_parse_compact_sequence() {
        let keys = parse_keys("12+3=").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit(1),
                Key::Digit(2),
                Key::Operator(Operator::Add),
                Key::Digit(3),
                Key::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_spaced_sequence() {
        let keys = parse_keys("MC 5 M+ 3 M+ MR").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::MemoryClear,
                Key::Digit(5),
                Key::MemoryAdd,
                Key::Digit(3),
                Key::MemoryAdd,
                Key::MemoryRecall,
            ]
        );
    }

    #[test]
    fn test_longest_label_wins() {
        assert_eq!(
            parse_keys("5+/-").unwrap(),
            vec![Key::Digit(5), Key::Negate]
        );
        assert_eq!(
            parse_keys("41/x").unwrap(),
            vec![Key::Digit(4), Key::Reciprocal]
        );
        assert_eq!(
            parse_keys("mc c").unwrap(),
            vec![Key::MemoryClear, Key::ClearAll]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_keys("2 + foo"),
            Err(KeyError::UnknownKey("foo".to_string()))
        );
        assert!(parse_keys("2 ^ 3").is_err());
        assert_eq!(parse_keys("   "), Ok(Vec::new()));
    }

    #[test]
    fn test_checked_digit() {
        assert_eq!(Key::digit(0), Some(Key::Digit(0)));
        assert_eq!(Key::digit(9), Some(Key::Digit(9)));
        assert_eq!(Key::digit(10), None);
        assert_eq!(Key::digit(255), None);
    }

    #[test]
    fn test_out_of_range_digit() {
        assert_eq!(Key::Digit(12).label(), "?");
        assert_eq!(Key::Digit(12).to_char(), None);
    }

    #[test]
    fn test_to_char() {
        assert_eq!(Key::Digit(4).to_char(), Some('4'));
        assert_eq!(Key::Point.to_char(), Some('.'));
        assert_eq!(Key::Equals.to_char(), None);
    }
}
