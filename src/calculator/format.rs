//! Display text: rendering results and editing typed entries.
//!
//! Results are rendered with a fixed number of fraction digits and no
//! thousand separators. Entry helpers work on the raw text the user is typing
//! and never index past the end of a short string.

/// Fraction digits shown when no configuration overrides it.
pub const DEFAULT_FRACTION_DIGITS: u8 = 8;

/// Render a value for the display.
///
/// Rounds to `fraction_digits`, then trims trailing zeros and a dangling
/// point. Negative zero (including values that round to zero) shows as `0`.
pub fn render(value: f64, fraction_digits: u8) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() { "∞" } else { "-∞" };
        return msg.to_string();
    }

    let formatted = format!("{:.*}", fraction_digits as usize, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Append a digit or point to an entry.
///
/// A second point is ignored. The result is normalized so that `05` becomes
/// `5` and `-05` becomes `-5`, while `0.` and `-0.` stay as typed.
pub fn push_token(entry: &str, token: char) -> String {
    let mut text = entry.to_string();
    if token != '.' || !text.contains('.') {
        text.push(token);
    }
    strip_leading_zero(&text)
}

fn strip_leading_zero(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('0'), Some(second), _) if second != '.' => text[1..].to_string(),
        (Some('-'), Some('0'), Some(third)) if third != '.' => format!("-{}", &text[2..]),
        _ => text.to_string(),
    }
}

/// Toggle the leading minus sign of an entry.
pub fn toggle_sign(entry: &str) -> String {
    match entry.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{}", entry),
    }
}

/// Remove the last typed character.
///
/// Bottoms out at `0`. When the character before the last one is a point,
/// both are removed so the entry never ends on a dangling point.
pub fn backspace(entry: &str) -> String {
    let chars: Vec<char> = entry.chars().collect();
    let len = chars.len();

    if len <= 1 || entry == "-0." || (len == 2 && entry.contains('-')) {
        return "0".to_string();
    }

    let keep = if chars[len - 2] == '.' { len - 2 } else { len - 1 };
    let text: String = chars[..keep].iter().collect();
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text
    }
}

/// Parse typed or rendered text back into a number.
///
/// Returns `None` for text that is not a plain numeral.
pub fn parse_entry(entry: &str) -> Option<f64> {
    entry.parse::<f64>().ok().filter(|value| value.is_finite())
}
