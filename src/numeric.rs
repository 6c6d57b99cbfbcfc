//! Numeric string predicates
//!
//! Parse failures are ordinary `false` results. Surrounding whitespace is
//! ignored, the `inf`/`infinity`/`nan` spellings count as floats, and single
//! underscores between digits are accepted as separators (`1_000`).

use std::borrow::Cow;

/// Check if a string represents a floating-point value
pub fn is_float(text: &str) -> bool {
    parse_float(text).is_some()
}

/// Check if a string represents a whole number
///
/// `"3"` and `"3.0"` are integers, `"3.5"` is not. Infinities and NaN
/// are not integers.
pub fn is_integer(text: &str) -> bool {
    match parse_float(text) {
        Some(value) => value.is_finite() && value.fract() == 0.0,
        None => false,
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let digits = strip_separators(text.trim())?;
    digits.parse::<f64>().ok()
}

/// Remove `_` digit separators; `None` if one is not between two digits
fn strip_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }

    let bytes = text.as_bytes();
    let mut stripped = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c != '_' {
            stripped.push(c);
            continue;
        }
        let after_digit = i > 0 && bytes[i - 1].is_ascii_digit();
        let before_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        if !(after_digit && before_digit) {
            return None;
        }
    }
    Some(Cow::Owned(stripped))
}
