//! Redaction of sensitive values before they reach trace output

use std::fmt::Display;

/// Replacement written over every redacted term
pub const MASK: &str = "*******";

/// Replace every literal occurrence of each term with [`MASK`]
///
/// Terms are applied one after another in the given order, so a later term
/// only sees what earlier replacements left behind. Matching is exact and
/// case-sensitive. A term is skipped only when its string form is empty, so
/// values like `0` or `false` are still redacted. An empty `original` is
/// returned unchanged.
pub fn sanitize<T: Display>(original: &str, terms: &[T]) -> String {
    let mut sanitized = original.to_string();
    if sanitized.is_empty() {
        return sanitized;
    }

    for term in terms {
        let term = term.to_string();
        if term.is_empty() {
            continue;
        }
        sanitized = sanitized.replace(&term, MASK);
    }
    sanitized
}

/// [`sanitize`] for a value that may be absent; `None` stays `None`
pub fn sanitize_opt<T: Display>(original: Option<&str>, terms: &[T]) -> Option<String> {
    original.map(|text| sanitize(text, terms))
}
