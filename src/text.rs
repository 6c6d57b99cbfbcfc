//! String helpers

/// Replace the last `max_occurrences` occurrences of `old` with `new`
///
/// Occurrences are found scanning from the right and do not overlap. If
/// `old` occurs fewer times than requested, every occurrence is replaced.
/// An empty `old` or `max_occurrences == 0` leaves the string unchanged.
///
/// ```
/// use devops_fun::text::replace_from_right;
///
/// assert_eq!(replace_from_right("a.b.c.b", "b", "X", 1), "a.b.c.X");
/// assert_eq!(replace_from_right("a.b.c.b", "b", "X", 2), "a.X.c.X");
/// ```
pub fn replace_from_right(text: &str, old: &str, new: &str, max_occurrences: usize) -> String {
    if old.is_empty() || max_occurrences == 0 {
        return text.to_string();
    }

    let mut pieces: Vec<&str> = text
        .rsplitn(max_occurrences.saturating_add(1), old)
        .collect();
    pieces.reverse();
    pieces.join(new)
}

/// Replace only the last occurrence of `old`
pub fn replace_last(text: &str, old: &str, new: &str) -> String {
    replace_from_right(text, old, new, 1)
}
