//! Text normalization utilities shared by every extractor
//!
//! All text values in the output record pass through the same
//! normalization, guaranteeing consistent comparison and search behavior
//! downstream.

/// Trims a string and collapses internal whitespace runs to single spaces
///
/// # Examples
///
/// ```
/// use loupe::text::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  hello\n\t world  "), "hello world");
/// ```
pub fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = true; // leading whitespace is dropped

    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }

    out
}

/// Truncates a string to at most `max` characters, char-boundary safe
pub fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}
