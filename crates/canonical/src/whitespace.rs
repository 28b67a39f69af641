//! Whitespace utilities shared by the normalizer.
//!
//! Whitespace follows Unicode's definition (`char::is_whitespace`), so tabs,
//! newlines, carriage returns and non-breaking spaces are all treated alike.
//!
//! ```rust
//! use canonical::{collapse_whitespace, strip_whitespace};
//!
//! assert_eq!(collapse_whitespace("  hello \t\n world  "), "hello world");
//! assert_eq!(strip_whitespace("hello world"), "helloworld");
//! ```

/// Collapses repeated whitespace into single ASCII spaces and trims both
/// edges.
///
/// Returns an empty string for empty or whitespace-only input.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Removes every whitespace character, keeping the remaining characters in
/// order.
pub fn strip_whitespace(text: &str) -> String {
    let mut dense = String::with_capacity(text.len());
    dense.extend(text.chars().filter(|c| !c.is_whitespace()));
    dense
}
