//! Letters-only normalization.
//!
//! Casing, punctuation, digits and spacing are all neutralized so that two
//! texts with the same underlying wording normalize to the same string.

use crate::whitespace::{collapse_whitespace, strip_whitespace};

/// Normalize raw text into its spaced canonical form.
///
/// Steps, in order:
/// 1. lowercase every character (full Unicode lowercasing)
/// 2. drop every character that is neither `a..=z` nor whitespace
/// 3. collapse whitespace runs to single spaces and trim the edges
///
/// ```rust
/// use canonical::normalize;
///
/// assert_eq!(normalize("Hello, World! 42 times"), "hello world times");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut letters = String::with_capacity(lowered.len());
    letters.extend(
        lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace()),
    );
    collapse_whitespace(&letters)
}

/// Normalize raw text and remove the remaining spaces, producing the dense
/// letters-only string that shingles are drawn from.
///
/// The output only ever contains ASCII `a..=z`.
///
/// ```rust
/// use canonical::dense;
///
/// assert_eq!(dense("Hello, World!"), "helloworld");
/// assert_eq!(dense(""), "");
/// ```
pub fn dense(text: &str) -> String {
    strip_whitespace(&normalize(text))
}
