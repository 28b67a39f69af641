//! Canonical text layer for winnowing fingerprints.
//!
//! This crate turns raw document text into the dense, letters-only string the
//! perceptual layer shingles. Plagiarism scoring has to be robust to
//! punctuation, casing and spacing changes, so all three are removed here and
//! nothing downstream has to care about them.
//!
//! ## What we do
//!
//! - Unicode lowercasing
//! - Drop everything that is not an ASCII letter or whitespace
//! - Collapse and trim whitespace ([`normalize`])
//! - Remove the remaining spaces ([`dense`])
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence, no error cases. Empty input
//! yields empty output.

mod normalize;
mod whitespace;

pub use crate::normalize::{dense, normalize};
pub use crate::whitespace::{collapse_whitespace, strip_whitespace};
