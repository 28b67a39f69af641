//! # Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` scores documents against each other using the winnowing
//! fingerprints produced by `perceptual`. It is the pure core of a plagiarism
//! check: no storage, no transport, no session handling. Persisting results
//! and choosing a session token belong to the caller.
//!
//! ## Core Types
//!
//! - [`Document`]: caller-supplied name + already-extracted text.
//! - [`PairResult`]: indices, names and similarity percentage of one pair.
//! - [`ComparisonBatch`]: all pair results of one call under a session token.
//! - [`MatchError`]: the only failure is an invalid `k` / `window_size`.
//!
//! ## Entry Points
//!
//! - [`jaccard_similarity`]: score two fingerprint sets.
//! - [`compare`]: score two texts.
//! - [`compare_batch`]: score every unordered pair of `n` documents. Each
//!   document is fingerprinted once and fingerprints are computed in
//!   parallel with Rayon.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{compare_batch, ComparisonBatch, Document};
//!
//! let docs = vec![
//!     Document::new("a.txt", "The quick brown fox jumps over the lazy dog"),
//!     Document::new("b.txt", "the quick brown fox jumps over the lazy dog!"),
//!     Document::new("c.txt", "Lorem ipsum dolor sit amet"),
//! ];
//!
//! let results = compare_batch(&docs, 5, 4).unwrap();
//! assert_eq!(results.len(), 3);
//! assert_eq!(results[0].similarity, 100.0);
//!
//! let batch = ComparisonBatch::new("session-1", results);
//! assert_eq!(batch.pair(1, 0).unwrap().similarity, 100.0);
//! ```
//!
//! ## Observability
//!
//! Install a [`BatchMetrics`] implementation via [`set_batch_metrics`] to
//! record per-batch latency and sizes.

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::{
    compare, compare_batch, compare_batch_with_config, compare_with_config, jaccard_similarity,
};
pub use crate::metrics::{set_batch_metrics, BatchMetrics};
pub use crate::types::{ComparisonBatch, Document, MatchError, PairResult};
pub use perceptual::{FingerprintSet, WinnowConfig};
