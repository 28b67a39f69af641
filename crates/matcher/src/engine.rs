//! Comparator and batch orchestrator.

use std::time::Instant;

use perceptual::{fingerprint_document, FingerprintSet, WinnowConfig};
use rayon::prelude::*;

use crate::metrics::metrics_recorder;
use crate::types::{Document, MatchError, PairResult};

/// Jaccard similarity of two fingerprint sets as a percentage,
/// `100 * |a ∩ b| / |a ∪ b|`.
///
/// Returns `0.0` whenever either set is empty: an empty set means the
/// document gave no comparable basis, and the guard also keeps the
/// both-empty case away from `0 / 0`.
pub fn jaccard_similarity(a: &FingerprintSet, b: &FingerprintSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let common = a.intersection_len(b);
    let union = a.len() + b.len() - common;
    100.0 * common as f64 / union as f64
}

/// Similarity of two texts.
pub fn compare(
    text_a: &str,
    text_b: &str,
    k: usize,
    window_size: usize,
) -> Result<f64, MatchError> {
    let cfg = WinnowConfig::new().with_k(k).with_w(window_size);
    compare_with_config(text_a, text_b, &cfg)
}

pub fn compare_with_config(
    text_a: &str,
    text_b: &str,
    cfg: &WinnowConfig,
) -> Result<f64, MatchError> {
    let a = fingerprint_document(text_a, cfg)?.fingerprints;
    let b = fingerprint_document(text_b, cfg)?.fingerprints;
    Ok(jaccard_similarity(&a, &b))
}

/// Compare every unordered pair of `documents`.
///
/// Returns one [`PairResult`] per `(i, j)` with `i < j`, in ascending
/// `(i, j)` order: `C(n, 2)` results for `n` documents.
pub fn compare_batch(
    documents: &[Document],
    k: usize,
    window_size: usize,
) -> Result<Vec<PairResult>, MatchError> {
    let cfg = WinnowConfig::new().with_k(k).with_w(window_size);
    compare_batch_with_config(documents, &cfg)
}

/// Batch comparison with an explicit configuration.
///
/// Parameters are validated before any work starts. Each document is
/// fingerprinted exactly once, in parallel; pairs are then scored in
/// parallel and collected by index, so output order never depends on
/// scheduling.
pub fn compare_batch_with_config(
    documents: &[Document],
    cfg: &WinnowConfig,
) -> Result<Vec<PairResult>, MatchError> {
    cfg.validate()?;
    let start = Instant::now();

    let sets: Vec<FingerprintSet> = documents
        .par_iter()
        .map(|doc| fingerprint_document(&doc.text, cfg).map(|fp| fp.fingerprints))
        .collect::<Result<_, _>>()?;

    let n = documents.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let results: Vec<PairResult> = pairs
        .par_iter()
        .map(|&(i, j)| PairResult {
            doc1_index: i,
            doc2_index: j,
            doc1_name: documents[i].name.clone(),
            doc2_name: documents[j].name.clone(),
            similarity: jaccard_similarity(&sets[i], &sets[j]),
        })
        .collect();

    let latency = start.elapsed();
    tracing::debug!(
        documents = n,
        pairs = results.len(),
        k = cfg.k,
        w = cfg.w,
        latency_ms = latency.as_millis() as u64,
        "batch comparison finished"
    );
    if let Some(recorder) = metrics_recorder() {
        recorder.record_batch(n, results.len(), latency);
    }

    Ok(results)
}

#[cfg(test)]
mod tests;
