use super::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use perceptual::fingerprint;

use crate::metrics::{set_batch_metrics, BatchMetrics};

const FOX: &str = "The quick brown fox jumps over the lazy dog";
const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit";

fn docs(texts: &[&str]) -> Vec<Document> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Document::new(format!("doc-{i}"), *t))
        .collect()
}

// ==================== Comparator ====================

#[test]
fn jaccard_of_identical_sets_is_100() {
    let set = fingerprint(FOX, 5, 4).unwrap();
    assert_eq!(jaccard_similarity(&set, &set), 100.0);
}

#[test]
fn jaccard_with_empty_set_is_zero() {
    let set = fingerprint(FOX, 5, 4).unwrap();
    let empty = FingerprintSet::new();
    assert_eq!(jaccard_similarity(&set, &empty), 0.0);
    assert_eq!(jaccard_similarity(&empty, &set), 0.0);
    assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
}

#[test]
fn compare_is_symmetric() {
    let a = "the quick brown fox";
    let b = "the quick brown fox jumps";
    for (k, w) in [(1, 1), (3, 2), (5, 4), (8, 3)] {
        assert_eq!(compare(a, b, k, w).unwrap(), compare(b, a, k, w).unwrap());
    }
}

#[test]
fn self_similarity_is_maximal_when_windows_fill() {
    assert_eq!(compare(FOX, FOX, 5, 4).unwrap(), 100.0);
    // "abcdefgh" is exactly k + w - 1 letters: one full window.
    assert_eq!(compare("abcdefgh", "abcdefgh", 5, 4).unwrap(), 100.0);
}

#[test]
fn self_similarity_of_short_text_is_zero() {
    // Four letters with k = 5: no shingles, empty set, floor value.
    assert_eq!(compare("abcd", "abcd", 5, 4).unwrap(), 0.0);
    // Six letters: two shingles never fill a window of four.
    assert_eq!(compare("abcdef", "abcdef", 5, 4).unwrap(), 0.0);
}

#[test]
fn shared_prefix_scores_strictly_between_bounds() {
    let first = compare("the quick brown fox", "the quick brown fox jumps", 5, 4).unwrap();
    let second = compare("the quick brown fox", "the quick brown fox jumps", 5, 4).unwrap();
    assert!(first > 0.0 && first < 100.0, "got {first}");
    assert_eq!(first, second);
}

#[test]
fn both_documents_shorter_than_k_score_zero() {
    assert_eq!(compare("abc", "xyz", 5, 4).unwrap(), 0.0);
}

#[test]
fn case_and_punctuation_changes_do_not_affect_score() {
    assert_eq!(compare("Hello, World!", "hello world", 3, 2).unwrap(), 100.0);
}

#[test]
fn compare_rejects_invalid_parameters() {
    assert!(matches!(compare(FOX, FOX, 0, 4), Err(MatchError::Perceptual(_))));
    assert!(matches!(compare(FOX, FOX, 5, 0), Err(MatchError::Perceptual(_))));
}

// ==================== Batch orchestrator ====================

#[test]
fn batch_covers_every_unordered_pair_once() {
    let texts = [FOX, LOREM, "alpha beta gamma delta", "pack my box with five dozen", ""];
    let documents = docs(&texts);
    let results = compare_batch(&documents, 5, 4).unwrap();

    let n = documents.len();
    assert_eq!(results.len(), n * (n - 1) / 2);

    let mut expected = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            expected.push((i, j));
        }
    }
    let got: Vec<(usize, usize)> = results
        .iter()
        .map(|r| (r.doc1_index, r.doc2_index))
        .collect();
    assert_eq!(got, expected);

    for r in &results {
        assert!(r.doc1_index < r.doc2_index);
        assert_eq!(r.doc1_name, documents[r.doc1_index].name);
        assert_eq!(r.doc2_name, documents[r.doc2_index].name);
        assert!((0.0..=100.0).contains(&r.similarity));
    }
}

#[test]
fn batch_of_zero_or_one_document_is_empty() {
    assert!(compare_batch(&[], 5, 4).unwrap().is_empty());
    assert!(compare_batch(&docs(&[FOX]), 5, 4).unwrap().is_empty());
}

#[test]
fn batch_identical_pair_and_unrelated_third() {
    let documents = docs(&[FOX, FOX, LOREM]);
    let results = compare_batch(&documents, 5, 4).unwrap();
    assert_eq!(results.len(), 3);

    let ab = &results[0];
    let ac = &results[1];
    let bc = &results[2];
    assert_eq!((ab.doc1_index, ab.doc2_index), (0, 1));
    assert_eq!((ac.doc1_index, ac.doc2_index), (0, 2));
    assert_eq!((bc.doc1_index, bc.doc2_index), (1, 2));

    assert_eq!(ab.similarity, 100.0);
    assert_eq!(ac.similarity, bc.similarity);
    assert!(ac.similarity < 20.0, "got {}", ac.similarity);
}

#[test]
fn batch_matches_pairwise_compare() {
    let texts = [FOX, "the quick brown fox", LOREM, "quick brown foxes jump"];
    let documents = docs(&texts);
    let results = compare_batch(&documents, 4, 3).unwrap();
    for r in &results {
        let expected = compare(texts[r.doc1_index], texts[r.doc2_index], 4, 3).unwrap();
        assert_eq!(r.similarity, expected);
    }
}

#[test]
fn batch_short_documents_score_zero() {
    let results = compare_batch(&docs(&["abc", "xyz"]), 5, 4).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].similarity, 0.0);
}

#[test]
fn batch_rejects_invalid_parameters_before_work() {
    let documents = docs(&[FOX, LOREM]);
    assert!(matches!(
        compare_batch(&documents, 0, 4),
        Err(MatchError::Perceptual(perceptual::PerceptualError::InvalidParameter {
            param: "k",
            ..
        }))
    ));
    // Invalid parameters fail even when there is nothing to compare.
    assert!(compare_batch(&[], 5, 0).is_err());
}

#[test]
fn batch_is_deterministic() {
    let documents = docs(&[FOX, LOREM, "the lazy dog sleeps", "over the lazy dog"]);
    let first = compare_batch(&documents, 5, 4).unwrap();
    let second = compare_batch(&documents, 5, 4).unwrap();
    assert_eq!(first, second);
}

// ==================== Metrics ====================

#[derive(Default)]
struct RecordingMetrics {
    batches: Mutex<Vec<(usize, usize)>>,
}

impl BatchMetrics for RecordingMetrics {
    fn record_batch(&self, documents: usize, pairs: usize, _latency: Duration) {
        self.batches.lock().unwrap().push((documents, pairs));
    }
}

#[test]
fn metrics_recorder_sees_batches() {
    let recorder = Arc::new(RecordingMetrics::default());
    set_batch_metrics(Some(recorder.clone()));

    let documents = docs(&[FOX, LOREM, "a b c d e f g h", "metrics batch of seven"]);
    compare_batch(&documents, 3, 2).unwrap();

    set_batch_metrics(None);

    let batches = recorder.batches.lock().unwrap();
    assert!(batches.contains(&(4, 6)));
}
