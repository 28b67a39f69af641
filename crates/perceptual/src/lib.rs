//! # Winnowing fingerprints
//!
//! This crate reduces a document to a compact, order-sensitive set of hash
//! fingerprints suitable for near-duplicate and plagiarism detection.
//!
//! ## Contract
//!
//! - Input is raw document text; normalization is delegated to the
//!   `canonical` crate so every caller fingerprints the same dense string.
//! - The API is a pure function of `(text, k, w)` with no I/O and no
//!   reliance on clocks or global state.
//! - Text whose dense form is shorter than `k` characters produces an empty
//!   fingerprint set. That is a normal outcome, not an error.
//!
//! ## Core Pipeline
//!
//! 1.  **Normalization**: lowercase, keep only ASCII letters, drop all
//!     whitespace.
//! 2.  **Shingling**: every contiguous run of `k` characters, in order.
//! 3.  **Hashing**: SHA-256 of each shingle's UTF-8 bytes.
//! 4.  **Winnowing**: the minimum hash of every window of `w` consecutive
//!     shingle hashes is added to the fingerprint set. Any shared substring
//!     of at least `k + w - 1` letters is guaranteed to share a fingerprint.
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::fingerprint;
//!
//! let a = fingerprint("Hello, World!", 5, 4).unwrap();
//! let b = fingerprint("hello world", 5, 4).unwrap();
//! assert_eq!(a, b);
//! assert!(!a.is_empty());
//!
//! // Too short for k=5: empty, not an error.
//! assert!(fingerprint("abc", 5, 4).unwrap().is_empty());
//! ```

pub mod config;
pub mod fingerprint;
mod hash;
mod shingles;

pub use crate::config::{PerceptualError, WinnowConfig};
pub use crate::fingerprint::{
    FingerprintSet, PerceptualFingerprint, PerceptualMeta, ShingleHash, WinnowedShingle,
};
pub use crate::hash::{hash_shingle, hash_shingles};
pub use crate::shingles::{make_shingles, winnow, winnow_minq};

/// Current perceptual algorithm version for this crate.
pub const PERCEPTUAL_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const PERCEPTUAL_ALGORITHM: &str = "letters_kgram_sha256_winnow_v1";

/// Fingerprint set of `text` for shingle width `k` and window `window_size`.
///
/// Fails only when `k < 1` or `window_size < 1`.
pub fn fingerprint(
    text: &str,
    k: usize,
    window_size: usize,
) -> Result<FingerprintSet, PerceptualError> {
    let cfg = WinnowConfig::new().with_k(k).with_w(window_size);
    Ok(fingerprint_document(text, &cfg)?.fingerprints)
}

/// Compute the full fingerprint artifact (set plus diagnostics).
pub fn fingerprint_document(
    text: &str,
    cfg: &WinnowConfig,
) -> Result<PerceptualFingerprint, PerceptualError> {
    cfg.validate()?;

    let dense = canonical::dense(text);
    let normalized_len = dense.chars().count();

    let shingles = make_shingles(&dense, cfg.k);
    let hashes = hash_shingles(&shingles);
    let winnowed = winnow_minq(&hashes, cfg.w);
    let fingerprints: FingerprintSet = winnowed.iter().map(|s| s.hash).collect();

    if fingerprints.is_empty() {
        tracing::debug!(
            normalized_len,
            shingles = hashes.len(),
            k = cfg.k,
            w = cfg.w,
            "text too short to produce fingerprints"
        );
    }

    Ok(PerceptualFingerprint {
        shingle_count: hashes.len(),
        winnowed,
        fingerprints,
        meta: PerceptualMeta {
            perceptual_version: PERCEPTUAL_VERSION,
            algorithm_name: PERCEPTUAL_ALGORITHM.to_string(),
            k: cfg.k,
            w: cfg.w,
            normalized_len,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let text = "It was the best of times, it was the worst of times.";
        assert_eq!(
            fingerprint(text, 5, 4).unwrap(),
            fingerprint(text, 5, 4).unwrap()
        );
    }

    #[test]
    fn short_text_yields_empty_set_for_any_window() {
        for w in 1..6 {
            assert!(fingerprint("ab, c!", 4, w).unwrap().is_empty());
        }
    }

    #[test]
    fn shingles_fewer_than_window_yields_empty_set() {
        // "abcdef" with k=5 has 2 shingles; a window of 4 never fills.
        assert!(fingerprint("abcdef", 5, 4).unwrap().is_empty());
        assert_eq!(fingerprint("abcdef", 5, 2).unwrap().len(), 1);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            fingerprint("some text", 0, 4),
            Err(PerceptualError::InvalidParameter { param: "k", .. })
        ));
        assert!(matches!(
            fingerprint("some text", 5, 0),
            Err(PerceptualError::InvalidParameter {
                param: "window_size",
                ..
            })
        ));
    }

    #[test]
    fn invalid_parameters_rejected_even_for_empty_text() {
        assert!(fingerprint("", 0, 0).is_err());
    }

    #[test]
    fn case_and_punctuation_do_not_change_fingerprints() {
        let a = fingerprint("Hello, World!", 3, 2).unwrap();
        let b = fingerprint("hello world", 3, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_document_reports_metadata() {
        let cfg = WinnowConfig::new().with_k(5).with_w(4);
        let fp = fingerprint_document("The quick brown fox", &cfg).unwrap();

        // "thequickbrownfox" is 16 letters -> 12 shingles.
        assert_eq!(fp.meta.normalized_len, 16);
        assert_eq!(fp.shingle_count, 12);
        assert_eq!(fp.meta.k, 5);
        assert_eq!(fp.meta.w, 4);
        assert_eq!(fp.meta.perceptual_version, PERCEPTUAL_VERSION);
        assert!(fp.fingerprints.len() <= fp.shingle_count - cfg.w + 1);
        for s in &fp.winnowed {
            assert!(fp.fingerprints.contains(&s.hash));
        }
    }

    #[test]
    fn fingerprint_document_serializes() {
        let fp = fingerprint_document("serialize me please", &WinnowConfig::default()).unwrap();
        let json = serde_json::to_value(&fp).unwrap();
        assert_eq!(json["meta"]["algorithm_name"], PERCEPTUAL_ALGORITHM);
        assert!(json["fingerprints"].is_array());
    }
}
