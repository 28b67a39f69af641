//! Shingle hashing.
//!
//! ```text
//! SHA-256(shingle_utf8_bytes)
//! ```
//!
//! The same function is used for every document so that hash values are
//! comparable across documents and across runs.

use sha2::{Digest, Sha256};

use crate::fingerprint::ShingleHash;

/// Hash one shingle's UTF-8 bytes.
pub fn hash_shingle(shingle: &str) -> ShingleHash {
    let digest = Sha256::digest(shingle.as_bytes());
    let mut bytes = [0u8; ShingleHash::LEN];
    bytes.copy_from_slice(&digest);
    ShingleHash::from_bytes(bytes)
}

/// Hash every shingle, keeping positions aligned: output `i` is the hash of
/// shingle `i`.
pub fn hash_shingles<S: AsRef<str>>(shingles: &[S]) -> Vec<ShingleHash> {
    let mut out = Vec::with_capacity(shingles.len());
    out.extend(shingles.iter().map(|s| hash_shingle(s.as_ref())));
    out
}
