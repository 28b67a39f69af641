//! Fingerprint types for the perceptual layer.
//!
//! [`ShingleHash`] is a fixed-width SHA-256 digest with a total order;
//! [`FingerprintSet`] is the set of hashes winnowing selects for one
//! document. Both serialize hashes as 64 lowercase hex characters.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::PerceptualError;

/// SHA-256 digest of one shingle.
///
/// Ordering compares the raw big-endian bytes, which matches both the
/// numeric order of the 256-bit value and the lexicographic order of its
/// lowercase hex encoding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShingleHash([u8; 32]);

impl ShingleHash {
    /// Digest width in bytes.
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex digest.
    pub fn from_hex(s: &str) -> Result<Self, PerceptualError> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| PerceptualError::InvalidHash(format!("{s:?}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ShingleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ShingleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShingleHash({})", self.to_hex())
    }
}

impl Serialize for ShingleHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ShingleHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ShingleHash::from_hex(&s).map_err(DeError::custom)
    }
}

/// Set of winnowed hashes for one document.
///
/// Set semantics: insertion order is irrelevant and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintSet(BTreeSet<ShingleHash>);

impl FingerprintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hash. Returns `false` if it was already present.
    pub fn insert(&mut self, hash: ShingleHash) -> bool {
        self.0.insert(hash)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, hash: &ShingleHash) -> bool {
        self.0.contains(hash)
    }

    /// Hashes in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, ShingleHash> {
        self.0.iter()
    }

    /// `|self ∩ other|`
    pub fn intersection_len(&self, other: &FingerprintSet) -> usize {
        // Walk the smaller set and probe the larger one.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|h| large.contains(h)).count()
    }

    /// `|self ∪ other|`
    pub fn union_len(&self, other: &FingerprintSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl FromIterator<ShingleHash> for FingerprintSet {
    fn from_iter<I: IntoIterator<Item = ShingleHash>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FingerprintSet {
    type Item = &'a ShingleHash;
    type IntoIter = btree_set::Iter<'a, ShingleHash>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Selected winnowed shingle with its originating position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowedShingle {
    /// Shingle hash value.
    pub hash: ShingleHash,
    /// Index of the shingle in the document's shingle sequence, which is also
    /// the character offset of its first letter in the dense text.
    pub start_idx: usize,
}

/// Full fingerprint artifact, including diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerceptualFingerprint {
    /// Number of k-shingles the dense text produced.
    pub shingle_count: usize,
    /// Window minima in window order, consecutive repeats of the same
    /// position suppressed.
    pub winnowed: Vec<WinnowedShingle>,
    /// The fingerprint set used for comparison.
    pub fingerprints: FingerprintSet,
    pub meta: PerceptualMeta,
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerceptualMeta {
    /// Bumped whenever normalization, shingling, hashing or winnowing change
    /// in a way that can affect fingerprints.
    pub perceptual_version: u16,
    pub algorithm_name: String,
    pub k: usize,
    pub w: usize,
    /// Length in characters of the dense, letters-only text.
    pub normalized_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(v: u8) -> ShingleHash {
        let mut bytes = [0u8; 32];
        bytes[31] = v;
        ShingleHash::from_bytes(bytes)
    }

    #[test]
    fn shingle_hash_hex_roundtrip() {
        let hash = h(0xab);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.ends_with("ab"));
        assert_eq!(ShingleHash::from_hex(&hex).unwrap(), hash);
    }

    #[test]
    fn shingle_hash_rejects_bad_hex() {
        assert!(matches!(
            ShingleHash::from_hex("zz"),
            Err(PerceptualError::InvalidHash(_))
        ));
        assert!(ShingleHash::from_hex(&"0".repeat(62)).is_err());
    }

    #[test]
    fn byte_order_matches_hex_order() {
        let mut high = [0u8; 32];
        high[0] = 0x10;
        let a = ShingleHash::from_bytes(high);
        let b = h(0xff);
        assert!(b < a);
        assert!(b.to_hex() < a.to_hex());
    }

    #[test]
    fn fingerprint_set_collapses_duplicates() {
        let set: FingerprintSet = vec![h(3), h(1), h(3), h(2)].into_iter().collect();
        assert_eq!(set.len(), 3);
        let ordered: Vec<ShingleHash> = set.iter().copied().collect();
        assert_eq!(ordered, vec![h(1), h(2), h(3)]);
    }

    #[test]
    fn intersection_and_union_sizes() {
        let a: FingerprintSet = [h(1), h(2), h(3)].into_iter().collect();
        let b: FingerprintSet = [h(2), h(3), h(4), h(5)].into_iter().collect();
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(b.intersection_len(&a), 2);
        assert_eq!(a.union_len(&b), 5);
        assert_eq!(a.union_len(&FingerprintSet::new()), 3);
    }

    #[test]
    fn fingerprint_set_serializes_as_hex_array() {
        let set: FingerprintSet = [h(1)].into_iter().collect();
        let json = serde_json::to_value(&set).unwrap();
        let items = json.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_str().unwrap(), h(1).to_hex());

        let back: FingerprintSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn debug_formatting() {
        let shingle = WinnowedShingle {
            hash: h(7),
            start_idx: 5,
        };
        let debug_str = format!("{shingle:?}");
        assert!(debug_str.contains("ShingleHash("));
        assert!(debug_str.contains("start_idx: 5"));
    }
}
