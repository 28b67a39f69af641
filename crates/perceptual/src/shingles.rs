//! Shingling and winnowing.
//!
//! Character k-shingling over the dense text, followed by winnowing to select
//! representative hashes. Both run in O(n) over the number of characters or
//! shingles.

use std::collections::VecDeque;

use crate::fingerprint::{FingerprintSet, ShingleHash, WinnowedShingle};

/// Every length-`k` substring of `dense`, by character, in start order.
///
/// Returns an empty vector when `dense` has fewer than `k` characters or
/// `k == 0`.
pub fn make_shingles(dense: &str, k: usize) -> Vec<&str> {
    if k == 0 {
        return Vec::new();
    }
    // Byte offset of every character boundary, plus the end of the string.
    let mut bounds: Vec<usize> = dense.char_indices().map(|(i, _)| i).collect();
    let n = bounds.len();
    if n < k {
        return Vec::new();
    }
    bounds.push(dense.len());

    let mut out = Vec::with_capacity(n - k + 1);
    for start in 0..=n - k {
        out.push(&dense[bounds[start]..bounds[start + k]]);
    }
    out
}

/// Winnowing via monotonic deque, O(n).
///
/// Selects the minimum hash in each window of `w` consecutive hashes. Among
/// equal hashes the rightmost position wins. A position that stays the
/// minimum across consecutive windows is emitted once.
///
/// Fewer than `w` hashes means no complete window, so nothing is selected.
pub fn winnow_minq(hashes: &[ShingleHash], w: usize) -> Vec<WinnowedShingle> {
    let n = hashes.len();
    if w == 0 || n < w {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n - w + 1);
    // Indices of the current window, hashes strictly increasing front to back.
    let mut dq: VecDeque<usize> = VecDeque::with_capacity(w);
    let mut last_picked: Option<usize> = None;

    for i in 0..n {
        while let Some(&j) = dq.back() {
            if hashes[i] <= hashes[j] {
                dq.pop_back();
            } else {
                break;
            }
        }
        dq.push_back(i);

        if i + 1 < w {
            continue;
        }

        let left = i + 1 - w;
        while let Some(&j) = dq.front() {
            if j < left {
                dq.pop_front();
            } else {
                break;
            }
        }

        if let Some(&idx) = dq.front() {
            if last_picked != Some(idx) {
                out.push(WinnowedShingle {
                    hash: hashes[idx],
                    start_idx: idx,
                });
                last_picked = Some(idx);
            }
        }
    }

    out
}

/// Winnow `hashes` straight into a fingerprint set.
pub fn winnow(hashes: &[ShingleHash], w: usize) -> FingerprintSet {
    winnow_minq(hashes, w).into_iter().map(|s| s.hash).collect()
}
