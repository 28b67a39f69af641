use perceptual::PerceptualError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A caller-supplied document: a display name (not necessarily unique) and
/// its already-extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Similarity of one unordered document pair.
///
/// Always `doc1_index < doc2_index`; `similarity` is a percentage in
/// `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub doc1_index: usize,
    pub doc2_index: usize,
    pub doc1_name: String,
    pub doc2_name: String,
    pub similarity: f64,
}

/// All pair results of one batch invocation, grouped under an opaque session
/// token chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBatch {
    pub session_id: String,
    pub results: Vec<PairResult>,
}

impl ComparisonBatch {
    pub fn new(session_id: impl Into<String>, results: Vec<PairResult>) -> Self {
        Self {
            session_id: session_id.into(),
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PairResult> {
        self.results.iter()
    }

    /// Look up the result for documents `i` and `j` in either order.
    pub fn pair(&self, i: usize, j: usize) -> Option<&PairResult> {
        let (a, b) = if i <= j { (i, j) } else { (j, i) };
        self.results
            .iter()
            .find(|r| r.doc1_index == a && r.doc2_index == b)
    }
}

/// Errors surfaced by the comparison layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Fingerprinting rejected its parameters.
    #[error("perceptual error: {0}")]
    Perceptual(#[from] PerceptualError),
}
