//! Workspace umbrella crate for plagscan.
//!
//! This crate stitches together normalization, winnowing fingerprints, pair
//! scoring and result history so callers can run a whole plagiarism check
//! through a single entry point: [`check_and_record`].

mod session;

pub use canonical::{dense, normalize};
pub use index::{
    BackendConfig, CheckRecord, DocSide, HistoryStore, IndexConfig, IndexError, NewCheck,
    ResultIndex, SessionHistory, SessionResult, StoredDocument,
};
pub use matcher::{
    BatchMetrics, ComparisonBatch, Document, MatchError, PairResult, compare, compare_batch,
    compare_batch_with_config, compare_with_config, jaccard_similarity, set_batch_metrics,
};
pub use perceptual::{
    FingerprintSet, PerceptualError, PerceptualFingerprint, ShingleHash, WinnowConfig,
    fingerprint, fingerprint_document,
};
pub use session::{
    DEFAULT_SESSION_OFFSET_SECS, default_session_offset, session_id_at, session_id_now,
};

use std::error::Error;
use std::fmt;
use std::time::Instant;

/// Errors that can occur while checking a batch and recording its results.
#[derive(Debug)]
pub enum PipelineError {
    Match(MatchError),
    Store(IndexError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Match(err) => write!(f, "comparison failed: {err}"),
            PipelineError::Store(err) => write!(f, "recording results failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Match(err) => Some(err),
            PipelineError::Store(err) => Some(err),
        }
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

impl From<PerceptualError> for PipelineError {
    fn from(value: PerceptualError) -> Self {
        PipelineError::Match(MatchError::from(value))
    }
}

impl From<IndexError> for PipelineError {
    fn from(value: IndexError) -> Self {
        PipelineError::Store(value)
    }
}

/// Compare every pair of `documents` and persist one history row per pair.
///
/// Scoring finishes before the store is touched, so an invalid `cfg` records
/// nothing. A storage failure aborts the remaining writes; rows already
/// written stay in the store.
pub fn check_and_record(
    documents: &[Document],
    cfg: &WinnowConfig,
    session_id: &str,
    store: &dyn HistoryStore,
) -> Result<ComparisonBatch, PipelineError> {
    let start = Instant::now();
    let results = compare_batch_with_config(documents, cfg)?;

    for pair in &results {
        let doc1 = &documents[pair.doc1_index];
        let doc2 = &documents[pair.doc2_index];
        store.record(NewCheck {
            session_id,
            doc1_name: &doc1.name,
            doc2_name: &doc2.name,
            doc1_text: &doc1.text,
            doc2_text: &doc2.text,
            similarity: pair.similarity,
        })?;
    }

    tracing::info!(
        session_id,
        documents = documents.len(),
        pairs = results.len(),
        latency_ms = start.elapsed().as_millis() as u64,
        "plagiarism check recorded"
    );

    Ok(ComparisonBatch::new(session_id, results))
}
