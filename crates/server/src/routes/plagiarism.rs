use crate::error::ServerResult;
use crate::routes::{run_blocking, ApiJson};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use matcher::{Document, PairResult};
use perceptual::{PerceptualMeta, WinnowedShingle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Batch plagiarism check request
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Documents with already-extracted text
    pub documents: Vec<Document>,

    /// Shingle length; the server default when omitted
    #[serde(default)]
    pub k: Option<i64>,

    /// Winnowing window; the server default when omitted
    #[serde(default)]
    pub window_size: Option<i64>,
}

/// One pair of a batch response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub doc1_index: usize,
    pub doc2_index: usize,
    pub doc1_name: String,
    pub doc2_name: String,
    pub similarity: f64,
    pub session_id: String,
}

impl SimilarityEntry {
    fn from_pair(pair: PairResult, session_id: &str) -> Self {
        Self {
            doc1_index: pair.doc1_index,
            doc2_index: pair.doc2_index,
            doc1_name: pair.doc1_name,
            doc2_name: pair.doc2_name,
            similarity: pair.similarity,
            session_id: session_id.to_string(),
        }
    }
}

/// Batch plagiarism check response
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectResponse {
    pub similarities: Vec<SimilarityEntry>,
    pub session_id: String,
}

/// Compare every pair of the submitted documents and record the results.
///
/// All pairs share one freshly generated session id. Fingerprinting runs on
/// the blocking pool.
pub async fn detect_plagiarism(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<DetectRequest>,
) -> ServerResult<impl IntoResponse> {
    let cfg = state.winnow_for(request.k, request.window_size)?;
    let session_id = state.new_session_id();
    let store = state.store.clone();
    let documents = request.documents;

    let batch = run_blocking(move || {
        Ok(plagscan::check_and_record(
            &documents,
            &cfg,
            &session_id,
            store.as_ref(),
        )?)
    })
    .await?;

    let session_id = batch.session_id;
    let similarities = batch
        .results
        .into_iter()
        .map(|pair| SimilarityEntry::from_pair(pair, &session_id))
        .collect();

    Ok(Json(DetectResponse {
        similarities,
        session_id,
    }))
}

/// Single pair comparison request
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub doc1: String,
    pub doc2: String,
    #[serde(default)]
    pub k: Option<i64>,
    #[serde(default)]
    pub window_size: Option<i64>,
}

/// Single pair comparison response
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub similarity: f64,
    pub k: usize,
    pub window_size: usize,
}

/// Score two texts without touching history.
pub async fn compare_pair(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<CompareRequest>,
) -> ServerResult<impl IntoResponse> {
    let cfg = state.winnow_for(request.k, request.window_size)?;
    let similarity = run_blocking(move || {
        Ok(matcher::compare_with_config(
            &request.doc1,
            &request.doc2,
            &cfg,
        )?)
    })
    .await?;

    Ok(Json(CompareResponse {
        similarity,
        k: cfg.k,
        window_size: cfg.w,
    }))
}

/// Fingerprint diagnostics request
#[derive(Debug, Deserialize)]
pub struct FingerprintRequest {
    pub text: String,
    #[serde(default)]
    pub k: Option<i64>,
    #[serde(default)]
    pub window_size: Option<i64>,
    /// Include per-window selections in the response
    #[serde(default)]
    pub include_positions: bool,
}

/// Fingerprint diagnostics response
#[derive(Debug, Serialize, Deserialize)]
pub struct FingerprintResponse {
    pub shingle_count: usize,
    pub fingerprint_count: usize,
    /// Hex-encoded SHA-256 fingerprints in ascending order
    pub fingerprints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<WinnowedShingle>>,
    pub meta: PerceptualMeta,
}

/// Return the winnowing fingerprint of one text.
pub async fn fingerprint_text(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<FingerprintRequest>,
) -> ServerResult<impl IntoResponse> {
    let cfg = state.winnow_for(request.k, request.window_size)?;
    let include_positions = request.include_positions;
    let fp = run_blocking(move || Ok(perceptual::fingerprint_document(&request.text, &cfg)?))
        .await?;

    let fingerprints: Vec<String> = fp.fingerprints.iter().map(|h| h.to_hex()).collect();
    Ok(Json(FingerprintResponse {
        shingle_count: fp.shingle_count,
        fingerprint_count: fingerprints.len(),
        fingerprints,
        positions: include_positions.then_some(fp.winnowed),
        meta: fp.meta,
    }))
}
