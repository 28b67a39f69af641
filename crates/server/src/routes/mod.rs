//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: liveness and readiness probes
//! - `plagiarism`: batch checks, single-pair comparison, fingerprint diagnostics
//! - `history`: stored sessions, stored documents, session deletion

pub mod health;
pub mod history;
pub mod plagiarism;

use crate::error::{ServerError, ServerResult};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// JSON body extractor whose rejections render as [`ServerError::BadRequest`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as [`ServerError::BadRequest`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServerError))]
pub struct ApiPath<T>(pub T);

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "plagscan",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "plagscan",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /plagiarism",
            "POST /compare",
            "POST /fingerprint",
            "GET /history",
            "GET /history-doc/{id}/{doc_type}",
            "DELETE /delete-session/{session_id}",
            "GET /health",
            "GET /ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound("route not found".to_string())
}

/// Run CPU-bound or blocking storage work off the async runtime.
pub(crate) async fn run_blocking<F, T>(work: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}
