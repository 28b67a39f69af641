use crate::error::{ServerError, ServerResult};
use crate::routes::{run_blocking, ApiPath};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use index::{DocSide, SessionHistory, StoredDocument};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<SessionHistory>,
}

/// Body of `GET /history-doc/{id}/{doc_type}`, keyed `document`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub document: StoredDocument,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: usize,
}

/// All stored sessions, newest first.
pub async fn get_history(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let store = state.store.clone();
    let history = run_blocking(move || Ok(store.history()?)).await?;
    Ok(Json(HistoryResponse { history }))
}

/// One side (`doc1` or `doc2`) of a stored pair.
pub async fn get_history_doc(
    State(state): State<Arc<ServerState>>,
    ApiPath((id, doc_type)): ApiPath<(u64, String)>,
) -> ServerResult<impl IntoResponse> {
    let side = DocSide::parse(&doc_type).ok_or_else(|| {
        ServerError::BadRequest(format!(
            "doc_type must be doc1 or doc2 (got '{doc_type}')"
        ))
    })?;

    let store = state.store.clone();
    let document = run_blocking(move || Ok(store.get_document(id, side)?))
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("no stored check with id {id}")))?;

    Ok(Json(DocumentResponse { document }))
}

/// Remove every stored pair of a session.
pub async fn delete_session(
    State(state): State<Arc<ServerState>>,
    ApiPath(session_id): ApiPath<String>,
) -> ServerResult<impl IntoResponse> {
    let store = state.store.clone();
    let target = session_id.clone();
    let deleted = run_blocking(move || Ok(store.delete_session(&target)?)).await?;

    if deleted == 0 {
        return Err(ServerError::NotFound(format!(
            "no records for session {session_id}"
        )));
    }

    tracing::info!(session_id = %session_id, deleted, "session deleted");
    Ok(Json(DeleteResponse {
        message: format!("{deleted} records from session {session_id} deleted"),
        deleted,
    }))
}
