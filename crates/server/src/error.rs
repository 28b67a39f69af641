use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use perceptual::PerceptualError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Perceptual(#[from] PerceptualError),

    #[error("Match error: {0}")]
    Match(#[from] matcher::MatchError),

    #[error("Storage error: {0}")]
    Index(#[from] index::IndexError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Whether this error is a rejected `k` / `window_size`.
    fn is_invalid_parameter(&self) -> bool {
        match self {
            ServerError::Perceptual(err) => matches!(err, PerceptualError::InvalidParameter { .. }),
            ServerError::Match(matcher::MatchError::Perceptual(err)) => {
                matches!(err, PerceptualError::InvalidParameter { .. })
            }
            _ => false,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        if self.is_invalid_parameter() {
            return StatusCode::UNPROCESSABLE_ENTITY;
        }
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Perceptual(_) | ServerError::Match(_) => StatusCode::BAD_REQUEST,
            ServerError::Index(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        if self.is_invalid_parameter() {
            return "INVALID_PARAMETER";
        }
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::Perceptual(_) => "PERCEPTUAL_ERROR",
            ServerError::Match(_) => "MATCH_ERROR",
            ServerError::Index(_) => "STORAGE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<plagscan::PipelineError> for ServerError {
    fn from(err: plagscan::PipelineError) -> Self {
        match err {
            plagscan::PipelineError::Match(e) => ServerError::Match(e),
            plagscan::PipelineError::Store(e) => ServerError::Index(e),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("worker task failed: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Config(err.to_string())
    }
}
