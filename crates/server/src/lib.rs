//! plagscan server - HTTP REST API for winnowing plagiarism checks
//!
//! This crate exposes the plagscan pipeline over HTTP:
//!
//! - **Plagiarism Checks**: compare every pair of a document batch, record
//!   the results under a session id
//! - **Ad-hoc Scoring**: single-pair comparison and fingerprint diagnostics
//! - **History**: list sessions, fetch stored documents, delete sessions
//! - **Health**: liveness and readiness probes
//!
//! # Features
//!
//! - **Middleware**: compression, CORS, request ID tracking, structured logging
//! - **Configuration**: environment variable and file-based configuration
//! - **Error Handling**: JSON error bodies with stable error codes
//! - **Graceful Shutdown**: SIGTERM / Ctrl+C handling
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /plagiarism` - Batch check `{documents, k?, window_size?}`
//! - `POST /compare` - Score two texts `{doc1, doc2, k?, window_size?}`
//! - `POST /fingerprint` - Fingerprint one text
//! - `GET /history` - Stored sessions, newest first
//! - `GET /history-doc/{id}/{doc_type}` - One stored document (`doc1`/`doc2`)
//!   as `{"document": {id, name, text}}` (the key is `document`, not
//!   `dokumen`)
//! - `DELETE /delete-session/{session_id}` - Delete a session's records

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
