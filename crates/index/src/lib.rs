//! # Plagscan Index
//!
//! Backend-agnostic history store for plagiarism check results. Every scored
//! document pair can be persisted as a [`CheckRecord`], listed back grouped by
//! session, have either of its documents retrieved, and be removed a whole
//! session at a time.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: storage goes through the [`IndexBackend`] trait.
//!   Out of the box it provides:
//!   - an in-memory `HashMap` backend for ephemeral storage and tests;
//!   - a Redb backend for persistent, on-disk storage (feature `backend-redb`,
//!     enabled by default).
//! - **Compact Records**: records are serialized with `bincode` and compressed
//!   with Zstd (see [`CompressionConfig`]) before reaching the backend.
//! - **Injected Collaborator**: callers hold a `dyn` [`HistoryStore`], so the
//!   scoring core never depends on this crate.
//!
//! ## Example Usage
//!
//! ```
//! use index::{BackendConfig, DocSide, HistoryStore, IndexConfig, NewCheck, ResultIndex};
//!
//! let store = ResultIndex::new(IndexConfig::new().with_backend(BackendConfig::in_memory())).unwrap();
//!
//! let id = store
//!     .record(NewCheck {
//!         session_id: "2024-05-01T10:00:00.000000+08:00",
//!         doc1_name: "a.txt",
//!         doc2_name: "b.txt",
//!         doc1_text: "the quick brown fox",
//!         doc2_text: "the quick brown fox jumps",
//!         similarity: 57.14,
//!     })
//!     .unwrap();
//!
//! let sessions = store.history().unwrap();
//! assert_eq!(sessions.len(), 1);
//! assert_eq!(sessions[0].results[0].id, id);
//!
//! let doc = store.get_document(id, DocSide::Doc2).unwrap().unwrap();
//! assert_eq!(doc.name, "b.txt");
//!
//! assert_eq!(store.delete_session("2024-05-01T10:00:00.000000+08:00").unwrap(), 1);
//! ```

mod backend;
mod history;

#[cfg(feature = "backend-redb")]
pub use backend::RedbBackend;
pub use backend::{BackendConfig, InMemoryBackend, IndexBackend, WriteOp};
pub use history::{
    CheckRecord, DocSide, HistoryStore, NewCheck, ResultIndex, SessionHistory, SessionResult,
    StoredDocument,
};

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;
use zstd::{decode_all, encode_all};

/// Bump this value whenever the on-disk `CheckRecord` layout changes.
pub const CHECK_SCHEMA_VERSION: u16 = 1;

/// Compression codec options for stored records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CompressionCodec {
    /// Store encoded records as-is.
    None,
    /// Zstd compression. Document texts dominate record size and compress well.
    #[default]
    Zstd,
}

/// Compression behavior configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressionConfig {
    pub codec: CompressionCodec,
    /// Zstd level, 1-22.
    pub level: i32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            codec: CompressionCodec::default(),
            level: 3,
        }
    }
}

impl CompressionConfig {
    pub fn new(codec: CompressionCodec, level: i32) -> Self {
        Self { codec, level }
    }

    pub fn with_codec(mut self, codec: CompressionCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub(crate) fn compress(&self, data: &[u8]) -> Result<Vec<u8>, IndexError> {
        match self.codec {
            CompressionCodec::None => Ok(data.to_vec()),
            CompressionCodec::Zstd => Ok(encode_all(data, self.level)?),
        }
    }

    pub(crate) fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, IndexError> {
        match self.codec {
            CompressionCodec::None => Ok(data.to_vec()),
            CompressionCodec::Zstd => Ok(decode_all(data)?),
        }
    }
}

/// Top-level configuration for a [`ResultIndex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexConfig {
    pub backend: BackendConfig,
    pub compression: CompressionConfig,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_compression(mut self, compression: CompressionConfig) -> Self {
        self.compression = compression;
        self
    }
}

/// Errors raised by the history store and its backends.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Serialization encode error: {0}")]
    Encode(String),
    #[error("Serialization decode error: {0}")]
    Decode(String),
    #[error("Compression error: {0}")]
    Zstd(String),
}

impl From<EncodeError> for IndexError {
    fn from(e: EncodeError) -> Self {
        IndexError::Encode(e.to_string())
    }
}

impl From<DecodeError> for IndexError {
    fn from(e: DecodeError) -> Self {
        IndexError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for IndexError {
    fn from(e: std::io::Error) -> Self {
        IndexError::Zstd(e.to_string())
    }
}

impl IndexError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
