//! Check-result history on top of an [`IndexBackend`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IndexBackend, IndexConfig, IndexError, WriteOp, CHECK_SCHEMA_VERSION};

/// Keys under this prefix hold store metadata, never check records.
const META_PREFIX: &str = "meta:";

/// Largest id ever handed out, as big-endian `u64`. Survives deletion of the
/// records it numbered so ids are never reused.
const HIGH_WATER_KEY: &str = "meta:high_water";

/// One persisted pair comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub schema_version: u16,
    /// Monotonic id assigned by the store.
    pub id: u64,
    pub session_id: String,
    pub doc1_name: String,
    pub doc2_name: String,
    pub doc1_text: String,
    pub doc2_text: String,
    pub similarity: f64,
    pub checked_at: DateTime<Utc>,
}

/// Input to [`HistoryStore::record`]; the store assigns id and timestamp.
#[derive(Clone, Copy, Debug)]
pub struct NewCheck<'a> {
    pub session_id: &'a str,
    pub doc1_name: &'a str,
    pub doc2_name: &'a str,
    pub doc1_text: &'a str,
    pub doc2_text: &'a str,
    pub similarity: f64,
}

/// Which document of a stored pair to retrieve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocSide {
    Doc1,
    Doc2,
}

impl DocSide {
    /// Parse the `doc1` / `doc2` path segment used by the HTTP layer.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "doc1" => Some(DocSide::Doc1),
            "doc2" => Some(DocSide::Doc2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocSide::Doc1 => "doc1",
            DocSide::Doc2 => "doc2",
        }
    }
}

/// One side of a stored pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: u64,
    pub name: String,
    pub text: String,
}

/// Summary row of a stored pair, without the document texts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub id: u64,
    pub doc1_name: String,
    pub doc2_name: String,
    pub similarity: f64,
}

/// All stored pairs of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    pub session_id: String,
    /// Timestamp of the most recent record in the session.
    pub checked_at: DateTime<Utc>,
    pub results: Vec<SessionResult>,
}

/// Persistence seam for check results.
///
/// Implementations must be shareable across request handlers.
pub trait HistoryStore: Send + Sync {
    /// Persist one pair result and return its assigned id.
    fn record(&self, check: NewCheck<'_>) -> Result<u64, IndexError>;

    /// All sessions, newest session id first; results within a session in
    /// ascending id order.
    fn history(&self) -> Result<Vec<SessionHistory>, IndexError>;

    /// One side of the record `id`, or `None` if no such record exists.
    fn get_document(&self, id: u64, side: DocSide) -> Result<Option<StoredDocument>, IndexError>;

    /// Remove every record of `session_id`, returning how many were removed.
    ///
    /// The removal is all or nothing.
    fn delete_session(&self, session_id: &str) -> Result<usize, IndexError>;

    /// Cheap round trip to the underlying storage, independent of its size.
    fn ping(&self) -> Result<(), IndexError>;
}

/// [`HistoryStore`] backed by any [`IndexBackend`].
///
/// Records are bincode-encoded and compressed per [`IndexConfig`]. Keys are
/// zero-padded decimal ids so that backends with ordered keys keep records in
/// insertion order.
pub struct ResultIndex {
    backend: Box<dyn IndexBackend>,
    cfg: IndexConfig,
    /// Next id to assign. Held across the write so the stored high-water
    /// mark only ever grows.
    next_id: Mutex<u64>,
}

impl ResultIndex {
    /// Open the backend described by `cfg`.
    pub fn new(cfg: IndexConfig) -> Result<Self, IndexError> {
        let backend = cfg.backend.build()?;
        Self::with_backend(cfg, backend)
    }

    /// Wrap an already-built backend.
    ///
    /// Ids continue after the stored high-water mark, or after the largest
    /// stored record id if that is higher.
    pub fn with_backend(cfg: IndexConfig, backend: Box<dyn IndexBackend>) -> Result<Self, IndexError> {
        let mut high_water = 0u64;
        let mut count = 0usize;
        backend.scan(&mut |key, value| {
            if key == HIGH_WATER_KEY {
                high_water = high_water.max(decode_high_water(value)?);
            } else if !key.starts_with(META_PREFIX) {
                let id = key
                    .parse::<u64>()
                    .map_err(|_| IndexError::backend(format!("malformed record key '{key}'")))?;
                high_water = high_water.max(id);
                count += 1;
            }
            Ok(())
        })?;
        tracing::debug!(records = count, next_id = high_water + 1, "history index opened");

        Ok(Self {
            backend,
            cfg,
            next_id: Mutex::new(high_water + 1),
        })
    }

    /// Fetch a full record by id.
    pub fn get(&self, id: u64) -> Result<Option<CheckRecord>, IndexError> {
        match self.backend.get(&record_key(id))? {
            Some(data) => Ok(Some(self.decode_record(&data)?)),
            None => Ok(None),
        }
    }

    /// Visit every stored record in backend order.
    pub fn scan(
        &self,
        visitor: &mut dyn FnMut(&CheckRecord) -> Result<(), IndexError>,
    ) -> Result<(), IndexError> {
        self.backend.scan(&mut |key, data| {
            if key.starts_with(META_PREFIX) {
                return Ok(());
            }
            let record = self.decode_record(data)?;
            visitor(&record)
        })
    }

    fn lock_next_id(&self) -> MutexGuard<'_, u64> {
        self.next_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn decode_record(&self, data: &[u8]) -> Result<CheckRecord, IndexError> {
        let decompressed = self.cfg.compression.decompress(data)?;
        let (record, _) = decode_from_slice(&decompressed, standard())?;
        Ok(record)
    }

    fn encode_record(&self, rec: &CheckRecord) -> Result<Vec<u8>, IndexError> {
        let encoded = encode_to_vec(rec, standard())?;
        self.cfg.compression.compress(&encoded)
    }
}

fn record_key(id: u64) -> String {
    format!("{id:020}")
}

fn decode_high_water(value: &[u8]) -> Result<u64, IndexError> {
    let bytes: [u8; 8] = value
        .try_into()
        .map_err(|_| IndexError::backend("malformed high-water mark"))?;
    Ok(u64::from_be_bytes(bytes))
}

impl HistoryStore for ResultIndex {
    fn record(&self, check: NewCheck<'_>) -> Result<u64, IndexError> {
        let mut next_id = self.lock_next_id();
        let id = *next_id;
        let record = CheckRecord {
            schema_version: CHECK_SCHEMA_VERSION,
            id,
            session_id: check.session_id.to_string(),
            doc1_name: check.doc1_name.to_string(),
            doc2_name: check.doc2_name.to_string(),
            doc1_text: check.doc1_text.to_string(),
            doc2_text: check.doc2_text.to_string(),
            similarity: check.similarity,
            checked_at: Utc::now(),
        };
        let payload = self.encode_record(&record)?;
        let high_water = id.to_be_bytes();
        self.backend.apply(&[
            WriteOp::Put(&record_key(id), &payload),
            WriteOp::Put(HIGH_WATER_KEY, &high_water),
        ])?;
        *next_id = id + 1;
        Ok(id)
    }

    fn history(&self) -> Result<Vec<SessionHistory>, IndexError> {
        let mut sessions: BTreeMap<String, SessionHistory> = BTreeMap::new();
        self.scan(&mut |rec| {
            let entry = sessions
                .entry(rec.session_id.clone())
                .or_insert_with(|| SessionHistory {
                    session_id: rec.session_id.clone(),
                    checked_at: rec.checked_at,
                    results: Vec::new(),
                });
            entry.checked_at = entry.checked_at.max(rec.checked_at);
            entry.results.push(SessionResult {
                id: rec.id,
                doc1_name: rec.doc1_name.clone(),
                doc2_name: rec.doc2_name.clone(),
                similarity: rec.similarity,
            });
            Ok(())
        })?;

        let mut history: Vec<SessionHistory> = sessions.into_values().rev().collect();
        for session in &mut history {
            session.results.sort_by_key(|r| r.id);
        }
        Ok(history)
    }

    fn get_document(&self, id: u64, side: DocSide) -> Result<Option<StoredDocument>, IndexError> {
        Ok(self.get(id)?.map(|rec| match side {
            DocSide::Doc1 => StoredDocument {
                id: rec.id,
                name: rec.doc1_name,
                text: rec.doc1_text,
            },
            DocSide::Doc2 => StoredDocument {
                id: rec.id,
                name: rec.doc2_name,
                text: rec.doc2_text,
            },
        }))
    }

    fn delete_session(&self, session_id: &str) -> Result<usize, IndexError> {
        let mut doomed = Vec::new();
        self.scan(&mut |rec| {
            if rec.session_id == session_id {
                doomed.push(record_key(rec.id));
            }
            Ok(())
        })?;
        if doomed.is_empty() {
            return Ok(0);
        }

        let ops: Vec<WriteOp<'_>> = doomed.iter().map(|key| WriteOp::Delete(key.as_str())).collect();
        self.backend.apply(&ops)?;
        tracing::debug!(session_id, removed = doomed.len(), "session deleted");
        Ok(doomed.len())
    }

    fn ping(&self) -> Result<(), IndexError> {
        self.backend.get(HIGH_WATER_KEY).map(|_| ())
    }
}
