//! Redb backend for persistent check history.
//!
//! Redb is a pure Rust embedded key-value store with ACID transactions, so a
//! single `.redb` file is all a deployment needs. Each [`IndexBackend::apply`]
//! batch is one write transaction, so a crash never leaves half a batch behind.
//!
//! ```toml
//! [storage]
//! backend = "redb"
//! path = "plagiarism.redb"
//! ```

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::{IndexBackend, IndexError, WriteOp};

/// One row per stored check result, keyed by zero-padded record id.
const CHECKS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("check_results");

fn backend_err<E: Display>(err: E) -> IndexError {
    IndexError::backend(err.to_string())
}

/// Redb-backed [`IndexBackend`].
///
/// The `Arc<Database>` is shared freely across threads; redb does its own
/// locking and MVCC.
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Open the database at `path`, creating the file and table if needed.
    ///
    /// ```no_run
    /// use index::RedbBackend;
    ///
    /// let backend = RedbBackend::open("/tmp/plagiarism.redb").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let db = Database::create(path).map_err(backend_err)?;

        let txn = db.begin_write().map_err(backend_err)?;
        {
            // Opening inside a write transaction creates the table.
            txn.open_table(CHECKS_TABLE).map_err(backend_err)?;
        }
        txn.commit().map_err(backend_err)?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl IndexBackend for RedbBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, IndexError> {
        let txn = self.db.begin_read().map_err(backend_err)?;
        let table = txn.open_table(CHECKS_TABLE).map_err(backend_err)?;
        let value = table.get(key).map_err(backend_err)?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn apply(&self, ops: &[WriteOp<'_>]) -> Result<(), IndexError> {
        let txn = self.db.begin_write().map_err(backend_err)?;
        {
            let mut table = txn.open_table(CHECKS_TABLE).map_err(backend_err)?;
            for op in ops {
                match *op {
                    WriteOp::Put(key, value) => {
                        table.insert(key, value).map_err(backend_err)?;
                    }
                    WriteOp::Delete(key) => {
                        table.remove(key).map_err(backend_err)?;
                    }
                }
            }
        }
        // Dropping an uncommitted transaction aborts it.
        txn.commit().map_err(backend_err)
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&str, &[u8]) -> Result<(), IndexError>,
    ) -> Result<(), IndexError> {
        let txn = self.db.begin_read().map_err(backend_err)?;
        let table = txn.open_table(CHECKS_TABLE).map_err(backend_err)?;
        for item in table.iter().map_err(backend_err)? {
            let (key, value) = item.map_err(backend_err)?;
            visitor(key.value(), value.value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, RedbBackend) {
        let dir = TempDir::new().unwrap();
        let backend = RedbBackend::open(dir.path().join("checks.redb")).unwrap();
        (dir, backend)
    }

    #[test]
    fn put_get_and_missing_key() {
        let (_dir, backend) = open_temp();
        backend
            .apply(&[WriteOp::Put("00000000000000000001", b"row")])
            .unwrap();
        assert_eq!(
            backend.get("00000000000000000001").unwrap(),
            Some(b"row".to_vec())
        );
        assert_eq!(backend.get("00000000000000000002").unwrap(), None);
    }

    #[test]
    fn apply_commits_mixed_batch() {
        let (_dir, backend) = open_temp();
        backend
            .apply(&[
                WriteOp::Put("1", b"one"),
                WriteOp::Put("2", b"two"),
                WriteOp::Put("3", b"three"),
            ])
            .unwrap();
        backend
            .apply(&[WriteOp::Delete("1"), WriteOp::Delete("3"), WriteOp::Put("4", b"four")])
            .unwrap();

        assert_eq!(backend.get("2").unwrap(), Some(b"two".to_vec()));
        let mut keys = Vec::new();
        backend
            .scan(&mut |key, _| {
                keys.push(key.to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(keys, vec!["2", "4"]);
    }

    #[test]
    fn delete_of_missing_key_is_ok() {
        let (_dir, backend) = open_temp();
        backend.apply(&[WriteOp::Delete("never-there")]).unwrap();
        assert_eq!(backend.get("never-there").unwrap(), None);
    }

    #[test]
    fn rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let backend = RedbBackend::open(&path).unwrap();
            backend.apply(&[WriteOp::Put("kept", b"value")]).unwrap();
        }
        let reopened = RedbBackend::open(&path).unwrap();
        assert_eq!(reopened.get("kept").unwrap(), Some(b"value".to_vec()));
    }
}
