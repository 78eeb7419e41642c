//! DuckDB-backed document store
//!
//! Raw provider records are persisted as JSON documents in a named
//! collection, one document per row, identified by the store's generated
//! rowid. Bulk inserts run inside one transaction per batch to amortize I/O.

use crate::error::{Error, Result};
use crate::provider::RawRecord;
use duckdb::Connection;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// One persisted document plus its store-generated identity
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Store-generated identity (rowid)
    pub id: i64,
    /// Original record content
    pub record: RawRecord,
}

/// Document store over a DuckDB database
pub struct DocumentStore {
    conn: Connection,
}

impl DocumentStore {
    /// Open (or create) a store at the given path.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::store(format!("failed to create store directory: {e}")))?;
            }
        }
        let conn = Connection::open(path)
            .map_err(|e| Error::store(format!("failed to open store: {e}")))?;
        Ok(Self { conn })
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::store(format!("failed to open in-memory store: {e}")))?;
        Ok(Self { conn })
    }

    /// Create a collection if it does not exist
    pub fn create_collection(&self, name: &str) -> Result<()> {
        validate_collection_name(name)?;
        let sql = format!("CREATE TABLE IF NOT EXISTS {name} (doc JSON NOT NULL)");
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    /// Bulk-insert a batch of documents into a collection.
    ///
    /// The whole batch is one transaction: either every document lands or
    /// none do. An empty batch is a no-op.
    pub fn bulk_insert(&self, collection: &str, docs: &[RawRecord]) -> Result<()> {
        validate_collection_name(collection)?;
        if docs.is_empty() {
            return Ok(());
        }

        self.conn.execute_batch("BEGIN TRANSACTION")?;
        let result = self.insert_all(collection, docs);
        if result.is_err() {
            let _ = self.conn.execute_batch("ROLLBACK");
            return result;
        }
        self.conn.execute_batch("COMMIT")?;

        debug!(collection, count = docs.len(), "bulk-inserted documents");
        Ok(())
    }

    fn insert_all(&self, collection: &str, docs: &[RawRecord]) -> Result<()> {
        let sql = format!("INSERT INTO {collection} (doc) VALUES (?)");
        let mut stmt = self.conn.prepare(&sql)?;
        for doc in docs {
            let body = serde_json::to_string(doc)?;
            stmt.execute([body])?;
        }
        Ok(())
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> Result<usize> {
        validate_collection_name(collection)?;
        let sql = format!("SELECT COUNT(*) FROM {collection}");
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Stream every document in a collection through a callback.
    ///
    /// Iteration order is the store's natural (rowid) order; it is not part
    /// of the contract.
    pub fn for_each(
        &self,
        collection: &str,
        mut f: impl FnMut(StoredDocument) -> Result<()>,
    ) -> Result<()> {
        validate_collection_name(collection)?;
        let sql = format!("SELECT rowid, doc FROM {collection} ORDER BY rowid");
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let body: String = row.get(1)?;
            Ok((id, body))
        })?;

        for row in rows {
            let (id, body) = row?;
            let value: Value = serde_json::from_str(&body)?;
            let record = match value {
                Value::Object(map) => map,
                other => {
                    return Err(Error::store(format!(
                        "document {id} is not an object: {other}"
                    )))
                }
            };
            f(StoredDocument { id, record })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}

/// Collection names are interpolated into SQL; restrict them to identifiers.
fn validate_collection_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.chars().next().is_some_and(|c| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidCollection { name: name.into() })
    }
}
