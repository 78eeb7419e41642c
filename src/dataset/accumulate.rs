//! Chunked accumulation of projected rows

use super::row::{project, EmployerRow};
use crate::error::Result;
use crate::store::DocumentStore;
use tracing::{debug, info};

/// Rows buffered before a merge into the accumulator
pub const CHUNK_SIZE: usize = 2500;

/// Accumulated untyped rows, each tagged with its document identity
#[derive(Debug, Default)]
pub struct RawTable {
    /// (document id, row) pairs in accumulation order
    pub rows: Vec<(i64, EmployerRow)>,
}

impl RawTable {
    /// Number of accumulated rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were accumulated
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Accumulates rows through a fixed-size buffer.
///
/// The working buffer is merged into the accumulator every [`CHUNK_SIZE`]
/// rows and restarted, bounding the append-path working set to one chunk;
/// the final partial buffer is merged by [`finish`](Self::finish).
#[derive(Debug)]
pub struct ChunkedAccumulator {
    chunk_size: usize,
    buffer: Vec<(i64, EmployerRow)>,
    merged: Vec<(i64, EmployerRow)>,
}

impl ChunkedAccumulator {
    /// Create an accumulator with the default chunk size
    pub fn new() -> Self {
        Self::with_chunk_size(CHUNK_SIZE)
    }

    /// Create an accumulator with a custom chunk size
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            buffer: Vec::new(),
            merged: Vec::new(),
        }
    }

    /// Append one row
    pub fn push(&mut self, document_id: i64, row: EmployerRow) {
        self.buffer.push((document_id, row));
        if self.buffer.len() >= self.chunk_size {
            self.merge();
        }
    }

    fn merge(&mut self) {
        debug!(chunk = self.buffer.len(), total = self.merged.len(), "merging chunk");
        self.merged.append(&mut self.buffer);
    }

    /// Merge the final partial buffer and take the accumulated table
    pub fn finish(mut self) -> RawTable {
        if !self.buffer.is_empty() {
            self.merge();
        }
        RawTable { rows: self.merged }
    }
}

impl Default for ChunkedAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream every document in a collection into an untyped table.
///
/// Single-threaded streaming pass; row order follows the store's natural
/// iteration order.
pub fn accumulate(store: &DocumentStore, collection: &str) -> Result<RawTable> {
    info!(collection, "loading dataset from the store");
    let mut acc = ChunkedAccumulator::new();
    store.for_each(collection, |doc| {
        acc.push(doc.id, project(&doc.record));
        Ok(())
    })?;
    let table = acc.finish();
    info!(rows = table.len(), "accumulation complete");
    Ok(table)
}
