//! Tabular dataset construction
//!
//! Stored documents are projected into a fixed 11-column row shape with no
//! type validation, accumulated in bounded-size chunks, then finalized into
//! one typed Arrow `RecordBatch`. Type coercion happens only at finalization,
//! where a missing or non-numeric required column is a hard error naming the
//! column and the offending document.

mod accumulate;
mod finalize;
mod row;

pub use accumulate::{accumulate, ChunkedAccumulator, RawTable, CHUNK_SIZE};
pub use finalize::{employers_schema, finalize};
pub use row::{project, EmployerRow};

#[cfg(test)]
mod tests;
