//! Output module
//!
//! Writes the finalized dataset to a Parquet file.

mod writer;

pub use writer::{write_batch_to_parquet, ParquetWriter, ParquetWriterConfig};
