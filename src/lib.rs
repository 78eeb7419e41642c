// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Glassdoor Harvest
//!
//! Harvests the Glassdoor Employers API into a local document store and
//! projects the documents into a typed Parquet dataset.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use glassdoor_harvest::{config::Config, pipeline, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let report = pipeline::run(&config).await?;
//!     println!("{} rows written to {}", report.dataset_rows, report.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! probe ──► harvest (N concurrent page workers) ──► document store
//!                                                        │
//!                         Parquet ◄── finalize ◄── chunked accumulate
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

/// Environment-driven configuration
pub mod config;

/// Projection, chunked accumulation and finalization into Arrow
pub mod dataset;

/// Error types
pub mod error;

/// Concurrent page harvest
pub mod harvest;

/// HTTP client with retry and rate limiting
pub mod http;

/// Parquet output
pub mod output;

/// End-to-end pipeline
pub mod pipeline;

/// Glassdoor Employers API client and per-page retrier
pub mod provider;

/// Embedded document store
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use harvest::HarvestReport;
pub use pipeline::PipelineReport;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
