//! Error types for the harvester
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the harvester
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required environment variable: {name}")]
    MissingEnv { name: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Transport unavailable after {attempts} attempts: {last_error}")]
    TransportUnavailable { attempts: u32, last_error: String },

    // ============================================================================
    // Provider Errors
    // ============================================================================
    #[error("Probe failed: {message}")]
    Probe { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Store Errors
    // ============================================================================
    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Invalid collection name: {name}")]
    InvalidCollection { name: String },

    // ============================================================================
    // Dataset Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Type coercion failed for column '{column}' in document {document_id}: {message}")]
    TypeCoercion {
        column: String,
        document_id: i64,
        message: String,
    },

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O and Generic Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing environment variable error
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingEnv { name: name.into() }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a probe error
    pub fn probe(message: impl Into<String>) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a type coercion error
    pub fn type_coercion(
        column: impl Into<String>,
        document_id: i64,
        message: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            column: column.into(),
            document_id,
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(e: duckdb::Error) -> Self {
        Self::Store {
            message: e.to_string(),
        }
    }
}

/// Result type alias for the harvester
pub type Result<T> = std::result::Result<T, Error>;
