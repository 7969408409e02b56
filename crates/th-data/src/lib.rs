//! Catalog storage, configuration and export for the temple heritage hub

pub mod config;
pub mod export;
pub mod sample;
pub mod schema;
pub mod sources;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use config::HubConfig;
pub use sources::{MemoryCatalog, SqliteCatalog};

/// Failures of the catalog store, configuration loading or export
#[derive(Error, Debug)]
pub enum DataError {
    /// The SQLite store refused a statement or could not be opened
    #[error("Catalog store error: {0}")]
    Store(String),

    /// A record failed validation before reaching the store
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Building or writing an exported table failed
    #[error("Export failed: {0}")]
    Export(#[from] ArrowError),
}

impl From<rusqlite::Error> for DataError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Store(error.to_string())
    }
}
