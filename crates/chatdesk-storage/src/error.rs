//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded writing {key}: {requested} bytes over a {quota} byte quota")]
    QuotaExceeded {
        key: String,
        requested: usize,
        quota: usize,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
