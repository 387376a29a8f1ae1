//! Error types for correction persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a correction store.
///
/// Store failures never corrupt the in-memory predictor: callers persist
/// first and only teach the overlay once the store accepted the write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("create correction store {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read corrections {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write corrections {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrections json {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
