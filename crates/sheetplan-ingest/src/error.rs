//! Error types for sheet ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while materializing a sheet.
///
/// An unreadable sheet is a single descriptive failure; ingestion never
/// hands back a partial grid.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
