//! Error types for sheet analysis.

use thiserror::Error;

use sheetplan_infer::StoreError;
use sheetplan_ingest::IngestError;

/// Errors surfaced by the analysis facade.
///
/// Store trouble is split by phase: a `Hydration` failure happens before any
/// tree is built and leaves the shared prediction layers untouched; a
/// `Store` failure happens while persisting a correction and leaves the
/// session predictor unchanged.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("replay stored corrections: {0}")]
    Hydration(#[source] StoreError),
    #[error("persist correction: {0}")]
    Store(#[source] StoreError),
}
