#![deny(unsafe_code)]

pub mod analyzer;
pub mod error;
pub mod tree;

pub use analyzer::{AnalysisSession, SheetAnalyzer};
pub use error::AnalyzeError;
pub use tree::{AnalyzeOptions, FALLBACK_GROUP_NAME, assemble_analysis, build_tree};
