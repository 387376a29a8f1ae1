#![deny(unsafe_code)]

pub mod analysis;
pub mod correction;
pub mod error;
pub mod node;
pub mod profile;
pub mod tag;

pub use analysis::SheetAnalysis;
pub use correction::{ModelKind, TagCorrection};
pub use error::ModelError;
pub use node::{NodeId, NodeKind, PlanNode, REVIEW_THRESHOLD};
pub use profile::{ColumnProfile, LayoutSuggestion};
pub use tag::ItemTag;
