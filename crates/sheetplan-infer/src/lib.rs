#![deny(unsafe_code)]

pub mod classify;
pub mod error;
pub mod features;
pub mod learn;
pub mod predict;
pub mod store;

pub use classify::{Classification, RULE_ORDER, StructureRule, classify_row};
pub use error::StoreError;
pub use features::{RowFeatures, extract_row_features};
pub use learn::CorrectionLearner;
pub use predict::{Prediction, PredictionSource, TagMemory, TagPredictor, normalize_term};
pub use store::{CorrectionStore, JsonCorrectionStore};
