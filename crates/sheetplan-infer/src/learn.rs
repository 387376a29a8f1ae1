//! Correction learning loop.
//!
//! A correction is persisted before it is memoized: the store upsert runs
//! first and the live predictor only learns the term once the store accepted
//! the write. A store failure therefore leaves the predictor exactly as it
//! was.

use tracing::debug;

use sheetplan_model::{ItemTag, TagCorrection};

use crate::error::StoreError;
use crate::predict::{TagPredictor, normalize_term};
use crate::store::CorrectionStore;

/// Applies user corrections to a store and a session predictor.
#[derive(Debug)]
pub struct CorrectionLearner<S> {
    store: S,
}

impl<S: CorrectionStore> CorrectionLearner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record that `user` corrected `term` from `predicted` to `corrected`,
    /// then teach the session predictor. The stored row is returned.
    pub fn save_correction(
        &self,
        user: &str,
        term: &str,
        predicted: ItemTag,
        corrected: ItemTag,
        source_file: Option<String>,
        predictor: &mut TagPredictor,
    ) -> Result<TagCorrection, StoreError> {
        let normalized = normalize_term(term);
        let correction =
            TagCorrection::new(user, normalized.clone(), predicted, corrected, source_file);
        let stored = self.store.upsert(&correction)?;
        predictor.learn_user(&normalized, corrected);
        debug!(user, term = %normalized, corrected = %corrected, "correction learned");
        Ok(stored)
    }

    /// Replay every stored correction for `user` into the predictor's user
    /// overlay. Zero stored corrections is a successful no-op.
    pub fn hydrate(&self, user: &str, predictor: &mut TagPredictor) -> Result<usize, StoreError> {
        let corrections = self.store.corrections_for(user)?;
        let replayed = corrections.len();
        let batch: Vec<(String, ItemTag)> = corrections
            .into_iter()
            .map(|c| (c.term, c.corrected))
            .collect();
        predictor.learn_user_batch(&batch);
        debug!(user, replayed, "hydrated corrections");
        Ok(replayed)
    }
}
