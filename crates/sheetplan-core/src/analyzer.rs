//! Analysis facade tying sheet sources, prediction and corrections
//! together.
//!
//! A [`SheetAnalyzer`] owns the long-lived pieces: the sheet source, the
//! shared prediction memory and the correction store. Each
//! [`AnalysisSession`] layers one user's replayed corrections on top and is
//! the object hosts keep around while that user reviews a sheet.

use tracing::debug;

use sheetplan_infer::{
    CorrectionLearner, CorrectionStore, Prediction, TagMemory, TagPredictor,
};
use sheetplan_ingest::{SheetSource, build_column_profiles};
use sheetplan_model::{ColumnProfile, ItemTag, SheetAnalysis, TagCorrection};

use crate::error::AnalyzeError;
use crate::tree::{AnalyzeOptions, build_tree};

/// Long-lived analysis state shared by every session.
#[derive(Debug)]
pub struct SheetAnalyzer<R, S> {
    source: R,
    memory: TagMemory,
    learner: CorrectionLearner<S>,
}

impl<R: SheetSource, S: CorrectionStore> SheetAnalyzer<R, S> {
    pub fn new(source: R, memory: TagMemory, store: S) -> Self {
        Self {
            source,
            memory,
            learner: CorrectionLearner::new(store),
        }
    }

    pub fn memory(&self) -> &TagMemory {
        &self.memory
    }

    pub fn learner(&self) -> &CorrectionLearner<S> {
        &self.learner
    }

    /// Start a session for `user`, replaying their stored corrections into
    /// a fresh predictor.
    ///
    /// # Errors
    /// A store outage surfaces as [`AnalyzeError::Hydration`]; the shared
    /// prediction layers stay intact and a later session can still succeed.
    pub fn session(&self, user: &str) -> Result<AnalysisSession<'_, R, S>, AnalyzeError> {
        let mut predictor = TagPredictor::new(self.memory.clone());
        let replayed = self
            .learner
            .hydrate(user, &mut predictor)
            .map_err(AnalyzeError::Hydration)?;
        debug!(user, replayed, "analysis session ready");
        Ok(AnalysisSession {
            analyzer: self,
            user: user.to_string(),
            predictor,
        })
    }

    /// One-shot analysis: hydrate `user`, read `sheet`, build the tree.
    pub fn analyze_sheet_tree(
        &self,
        user: &str,
        sheet: &str,
        options: &AnalyzeOptions,
    ) -> Result<SheetAnalysis, AnalyzeError> {
        self.session(user)?.analyze(sheet, options)
    }

    /// Column statistics for `sheet` over at most `max_rows` sampled rows.
    pub fn profile_columns(
        &self,
        sheet: &str,
        max_rows: usize,
    ) -> Result<Vec<ColumnProfile>, AnalyzeError> {
        let grid = self.source.read_sheet(sheet)?;
        Ok(build_column_profiles(&grid, max_rows))
    }
}

/// One user's view of the analyzer: shared layers plus their own replayed
/// corrections.
#[derive(Debug)]
pub struct AnalysisSession<'a, R, S> {
    analyzer: &'a SheetAnalyzer<R, S>,
    user: String,
    predictor: TagPredictor,
}

impl<R: SheetSource, S: CorrectionStore> AnalysisSession<'_, R, S> {
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Predict a tag for one term with this session's layered memory.
    pub fn predict(&self, term: &str) -> Prediction {
        self.predictor.predict(term)
    }

    /// Read `sheet` and build its plan tree.
    pub fn analyze(
        &self,
        sheet: &str,
        options: &AnalyzeOptions,
    ) -> Result<SheetAnalysis, AnalyzeError> {
        let grid = self.analyzer.source.read_sheet(sheet)?;
        Ok(build_tree(&grid, options, &self.predictor))
    }

    /// Correct a prediction: persist the correction, then teach this
    /// session. A store failure leaves the session's predictor unchanged.
    pub fn correct(
        &mut self,
        term: &str,
        predicted: ItemTag,
        corrected: ItemTag,
        source_file: Option<String>,
    ) -> Result<TagCorrection, AnalyzeError> {
        self.analyzer
            .learner
            .save_correction(
                &self.user,
                term,
                predicted,
                corrected,
                source_file,
                &mut self.predictor,
            )
            .map_err(AnalyzeError::Store)
    }
}
