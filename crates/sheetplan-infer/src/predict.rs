//! Layered term-to-tag prediction memory.
//!
//! Lookups walk three layers, most specific first: the session's own user
//! overlay, the process-wide learned overlay, then the built-in baseline
//! keyword map. Unknown terms stay [`ItemTag::Unknown`] at low confidence
//! instead of guessing.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use sheetplan_model::ItemTag;

const USER_OVERLAY_CONFIDENCE: f64 = 0.98;
const SHARED_OVERLAY_CONFIDENCE: f64 = 0.95;
const BASELINE_EXACT_CONFIDENCE: f64 = 0.85;
const BASELINE_KEYWORD_CONFIDENCE: f64 = 0.75;
const UNKNOWN_CONFIDENCE: f64 = 0.40;

/// Built-in term vocabulary, scanned in order for substring matches.
/// Specific phrases sit before the general words they contain.
const BASELINE_KEYWORDS: &[(&str, ItemTag)] = &[
    ("salary", ItemTag::Income),
    ("paycheck", ItemTag::Income),
    ("payroll", ItemTag::Income),
    ("wages", ItemTag::Income),
    ("bonus", ItemTag::Income),
    ("freelance", ItemTag::Income),
    ("dividend", ItemTag::Income),
    ("income", ItemTag::Income),
    ("emergency fund", ItemTag::Savings),
    ("retirement", ItemTag::Savings),
    ("pension", ItemTag::Savings),
    ("investment", ItemTag::Savings),
    ("savings", ItemTag::Savings),
    ("student loan", ItemTag::Debt),
    ("car payment", ItemTag::Debt),
    ("credit card", ItemTag::Debt),
    ("mortgage", ItemTag::Debt),
    ("loan", ItemTag::Debt),
    ("debt", ItemTag::Debt),
    ("rent", ItemTag::Recurring),
    ("insurance", ItemTag::Recurring),
    ("subscription", ItemTag::Recurring),
    ("membership", ItemTag::Recurring),
    ("utilities", ItemTag::Recurring),
    ("electricity", ItemTag::Recurring),
    ("internet", ItemTag::Recurring),
    ("phone", ItemTag::Recurring),
    ("water", ItemTag::Recurring),
    ("gym", ItemTag::Recurring),
    ("groceries", ItemTag::Budget),
    ("grocery", ItemTag::Budget),
    ("dining", ItemTag::Budget),
    ("restaurant", ItemTag::Budget),
    ("takeout", ItemTag::Budget),
    ("fuel", ItemTag::Budget),
    ("transport", ItemTag::Budget),
    ("parking", ItemTag::Budget),
    ("entertainment", ItemTag::Budget),
    ("clothing", ItemTag::Budget),
    ("household", ItemTag::Budget),
    ("pharmacy", ItemTag::Budget),
];

/// Normalize a term for memory keys: trim, case-fold, collapse inner
/// whitespace to single spaces.
pub fn normalize_term(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Which layer produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionSource {
    /// The asking user corrected this exact term before.
    UserOverlay,
    /// The process-wide learned overlay knows the term.
    SharedOverlay,
    /// Exact hit in the built-in vocabulary.
    BaselineExact,
    /// The term contains a built-in keyword.
    BaselineKeyword,
    /// No layer recognized the term.
    Unknown,
}

/// One tag prediction for a term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub tag: ItemTag,
    pub confidence: f64,
    pub source: PredictionSource,
}

impl Prediction {
    /// The low-confidence answer for unrecognized terms.
    pub fn unknown() -> Self {
        Self {
            tag: ItemTag::Unknown,
            confidence: UNKNOWN_CONFIDENCE,
            source: PredictionSource::Unknown,
        }
    }
}

/// Shared layers of the predictor: the immutable baseline plus the learned
/// overlay. Cloning hands out another handle to the same overlay.
#[derive(Debug, Clone)]
pub struct TagMemory {
    baseline: Arc<BTreeMap<&'static str, ItemTag>>,
    shared: Arc<RwLock<BTreeMap<String, ItemTag>>>,
}

impl Default for TagMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl TagMemory {
    pub fn new() -> Self {
        Self {
            baseline: Arc::new(BASELINE_KEYWORDS.iter().copied().collect()),
            shared: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Teach the shared overlay one term, overwriting any previous tag.
    pub fn learn_shared(&self, term: &str, tag: ItemTag) {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            return;
        }
        if let Ok(mut shared) = self.shared.write() {
            shared.insert(normalized, tag);
        }
    }

    /// Teach the shared overlay a batch under one write lock: readers see
    /// either none of the batch or all of it.
    pub fn learn_shared_batch(&self, corrections: &[(String, ItemTag)]) {
        if corrections.is_empty() {
            return;
        }
        if let Ok(mut shared) = self.shared.write() {
            for (term, tag) in corrections {
                let normalized = normalize_term(term);
                if normalized.is_empty() {
                    continue;
                }
                shared.insert(normalized, *tag);
            }
            debug!(learned = corrections.len(), "applied shared correction batch");
        }
    }

    /// Terms currently in the shared overlay.
    pub fn shared_terms(&self) -> usize {
        self.shared.read().map(|shared| shared.len()).unwrap_or(0)
    }

    fn shared_tag(&self, normalized: &str) -> Option<ItemTag> {
        self.shared
            .read()
            .ok()
            .and_then(|shared| shared.get(normalized).copied())
    }

    fn baseline_prediction(&self, normalized: &str) -> Option<Prediction> {
        if let Some(tag) = self.baseline.get(normalized) {
            return Some(Prediction {
                tag: *tag,
                confidence: BASELINE_EXACT_CONFIDENCE,
                source: PredictionSource::BaselineExact,
            });
        }
        for (keyword, tag) in BASELINE_KEYWORDS {
            if normalized.contains(keyword) {
                return Some(Prediction {
                    tag: *tag,
                    confidence: BASELINE_KEYWORD_CONFIDENCE,
                    source: PredictionSource::BaselineKeyword,
                });
            }
        }
        None
    }
}

/// Per-session predictor: one user's overlay on top of [`TagMemory`].
#[derive(Debug, Clone)]
pub struct TagPredictor {
    memory: TagMemory,
    user_overlay: BTreeMap<String, ItemTag>,
}

impl TagPredictor {
    pub fn new(memory: TagMemory) -> Self {
        Self {
            memory,
            user_overlay: BTreeMap::new(),
        }
    }

    /// Predict a tag for `term`, most specific layer first. Repeated calls
    /// with the same term and unchanged layers return the same answer.
    pub fn predict(&self, term: &str) -> Prediction {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            return Prediction::unknown();
        }
        if let Some(tag) = self.user_overlay.get(&normalized) {
            return Prediction {
                tag: *tag,
                confidence: USER_OVERLAY_CONFIDENCE,
                source: PredictionSource::UserOverlay,
            };
        }
        if let Some(tag) = self.memory.shared_tag(&normalized) {
            return Prediction {
                tag,
                confidence: SHARED_OVERLAY_CONFIDENCE,
                source: PredictionSource::SharedOverlay,
            };
        }
        self.memory
            .baseline_prediction(&normalized)
            .unwrap_or_else(Prediction::unknown)
    }

    /// Teach the session's user overlay one term.
    pub fn learn_user(&mut self, term: &str, tag: ItemTag) {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            return;
        }
        self.user_overlay.insert(normalized, tag);
    }

    /// Replay stored corrections into the user overlay.
    pub fn learn_user_batch(&mut self, corrections: &[(String, ItemTag)]) {
        for (term, tag) in corrections {
            self.learn_user(term, *tag);
        }
    }

    /// Terms the session has learned from this user.
    pub fn learned_terms(&self) -> usize {
        self.user_overlay.len()
    }

    pub fn memory(&self) -> &TagMemory {
        &self.memory
    }
}
