use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::tag::ItemTag;

/// Which learned model a persisted correction feeds.
///
/// Stored alongside every correction so the store stays forward-compatible
/// when further models learn from user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// The semantic item-tag predictor.
    Tag,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Tag => "tag",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tag" => Ok(ModelKind::Tag),
            other => Err(ModelError::UnknownModel(other.to_string())),
        }
    }
}

/// One persisted user correction of a prediction.
///
/// Upserted by (user, term, model): correcting the same term again replaces
/// the previous row, latest wins, no history. `created_at` survives upserts;
/// `updated_at` moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCorrection {
    pub user: String,
    /// Normalized term (trimmed, case-folded) the correction applies to.
    pub term: String,
    /// What the predictor said at the time of the correction.
    pub predicted: ItemTag,
    /// What the user said it should be.
    pub corrected: ItemTag,
    pub model: ModelKind,
    /// Source document the correction was made against, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TagCorrection {
    pub fn new(
        user: impl Into<String>,
        term: impl Into<String>,
        predicted: ItemTag,
        corrected: ItemTag,
        source_file: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user: user.into(),
            term: term.into(),
            predicted,
            corrected,
            model: ModelKind::Tag,
            source_file,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_serializes_with_snake_case_discriminants() {
        let correction = TagCorrection::new(
            "ada",
            "netflix",
            ItemTag::Unknown,
            ItemTag::Recurring,
            Some("2025-budget.csv".to_string()),
        );
        let json = serde_json::to_string(&correction).expect("serialize correction");
        assert!(json.contains("\"predicted\":\"unknown\""));
        assert!(json.contains("\"corrected\":\"recurring\""));
        assert!(json.contains("\"model\":\"tag\""));
    }
}
