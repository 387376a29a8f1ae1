//! Correction persistence.
//!
//! One pretty-printed JSON file per user keeps stored corrections
//! reviewable by hand. Loads are best-effort: a row that fails to parse is
//! logged and skipped; a file that cannot be read or decoded at all is an
//! error.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use sheetplan_model::TagCorrection;

use crate::error::StoreError;

/// Keyed upsert store for user corrections.
///
/// Rows are keyed by (user, term, model): correcting the same term again
/// replaces the earlier row in place, latest wins, no history. Listing
/// order is stable, oldest first.
pub trait CorrectionStore {
    /// All stored corrections for one user, oldest first.
    fn corrections_for(&self, user: &str) -> Result<Vec<TagCorrection>, StoreError>;

    /// Insert or replace the row matching the correction's key and return
    /// the stored row. A replaced row keeps its original `created_at`.
    fn upsert(&self, correction: &TagCorrection) -> Result<TagCorrection, StoreError>;
}

/// File-per-user JSON store under a base directory.
#[derive(Debug, Clone)]
pub struct JsonCorrectionStore {
    base_dir: PathBuf,
}

impl JsonCorrectionStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::CreateDir {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Users with at least one readable stored correction.
    pub fn users(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.base_dir).map_err(|source| StoreError::Read {
            path: self.base_dir.clone(),
            source,
        })?;
        let mut users = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Read {
                path: self.base_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.load(&path) {
                Ok(rows) => {
                    if let Some(first) = rows.into_iter().next() {
                        users.insert(first.user);
                    }
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable correction file");
                }
            }
        }
        Ok(users.into_iter().collect())
    }

    fn user_path(&self, user: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_user(user)))
    }

    fn load(&self, path: &Path) -> Result<Vec<TagCorrection>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let mut corrections = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<TagCorrection>(row) {
                Ok(correction) => corrections.push(correction),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable correction row");
                }
            }
        }
        Ok(corrections)
    }

    fn save(&self, path: &Path, corrections: &[TagCorrection]) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(corrections).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, json).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CorrectionStore for JsonCorrectionStore {
    fn corrections_for(&self, user: &str) -> Result<Vec<TagCorrection>, StoreError> {
        self.load(&self.user_path(user))
    }

    fn upsert(&self, correction: &TagCorrection) -> Result<TagCorrection, StoreError> {
        let path = self.user_path(&correction.user);
        let mut corrections = self.load(&path)?;
        let mut stored = correction.clone();
        match corrections
            .iter_mut()
            .find(|c| c.term == stored.term && c.model == stored.model)
        {
            Some(existing) => {
                stored.created_at = existing.created_at;
                *existing = stored.clone();
            }
            None => corrections.push(stored.clone()),
        }
        self.save(&path, &corrections)?;
        debug!(
            user = %stored.user,
            term = %stored.term,
            corrected = %stored.corrected,
            "stored correction"
        );
        Ok(stored)
    }
}

/// Fold a user id into a safe file stem.
fn normalize_user(user: &str) -> String {
    let stem: String = user
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "default".to_string() } else { stem }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_stems_are_filesystem_safe() {
        assert_eq!(normalize_user("Ada"), "ada");
        assert_eq!(normalize_user("ada@home"), "ada_home");
        assert_eq!(normalize_user("  "), "default");
        assert_eq!(normalize_user("team-budget"), "team-budget");
    }
}
