use serde::{Deserialize, Serialize};

/// Statistical profile of one sheet column over the sampled rows.
///
/// Profiles are advisory: they suggest which columns hold category names and
/// values but never gate classification. Computed fresh per call, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Zero-based column index.
    pub index: usize,
    /// Spreadsheet-style column letter ("A", "B", ..., "AA").
    pub letter: String,
    /// Fraction of analyzed rows holding a numeric-parseable value.
    pub numeric_ratio: f64,
    /// Fraction of analyzed rows whose cell carries a formula.
    pub formula_ratio: f64,
    /// Fraction of analyzed rows that are empty in this column.
    pub empty_ratio: f64,
    /// Fraction of analyzed rows holding non-numeric text.
    pub text_ratio: f64,
    /// Distinct non-empty values over non-empty cells.
    pub unique_ratio: f64,
    /// Mean trimmed text length over analyzed rows.
    pub avg_text_len: f64,
    /// Rows considered after the header guard.
    pub rows_analyzed: usize,
}

/// Advisory column assignment derived from profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSuggestion {
    /// Column most likely holding category/line names.
    pub category_column: usize,
    /// Column most likely holding amounts.
    pub value_column: usize,
}
