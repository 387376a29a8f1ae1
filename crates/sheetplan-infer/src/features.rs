//! Structural signals extracted from one sheet row.

use sheetplan_ingest::parse_amount;

/// Signals the classification rules read.
///
/// Features are derived from cell text and style alone; they carry no
/// knowledge of neighboring rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFeatures {
    /// Value cell holds something other than blank or the literal "0".
    pub has_value: bool,
    /// Category cell is rendered bold.
    pub is_bold: bool,
    /// Trimmed category is longer than two characters and equals its own
    /// uppercase form.
    pub is_uppercase: bool,
    /// Leading spaces on the raw category text.
    pub indentation: usize,
    /// Row position in the sheet, 0.0 at the top.
    pub row_position: f64,
    /// Value cell is formula-backed.
    pub has_formula: bool,
    /// Absolute parsed amount, 0.0 when the value text does not parse.
    pub value_magnitude: f64,
}

/// Extract classification signals from the category and value cells of one
/// row. `category` must be the raw cell text: leading spaces are the
/// indentation signal.
pub fn extract_row_features(
    category: &str,
    value: &str,
    is_bold: bool,
    has_formula: bool,
    row_index: usize,
    total_rows: usize,
) -> RowFeatures {
    let trimmed_category = category.trim();
    let trimmed_value = value.trim();
    RowFeatures {
        has_value: !trimmed_value.is_empty() && trimmed_value != "0",
        is_bold,
        is_uppercase: trimmed_category.chars().count() > 2
            && trimmed_category == trimmed_category.to_uppercase(),
        indentation: category.chars().take_while(|c| *c == ' ').count(),
        row_position: row_index as f64 / total_rows.max(1) as f64,
        has_formula,
        value_magnitude: parse_amount(trimmed_value).map_or(0.0, f64::abs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_counts_leading_spaces_only() {
        let features = extract_row_features("  Groceries", "45.00", false, false, 5, 10);
        assert_eq!(features.indentation, 2);
        assert!(!features.is_uppercase);
        assert!(features.has_value);
        assert!((features.value_magnitude - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn uppercase_needs_more_than_two_characters() {
        assert!(extract_row_features("RENT", "", false, false, 0, 1).is_uppercase);
        assert!(extract_row_features(" FOOD ", "", false, false, 0, 1).is_uppercase);
        assert!(!extract_row_features("OK", "", false, false, 0, 1).is_uppercase);
        assert!(!extract_row_features("Rent", "", false, false, 0, 1).is_uppercase);
    }

    #[test]
    fn literal_zero_is_no_value() {
        assert!(!extract_row_features("Rent", "", false, false, 0, 1).has_value);
        assert!(!extract_row_features("Rent", " 0 ", false, false, 0, 1).has_value);
        assert!(extract_row_features("Rent", "0.00", false, false, 0, 1).has_value);
    }

    #[test]
    fn magnitude_is_absolute_and_lenient() {
        let refund = extract_row_features("Refund", "(45.00)", false, false, 0, 1);
        assert!((refund.value_magnitude - 45.0).abs() < f64::EPSILON);
        let noise = extract_row_features("Note", "see below", false, false, 0, 1);
        assert!((noise.value_magnitude - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn row_position_never_divides_by_zero() {
        let features = extract_row_features("Rent", "1", false, false, 0, 0);
        assert!((features.row_position - 0.0).abs() < f64::EPSILON);
        let halfway = extract_row_features("Rent", "1", false, false, 5, 10);
        assert!((halfway.row_position - 0.5).abs() < f64::EPSILON);
    }
}
