//! Column statistics over sampled sheet rows.
//!
//! Profiles summarize what each column holds (numbers, formulas, text,
//! blanks) so callers can guess which columns carry category names and
//! amounts. The statistics are advisory and recomputed per call; they never
//! gate row classification.

use std::collections::BTreeSet;

use tracing::debug;

use sheetplan_model::{ColumnProfile, LayoutSuggestion};

use crate::grid::{SheetGrid, column_letter};
use crate::numeric::is_numeric;

/// Leading rows assumed to be titles or headers and skipped before counting.
pub const HEADER_GUARD_ROWS: usize = 4;

/// Profile every column of `grid` over at most `max_rows` sampled rows.
///
/// The first [`HEADER_GUARD_ROWS`] sampled rows are excluded from the
/// counts. Ratios are densities over the analyzed rows; a cell past a
/// short row's width counts as empty. With no analyzable rows every density
/// is 0.0, never NaN.
pub fn build_column_profiles(grid: &SheetGrid, max_rows: usize) -> Vec<ColumnProfile> {
    let sampled = &grid.rows[..grid.rows.len().min(max_rows)];
    let guard = sampled.len().min(HEADER_GUARD_ROWS);
    let analyzed = &sampled[guard..];
    let rows_analyzed = analyzed.len();
    let denominator = rows_analyzed.max(1) as f64;
    let width = sampled.iter().map(|r| r.cells.len()).max().unwrap_or(0);

    let mut profiles = Vec::with_capacity(width);
    for column in 0..width {
        let mut numeric = 0usize;
        let mut formula = 0usize;
        let mut empty = 0usize;
        let mut text = 0usize;
        let mut text_len = 0usize;
        let mut distinct: BTreeSet<&str> = BTreeSet::new();

        for row in analyzed {
            let Some(cell) = row.cell(column) else {
                empty += 1;
                continue;
            };
            let trimmed = cell.text.trim();
            if cell.has_formula() {
                formula += 1;
            }
            if trimmed.is_empty() {
                empty += 1;
                continue;
            }
            text_len += trimmed.len();
            distinct.insert(trimmed);
            if is_numeric(trimmed) {
                numeric += 1;
            } else if !cell.has_formula() {
                text += 1;
            }
        }

        let non_empty = rows_analyzed - empty;
        let unique_ratio = if non_empty == 0 {
            0.0
        } else {
            distinct.len() as f64 / non_empty as f64
        };
        profiles.push(ColumnProfile {
            index: column,
            letter: column_letter(column),
            numeric_ratio: numeric as f64 / denominator,
            formula_ratio: formula as f64 / denominator,
            empty_ratio: empty as f64 / denominator,
            text_ratio: text as f64 / denominator,
            unique_ratio,
            avg_text_len: text_len as f64 / denominator,
            rows_analyzed,
        });
    }
    debug!(
        sheet = %grid.name,
        columns = profiles.len(),
        rows_analyzed,
        "profiled columns"
    );
    profiles
}

/// Suggest which columns hold category names and amounts.
///
/// The text-heaviest column becomes the category; the most numeric of the
/// remaining columns becomes the value, with distinctness breaking ties.
/// Returns `None` when no column shows text or none of the others shows
/// numbers. On equal scores the lower column index wins.
pub fn suggest_layout(profiles: &[ColumnProfile]) -> Option<LayoutSuggestion> {
    let mut category: Option<&ColumnProfile> = None;
    for profile in profiles {
        if profile.text_ratio <= 0.0 {
            continue;
        }
        if category.is_none_or(|best| profile.text_ratio > best.text_ratio) {
            category = Some(profile);
        }
    }
    let category = category?;

    let mut value: Option<&ColumnProfile> = None;
    for profile in profiles {
        if profile.index == category.index || profile.numeric_ratio <= 0.0 {
            continue;
        }
        let better = value.is_none_or(|best| {
            if profile.numeric_ratio > best.numeric_ratio {
                true
            } else if profile.numeric_ratio < best.numeric_ratio {
                false
            } else {
                profile.unique_ratio > best.unique_ratio
            }
        });
        if better {
            value = Some(profile);
        }
    }
    let value = value?;

    Some(LayoutSuggestion {
        category_column: category.index,
        value_column: value.index,
    })
}
