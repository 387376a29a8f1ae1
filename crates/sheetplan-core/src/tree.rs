//! Two-level plan tree assembly.
//!
//! The walk visits rows top to bottom, keeps at most one group open, and
//! attaches classified items to it. Items arriving before any header are
//! adopted by a synthetic fallback group so the walk always produces a
//! well-formed tree.

use tracing::{debug, info};

use sheetplan_infer::{TagPredictor, classify_row, extract_row_features};
use sheetplan_ingest::{SheetCell, SheetGrid, cell_ref, parse_amount};
use sheetplan_model::{LayoutSuggestion, NodeKind, PlanNode, SheetAnalysis};

/// Name of the group that adopts items appearing before any header.
pub const FALLBACK_GROUP_NAME: &str = "Imported Items";
const FALLBACK_GROUP_CONFIDENCE: f64 = 0.5;

/// Where in the grid the walk reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Zero-based column holding category names.
    pub category_column: usize,
    /// Zero-based column holding amounts.
    pub value_column: usize,
    /// First row of the walk; rows above are never visited.
    pub start_row: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            category_column: 0,
            value_column: 1,
            start_row: 0,
        }
    }
}

impl From<LayoutSuggestion> for AnalyzeOptions {
    fn from(layout: LayoutSuggestion) -> Self {
        Self {
            category_column: layout.category_column,
            value_column: layout.value_column,
            start_row: 0,
        }
    }
}

/// Build the plan tree for one materialized sheet.
///
/// Rows with a blank category cell are skipped; every other row is
/// classified and lands in the tree or is dropped as ignored. The result is
/// always a well-formed analysis, possibly with zero nodes.
pub fn build_tree(
    grid: &SheetGrid,
    options: &AnalyzeOptions,
    predictor: &TagPredictor,
) -> SheetAnalysis {
    let total_rows = grid.rows.len();
    let mut groups: Vec<PlanNode> = Vec::new();
    let mut open_group: Option<PlanNode> = None;

    for (row_index, row) in grid.rows.iter().enumerate().skip(options.start_row) {
        let category_cell = row.cell(options.category_column);
        let category = category_cell.map_or("", |cell| cell.text.as_str());
        if category.trim().is_empty() {
            continue;
        }
        let value_cell = row.cell(options.value_column);
        let value_text = value_cell.map_or("", |cell| cell.text.as_str());
        let is_bold = category_cell.is_some_and(|cell| cell.style.bold);
        let has_formula = value_cell.is_some_and(SheetCell::has_formula);

        let features = extract_row_features(
            category,
            value_text,
            is_bold,
            has_formula,
            row_index,
            total_rows,
        );
        let verdict = classify_row(&features, category);
        let name = category.trim();
        let value = parse_amount(value_text).unwrap_or(0.0);
        let source_ref = cell_ref(options.category_column, row_index);

        match verdict.kind {
            NodeKind::Group => {
                if let Some(done) = open_group.take() {
                    groups.push(done);
                }
                debug!(row = row_index, group = name, rule = ?verdict.rule, "opened group");
                open_group = Some(PlanNode::group(name, value, verdict.confidence, source_ref));
            }
            NodeKind::Item => {
                let prediction = predictor.predict(name);
                let confidence = (verdict.confidence + prediction.confidence) / 2.0;
                let formula = value_cell.and_then(|cell| cell.formula.clone());
                let item =
                    PlanNode::item(name, value, prediction.tag, confidence, source_ref, formula);
                open_group
                    .get_or_insert_with(fallback_group)
                    .children
                    .push(item);
            }
            NodeKind::Ignore => {
                debug!(row = row_index, "dropped unclassifiable row");
            }
        }
    }
    if let Some(done) = open_group.take() {
        groups.push(done);
    }

    let analysis = assemble_analysis(grid.name.clone(), groups);
    info!(
        sheet = %analysis.sheet_name,
        groups = analysis.total_groups,
        items = analysis.total_items,
        confidence = analysis.overall_confidence,
        review = analysis.items_needing_review,
        "built plan tree"
    );
    analysis
}

/// Aggregate finished root groups into a [`SheetAnalysis`].
///
/// Overall confidence is the mean over every node, groups and items alike;
/// the review counters cover items only. An empty tree reports 0.0, never
/// NaN.
pub fn assemble_analysis(sheet_name: String, nodes: Vec<PlanNode>) -> SheetAnalysis {
    let total_groups = nodes.len();
    let total_items: usize = nodes.iter().map(|group| group.children.len()).sum();
    let mut confidence_sum = 0.0;
    let mut items_needing_review = 0usize;
    for group in &nodes {
        confidence_sum += group.confidence;
        for item in &group.children {
            confidence_sum += item.confidence;
            if item.needs_review {
                items_needing_review += 1;
            }
        }
    }
    let node_count = total_groups + total_items;
    let overall_confidence = if node_count == 0 {
        0.0
    } else {
        confidence_sum / node_count as f64
    };
    SheetAnalysis {
        sheet_name,
        nodes,
        total_groups,
        total_items,
        overall_confidence,
        items_needing_review,
        auto_approved_items: total_items - items_needing_review,
    }
}

fn fallback_group() -> PlanNode {
    let mut group = PlanNode::group(FALLBACK_GROUP_NAME, 0.0, FALLBACK_GROUP_CONFIDENCE, "");
    // Adopted items get a human look regardless of the threshold.
    group.needs_review = true;
    group
}
