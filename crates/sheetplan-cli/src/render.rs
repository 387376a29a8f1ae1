//! Terminal rendering for analyses, column profiles and corrections.
//!
//! The outline renderer is plain text and deterministic for a given tree;
//! node ids are deliberately left out so repeated runs compare clean. The
//! table builders return [`Table`] values so tests can inspect them without
//! capturing stdout.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheetplan_ingest::column_letter;
use sheetplan_model::{
    ColumnProfile, ItemTag, LayoutSuggestion, PlanNode, SheetAnalysis, TagCorrection,
};

/// Render the plan tree as an indented outline.
pub fn render_outline(analysis: &SheetAnalysis) -> String {
    let mut lines = Vec::new();
    for group in &analysis.nodes {
        lines.push(group_line(group));
        for item in &group.children {
            lines.push(item_line(item));
        }
    }
    lines.join("\n")
}

fn group_line(group: &PlanNode) -> String {
    let mut line = format!("{}  [{:.2}]", group.name, group.confidence);
    if group.needs_review {
        line.push_str("  (review)");
    }
    line
}

fn item_line(item: &PlanNode) -> String {
    let mut line = format!(
        "  {}  {:.2}  {}  [{:.2}]",
        item.name, item.value, item.tag, item.confidence
    );
    if let Some(formula) = &item.formula {
        line.push_str("  ");
        line.push_str(formula);
    }
    if item.needs_review {
        line.push_str("  (review)");
    }
    line
}

/// Print the outline plus the per-group summary table.
pub fn print_analysis(analysis: &SheetAnalysis) {
    println!("Sheet: {}", analysis.sheet_name);
    let outline = render_outline(analysis);
    if outline.is_empty() {
        println!("(no rows classified)");
        return;
    }
    println!();
    println!("{outline}");
    println!();
    println!("{}", summary_table(analysis));
}

/// Per-group rollup with a TOTAL row.
pub fn summary_table(analysis: &SheetAnalysis) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Items"),
        header_cell("Total"),
        header_cell("Review"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in &analysis.nodes {
        let total: f64 = group.children.iter().map(|item| item.value).sum();
        let review = group
            .children
            .iter()
            .filter(|item| item.needs_review)
            .count();
        table.add_row(vec![
            group_cell(&group.name, group.needs_review),
            Cell::new(group.children.len()),
            Cell::new(format!("{total:.2}")),
            count_cell(review, Color::Yellow),
            Cell::new(format!("{:.2}", group.confidence)),
        ]);
    }
    let total_value: f64 = analysis.items().iter().map(|item| item.value).sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(analysis.total_items).add_attribute(Attribute::Bold),
        Cell::new(format!("{total_value:.2}")).add_attribute(Attribute::Bold),
        count_cell(analysis.items_needing_review, Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", analysis.overall_confidence)).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Column statistics, one row per profiled column.
pub fn profile_table(profiles: &[ColumnProfile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Numeric"),
        header_cell("Text"),
        header_cell("Empty"),
        header_cell("Formula"),
        header_cell("Unique"),
        header_cell("Avg len"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in profiles {
        table.add_row(vec![
            Cell::new(&profile.letter)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            percent_cell(profile.numeric_ratio),
            percent_cell(profile.text_ratio),
            percent_cell(profile.empty_ratio),
            percent_cell(profile.formula_ratio),
            percent_cell(profile.unique_ratio),
            Cell::new(format!("{:.1}", profile.avg_text_len)),
            Cell::new(profile.rows_analyzed),
        ]);
    }
    table
}

pub fn print_profiles(profiles: &[ColumnProfile], layout: Option<LayoutSuggestion>) {
    println!("{}", profile_table(profiles));
    match layout {
        Some(layout) => println!(
            "Suggested layout: category column {}, value column {}",
            column_letter(layout.category_column),
            column_letter(layout.value_column)
        ),
        None => println!("Suggested layout: none (not enough populated columns)"),
    }
}

/// Stored corrections, oldest first within each user.
pub fn corrections_table(corrections: &[TagCorrection]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("User"),
        header_cell("Term"),
        header_cell("Predicted"),
        header_cell("Corrected"),
        header_cell("Source"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    for correction in corrections {
        table.add_row(vec![
            Cell::new(&correction.user),
            Cell::new(&correction.term).add_attribute(Attribute::Bold),
            tag_cell(correction.predicted),
            tag_cell(correction.corrected),
            match &correction.source_file {
                Some(path) => Cell::new(path),
                None => dim_cell("-"),
            },
            Cell::new(correction.updated_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }
    table
}

pub fn print_corrections(corrections: &[TagCorrection]) {
    println!("{}", corrections_table(corrections));
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(name: &str, needs_review: bool) -> Cell {
    if needs_review {
        Cell::new(name).fg(Color::Yellow)
    } else {
        Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
    }
}

fn tag_cell(tag: ItemTag) -> Cell {
    let cell = Cell::new(tag.as_str());
    match tag {
        ItemTag::Income => cell.fg(Color::Green),
        ItemTag::Debt => cell.fg(Color::Red),
        ItemTag::Savings => cell.fg(Color::Cyan),
        ItemTag::Recurring => cell.fg(Color::Blue),
        ItemTag::Budget => cell,
        ItemTag::Unknown => cell.fg(Color::DarkGrey),
    }
}

fn percent_cell(ratio: f64) -> Cell {
    if ratio > 0.0 {
        Cell::new(format!("{:.0}%", ratio * 100.0))
    } else {
        dim_cell("0%")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
