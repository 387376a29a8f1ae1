//! Materialized sheet contents.
//!
//! A [`SheetGrid`] is the fully-resolved view of one sheet: ordered rows of
//! cells, each carrying its display text, formula text (when the source had
//! one), and style. Everything downstream of ingestion works on grids and
//! performs no further I/O.

use serde::{Deserialize, Serialize};

/// Style attributes relevant to structural classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    /// Rendered with bold/emphasized styling in the source document.
    pub bold: bool,
}

impl CellStyle {
    pub fn bold() -> Self {
        Self { bold: true }
    }
}

/// One cell of a materialized sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetCell {
    /// Raw display text. Leading whitespace is preserved: indentation is a
    /// classification signal.
    pub text: String,
    /// Formula behind the cell, `None` for literal cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default)]
    pub style: CellStyle,
}

impl SheetCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formula: None,
            style: CellStyle::default(),
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn has_formula(&self) -> bool {
        self.formula.as_deref().is_some_and(|f| !f.trim().is_empty())
    }
}

/// One ordered row of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub cells: Vec<SheetCell>,
}

impl SheetRow {
    pub fn new(cells: Vec<SheetCell>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, column: usize) -> Option<&SheetCell> {
        self.cells.get(column)
    }

    /// Cell text at `column`, empty for cells past the row's width.
    pub fn text(&self, column: usize) -> &str {
        self.cells.get(column).map_or("", |c| c.text.as_str())
    }
}

/// A fully materialized sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<SheetRow>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Build a grid from plain text cells; formulas and styles default.
    pub fn from_texts<S: Into<String>>(name: impl Into<String>, rows: Vec<Vec<S>>) -> Self {
        Self {
            name: name.into(),
            rows: rows
                .into_iter()
                .map(|cells| SheetRow::new(cells.into_iter().map(SheetCell::new).collect()))
                .collect(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<SheetCell>) {
        self.rows.push(SheetRow::new(cells));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// Convert a 0-based column index to a spreadsheet letter: 0=A, 25=Z, 26=AA.
pub fn column_letter(index: usize) -> String {
    let mut letters = String::new();
    let mut n = index;
    loop {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters
}

/// Parse a column given as letters ("A", "ab") or a 0-based index ("3").
pub fn parse_column(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut index = 0usize;
    for c in trimmed.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        index = index * 26 + digit + 1;
    }
    Some(index - 1)
}

/// A1-style reference for a cell, 1-based row in the rendered form.
pub fn cell_ref(column: usize, row: usize) -> String {
    format!("{}{}", column_letter(column), row + 1)
}
