//! CSV-backed sheet source.
//!
//! A CSV file stands in for a single spreadsheet sheet named after the file
//! stem. Cell text is kept verbatim (indentation survives) and a leading `=`
//! marks the cell as formula-backed. CSV carries no styling, so every cell
//! reads as unstyled. Separator-only lines (`,,`) survive as blank rows the
//! way spreadsheet exports produce them; fully empty lines are dropped by
//! the reader, so cell references are relative to the materialized grid.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::IngestError;
use crate::grid::{SheetCell, SheetGrid};
use crate::source::SheetSource;

/// Sheet source reading one CSV file.
#[derive(Debug, Clone)]
pub struct CsvSheetSource {
    path: PathBuf,
    sheet_name: String,
}

impl CsvSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sheet_name = path
            .file_stem()
            .map_or_else(|| "sheet".to_string(), |s| s.to_string_lossy().into_owned());
        Self { path, sheet_name }
    }

    /// Sheet name derived from the file stem.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_grid(&self) -> Result<SheetGrid, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|source| IngestError::Csv {
                path: self.path.clone(),
                source,
            })?;

        let mut grid = SheetGrid::new(self.sheet_name.clone());
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::Csv {
                path: self.path.clone(),
                source,
            })?;
            let cells = record.iter().map(cell_from_text).collect();
            grid.push_row(cells);
        }
        debug!(path = %self.path.display(), rows = grid.rows.len(), "read csv sheet");
        Ok(grid)
    }
}

impl SheetSource for CsvSheetSource {
    fn read_sheet(&self, name: &str) -> Result<SheetGrid, IngestError> {
        if name != self.sheet_name {
            return Err(IngestError::SheetNotFound(name.to_string()));
        }
        self.read_grid()
    }
}

/// Build a cell from raw CSV text. Only the byte-order mark is stripped;
/// leading spaces are meaningful downstream.
fn cell_from_text(raw: &str) -> SheetCell {
    let text = raw.trim_matches('\u{feff}');
    let cell = SheetCell::new(text);
    if text.trim_start().starts_with('=') {
        cell.with_formula(text.trim())
    } else {
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_cells_keep_their_text() {
        let cell = cell_from_text("=SUM(B2:B5)");
        assert_eq!(cell.text, "=SUM(B2:B5)");
        assert_eq!(cell.formula.as_deref(), Some("=SUM(B2:B5)"));
        assert!(cell.has_formula());
    }

    #[test]
    fn plain_cells_have_no_formula() {
        let cell = cell_from_text("  Groceries");
        assert_eq!(cell.text, "  Groceries");
        assert!(!cell.has_formula());
    }

    #[test]
    fn bom_is_stripped_without_touching_indentation() {
        let cell = cell_from_text("\u{feff}  Rent");
        assert_eq!(cell.text, "  Rent");
    }
}
