//! Sheet source abstraction.

use std::collections::BTreeMap;

use crate::error::IngestError;
use crate::grid::SheetGrid;

/// A provider of materialized sheets.
///
/// Implementations resolve a sheet name to a full [`SheetGrid`] in one
/// fallible call; everything downstream of the source works on the grid and
/// performs no further I/O. Hosts with their own document model adapt by
/// implementing this trait or by loading grids into a
/// [`StaticSheetSource`].
pub trait SheetSource {
    /// Materialize the named sheet.
    ///
    /// # Errors
    /// [`IngestError::SheetNotFound`] when the source has no sheet under
    /// that name, or an I/O or parse error when the backing document cannot
    /// be read. A failed read never yields a partial grid.
    fn read_sheet(&self, name: &str) -> Result<SheetGrid, IngestError>;
}

/// In-memory source holding pre-built grids, keyed by sheet name.
#[derive(Debug, Clone, Default)]
pub struct StaticSheetSource {
    sheets: BTreeMap<String, SheetGrid>,
}

impl StaticSheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, grid: SheetGrid) -> Self {
        self.insert(grid);
        self
    }

    /// Register a grid under its own name, replacing any previous sheet.
    pub fn insert(&mut self, grid: SheetGrid) {
        self.sheets.insert(grid.name.clone(), grid);
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }
}

impl SheetSource for StaticSheetSource {
    fn read_sheet(&self, name: &str) -> Result<SheetGrid, IngestError> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound(name.to_string()))
    }
}
