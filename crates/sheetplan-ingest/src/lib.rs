#![deny(unsafe_code)]

pub mod csv_source;
pub mod error;
pub mod grid;
pub mod numeric;
pub mod profile;
pub mod source;

pub use csv_source::CsvSheetSource;
pub use error::IngestError;
pub use grid::{CellStyle, SheetCell, SheetGrid, SheetRow, cell_ref, column_letter, parse_column};
pub use numeric::{is_numeric, parse_amount};
pub use profile::{HEADER_GUARD_ROWS, build_column_profiles, suggest_layout};
pub use source::{SheetSource, StaticSheetSource};
