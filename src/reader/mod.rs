//! Source-table readers.
//!
//! - [`xlsx`] — Excel and OpenDocument workbooks via `calamine`; applies the
//!   B2 data offset and per-sheet shape checks.
//! - [`csv`] — one CSV file treated as a single sheet.

use std::path::Path;

use anyhow::Result;

use crate::models::{SheetSkip, SourceRow};

pub mod csv;
pub mod xlsx;

/// One sheet as delivered by a reader: either its source rows, or the reason
/// it cannot be aggregated. Skips never abort the surrounding run.
#[derive(Debug)]
pub struct SheetTable {
    pub name: String,
    pub table: Result<Vec<SourceRow>, SheetSkip>,
}

pub trait TableReader {
    fn read(&self, path: &Path) -> Result<Vec<SheetTable>>;
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

/// Detect the input format from the file extension.
pub fn detect_format(path: &Path) -> Option<SourceFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => Some(SourceFormat::Workbook),
        "csv" => Some(SourceFormat::Csv),
        _ => None,
    }
}
