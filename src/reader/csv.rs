use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::models::{Cell, SheetSkip, SourceRow};

use super::{SheetTable, TableReader};

/// Reader treating one CSV file as a single four-column sheet, named after
/// the file stem.
///
/// The first record is the header and must carry exactly four fields; data
/// records map positionally onto classification, code, ingredient, dosage.
pub struct CsvReader;

impl CsvReader {
    pub fn new() -> Self {
        Self
    }
}

impl TableReader for CsvReader {
    fn read(&self, path: &Path) -> Result<Vec<SheetTable>> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let table = file_rows(&mut reader);
        Ok(vec![SheetTable { name, table }])
    }
}

fn file_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<SourceRow>, SheetSkip> {
    let headers = reader
        .headers()
        .map_err(|e| SheetSkip::Unreadable(e.to_string()))?;
    if headers.len() != 4 {
        return Err(SheetSkip::WrongShape {
            found: headers.len(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SheetSkip::Unreadable(e.to_string()))?;
        let row = SourceRow {
            classification: field(&record, 0),
            code: field(&record, 1),
            ingredient: field(&record, 2),
            dosage: match field(&record, 3) {
                Some(text) => Cell::Text(text),
                None => Cell::Empty,
            },
        };
        if !row.is_blank() {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(SheetSkip::EmptySheet);
    }

    Ok(rows)
}

/// A positional field, with empty text counting as missing.
fn field(record: &StringRecord, idx: usize) -> Option<String> {
    match record.get(idx) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => None,
    }
}
