use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::models::{Cell, SheetSkip, SourceRow};

use super::{SheetTable, TableReader};

/// First spreadsheet row holding data, 0-based. Absolute row 1 carries the
/// column titles (the B2 convention: spreadsheet row 1 and column A are
/// reserved for unrelated labels).
const DATA_START_ROW: u32 = 2;
/// First spreadsheet column holding data, 0-based (column B).
const DATA_START_COL: u32 = 1;
/// Number of data columns a sheet must expose (columns B through E).
const DATA_COLS: u32 = 4;

/// Reader for Excel (`.xlsx`, `.xlsm`, `.xls`) and OpenDocument workbooks.
///
/// Every sheet yields an independent table; a sheet that cannot be read or
/// does not match the fixed layout becomes a skip entry instead of an error.
pub struct WorkbookReader;

impl WorkbookReader {
    pub fn new() -> Self {
        Self
    }
}

impl TableReader for WorkbookReader {
    fn read(&self, path: &Path) -> Result<Vec<SheetTable>> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook {}", path.display()))?;

        let names = workbook.sheet_names().to_owned();
        let mut sheets = Vec::new();

        for name in names {
            let table = match workbook.worksheet_range(&name) {
                Ok(range) => sheet_rows(&range),
                Err(e) => Err(SheetSkip::Unreadable(e.to_string())),
            };
            sheets.push(SheetTable { name, table });
        }

        Ok(sheets)
    }
}

/// Extract the fixed-layout table from one worksheet range.
///
/// Fully-empty rows are dropped; columns beyond E are ignored.
fn sheet_rows(range: &Range<Data>) -> Result<Vec<SourceRow>, SheetSkip> {
    let end = match range.end() {
        Some(end) => end,
        None => return Err(SheetSkip::EmptySheet),
    };

    // The used range must reach column E to expose all four data columns
    let last_col = end.1;
    if last_col < DATA_START_COL + DATA_COLS - 1 {
        return Err(SheetSkip::WrongShape {
            found: (last_col + 1).saturating_sub(DATA_START_COL) as usize,
        });
    }

    if end.0 < DATA_START_ROW {
        return Err(SheetSkip::EmptySheet);
    }

    let mut rows = Vec::new();
    for r in DATA_START_ROW..=end.0 {
        let row = SourceRow {
            classification: key_cell(range.get_value((r, DATA_START_COL))),
            code: key_cell(range.get_value((r, DATA_START_COL + 1))),
            ingredient: key_cell(range.get_value((r, DATA_START_COL + 2))),
            dosage: dose_cell(range.get_value((r, DATA_START_COL + 3))),
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

/// Text of a key-column cell; empty and error cells count as missing.
fn key_cell(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The dosage cell keeps its scalar type so numeric cells stay numeric.
fn dose_cell(cell: Option<&Data>) -> Cell {
    match cell {
        None | Some(Data::Empty) | Some(Data::Error(_)) => Cell::Empty,
        Some(Data::String(s)) => Cell::Text(s.clone()),
        Some(Data::Float(f)) => Cell::Number(*f),
        Some(Data::Int(i)) => Cell::Number(*i as f64),
        Some(other) => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(end: (u32, u32), cells: &[((u32, u32), Data)]) -> Range<Data> {
        let mut range = Range::new((0, 0), end);
        for (pos, value) in cells {
            range.set_value(*pos, value.clone());
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_reads_from_b2_offset() {
        let range = range(
            (4, 4),
            &[
                // Row 0 / column A carry unrelated labels
                ((0, 0), s("Anexo II")),
                ((1, 1), s("Clasificación")),
                ((1, 2), s("Nº INS")),
                ((1, 3), s("Ingrediente")),
                ((1, 4), s("Dosis máxima")),
                ((2, 1), s("Conservante")),
                ((2, 2), s("200")),
                ((2, 3), s("Ácido sórbico")),
                ((2, 4), s("1000 mg/kg")),
                ((4, 1), s("Colorante")),
                ((4, 2), Data::Float(100.0)),
                ((4, 3), s("Curcumina")),
                ((4, 4), Data::Float(150.0)),
            ],
        );

        let rows = sheet_rows(&range).unwrap();
        // Absolute row 3 is fully empty and drops out
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].classification.as_deref(), Some("Conservante"));
        assert_eq!(rows[0].dosage, Cell::Text("1000 mg/kg".to_string()));
        // Numeric cells keep their type; integral floats stringify clean
        assert_eq!(rows[1].code.as_deref(), Some("100"));
        assert_eq!(rows[1].dosage, Cell::Number(150.0));
    }

    #[test]
    fn test_narrow_sheet_is_wrong_shape() {
        let range = range((3, 2), &[((2, 1), s("Conservante")), ((2, 2), s("200"))]);
        assert_eq!(sheet_rows(&range), Err(SheetSkip::WrongShape { found: 2 }));
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let range = range(
            (1, 4),
            &[((1, 1), s("Clasificación")), ((1, 4), s("Dosis máxima"))],
        );
        assert_eq!(sheet_rows(&range), Err(SheetSkip::EmptySheet));
    }

    #[test]
    fn test_all_blank_data_rows_are_empty() {
        let range = range((5, 4), &[((1, 1), s("Clasificación"))]);
        assert_eq!(sheet_rows(&range), Err(SheetSkip::EmptySheet));
    }

    #[test]
    fn test_error_cells_count_as_missing() {
        let range = range(
            (2, 4),
            &[
                ((2, 1), s("Conservante")),
                ((2, 2), s("200")),
                ((2, 3), Data::Error(calamine::CellErrorType::Div0)),
                ((2, 4), Data::Error(calamine::CellErrorType::Value)),
            ],
        );
        let rows = sheet_rows(&range).unwrap();
        assert_eq!(rows[0].ingredient, None);
        assert_eq!(rows[0].dosage, Cell::Empty);
    }
}
