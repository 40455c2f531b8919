use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::models::SheetSummary;

/// Spreadsheet tools cap sheet names at 31 characters; exported file names
/// keep the same bound so a sheet can round-trip into a workbook.
const SHEET_NAME_LIMIT: usize = 31;

/// Column titles of the published summary layout.
const HEADER: [&str; 5] = [
    "Clasificación",
    "Nº INS",
    "Ingrediente",
    "Dosis Mínima",
    "Dosis Máxima",
];

/// Write one CSV file per processed sheet into `out_dir`.
pub fn render(sheets: &[SheetSummary], out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for sheet in sheets {
        let file = out_dir.join(format!("{}.csv", export_name(&sheet.name)));
        write_sheet(sheet, &file)?;
    }

    println!("CSV summaries written to: {}", out_dir.display());
    Ok(())
}

fn write_sheet(sheet: &SheetSummary, file: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    writer.write_record(HEADER)?;
    for row in &sheet.summary {
        writer.write_record([
            row.classification.as_str(),
            row.code.as_str(),
            row.ingredient.as_str(),
            row.min_dosage.as_str(),
            row.max_dosage.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Sheet name as an export file stem: truncated to the sheet-name limit and
/// stripped of path separators.
fn export_name(sheet: &str) -> String {
    sheet
        .chars()
        .take(SHEET_NAME_LIMIT)
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}
