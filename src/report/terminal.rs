use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{SheetSkip, SheetSummary};
use crate::summary::SummaryOptions;

/// Rows shown per sheet before truncation (lifted by `--verbose`).
const ROW_LIMIT: usize = 15;

/// Render a colored terminal report.
pub fn render(
    sheets: &[SheetSummary],
    skipped: &[(String, SheetSkip)],
    path: &Path,
    opts: &SummaryOptions,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let total_rows: usize = sheets.iter().map(|s| s.rows_read).sum();
    let total_groups: usize = sheets.iter().map(|s| s.summary.len()).sum();
    let unbounded = sheets
        .iter()
        .flat_map(|s| &s.summary)
        .filter(|r| r.min_dosage == opts.gmp)
        .count();

    if quiet {
        println!(
            "Sheets: {}  Processed: {}  Skipped: {}  Groups: {}",
            sheets.len() + skipped.len(),
            sheets.len().to_string().green(),
            skipped.len().to_string().yellow(),
            total_groups,
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "additive-digest".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Source: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Sheets processed   : {}", sheets.len())
    );
    println!(
        " │  {:<48} │",
        format!("Sheets skipped     : {}", skipped.len())
    );
    println!(
        " │  {:<48} │",
        format!("Source rows        : {}", total_rows)
    );
    println!(
        " │  {:<48} │",
        format!("Summary groups     : {}", total_groups)
    );
    println!(
        " │  {:<48} │",
        format!("Unbounded ({})    : {}", opts.gmp, unbounded)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    for sheet in sheets {
        println!(
            " {} {} — {} source rows, {} groups:\n",
            "[SHEET]".cyan().bold(),
            sheet.name.bold(),
            sheet.rows_read,
            sheet.summary.len()
        );
        render_table(sheet, opts, verbose);
        println!();
    }

    if !skipped.is_empty() {
        println!(" {} Sheets skipped:\n", "[SKIP]".yellow().bold());
        for (name, reason) in skipped {
            println!("   {} {} — {}", "⚠".yellow(), name, reason);
        }
        println!();
    }

    Ok(())
}

fn render_table(sheet: &SheetSummary, opts: &SummaryOptions, verbose: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Clasificación").add_attribute(Attribute::Bold),
            Cell::new("Nº INS").add_attribute(Attribute::Bold),
            Cell::new("Ingrediente").add_attribute(Attribute::Bold),
            Cell::new("Dosis Mínima").add_attribute(Attribute::Bold),
            Cell::new("Dosis Máxima").add_attribute(Attribute::Bold),
        ]);

    let limit = if verbose {
        sheet.summary.len()
    } else {
        ROW_LIMIT
    };

    for row in sheet.summary.iter().take(limit) {
        table.add_row(vec![
            Cell::new(&row.classification),
            Cell::new(&row.code),
            Cell::new(&row.ingredient),
            dose_cell(&row.min_dosage, opts),
            dose_cell(&row.max_dosage, opts),
        ]);
    }

    println!("{}", table);

    if !verbose && sheet.summary.len() > ROW_LIMIT {
        println!(
            "   … {} more rows (use --verbose to show all)",
            sheet.summary.len() - ROW_LIMIT
        );
    }
}

fn dose_cell(dose: &str, opts: &SummaryOptions) -> Cell {
    if dose == opts.gmp {
        Cell::new(dose)
            .fg(Color::Yellow)
            .set_alignment(CellAlignment::Center)
    } else {
        Cell::new(dose).set_alignment(CellAlignment::Right)
    }
}
