//! `additive-digest` — summarize food-additive dosage limits from regulatory
//! spreadsheets.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load configuration ([`config::load_config`]).
//! 3. Detect the input format ([`reader::detect_format`]).
//! 4. Read one table per sheet ([`reader`]).
//! 5. Aggregate each sheet independently ([`summary::summarize`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0` (at least one sheet summarized) or `1` (no usable sheets).

mod cli;
mod config;
mod dose;
mod models;
mod reader;
mod report;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, ReportFormat};
use config::load_config;
use models::{SheetSkip, SheetSummary};
use reader::{SourceFormat, TableReader};
use summary::summarize;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve input path
    let path = cli
        .input
        .canonicalize()
        .unwrap_or_else(|_| cli.input.clone());

    // Load configuration from beside the input (or the explicit override)
    let input_dir = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(&input_dir, cli.config.as_deref())?;

    let format = match reader::detect_format(&path) {
        Some(format) => format,
        None => {
            eprintln!("Unsupported input format: {}", path.display());
            std::process::exit(1);
        }
    };

    let tables = match format {
        SourceFormat::Workbook => reader::xlsx::WorkbookReader::new().read(&path)?,
        SourceFormat::Csv => reader::csv::CsvReader::new().read(&path)?,
    };

    let tables: Vec<_> = tables
        .into_iter()
        .filter(|t| !cli.exclude_sheet.contains(&t.name))
        .collect();

    let opts = config.summary_options();

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(tables.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Aggregate each sheet independently; one failing sheet never aborts the rest
    let mut processed: Vec<SheetSummary> = Vec::new();
    let mut skipped: Vec<(String, SheetSkip)> = Vec::new();

    for sheet in tables {
        match sheet.table {
            Ok(rows) => match summarize(&rows, &opts) {
                Ok(summary) if summary.is_empty() => {
                    skipped.push((sheet.name, SheetSkip::NothingToAggregate));
                }
                Ok(summary) => {
                    if let Some(pb) = &pb {
                        pb.println(format!(
                            "  {} {} {} groups",
                            "→".cyan(),
                            sheet.name,
                            summary.len()
                        ));
                    }
                    processed.push(SheetSummary {
                        name: sheet.name,
                        rows_read: rows.len(),
                        summary,
                    });
                }
                Err(e) => skipped.push((sheet.name, SheetSkip::Unreadable(e.to_string()))),
            },
            Err(skip) => skipped.push((sheet.name, skip)),
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if processed.is_empty() {
        eprintln!("No processable sheets found in {}", path.display());
        for (name, reason) in &skipped {
            eprintln!("  {} {} — {}", "⚠".yellow(), name, reason);
        }
        std::process::exit(1);
    }

    // Resolve effective report format: --csv implies CSV output
    let report_format = match &cli.csv {
        Some(_) => ReportFormat::Csv,
        None => cli.report,
    };
    let csv_dir = cli
        .csv
        .unwrap_or_else(|| PathBuf::from("additive-summary"));

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&processed, &skipped, &path, &opts, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&processed)?);
        }
        ReportFormat::Csv => {
            report::csv::render(&processed, &csv_dir)?;
        }
    }

    Ok(())
}
