use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "additive-digest",
    about = "Summarize food-additive dosage limits from regulatory spreadsheets",
    version
)]
pub struct Cli {
    /// Input workbook (.xlsx, .xls, .ods) or CSV file
    pub input: PathBuf,

    /// Config file [default: <input dir>/.additive-digest/config.toml, fallback ~/.config/additive-digest/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// CSV output directory; use without value to default to additive-summary
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = "additive-summary")]
    pub csv: Option<PathBuf>,

    /// Skip a sheet by name (repeatable)
    #[arg(long = "exclude-sheet", value_name = "NAME")]
    pub exclude_sheet: Vec<String>,

    /// Show every summary row (long tables are truncated otherwise)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Csv,
}
