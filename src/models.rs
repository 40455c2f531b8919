use serde::Serialize;

/// A single raw cell value as read from a source table.
///
/// Readers map their native cell types onto this; truly absent cells become
/// [`Cell::Empty`] rather than an empty string, so downstream code can tell
/// "missing" from "blank text".
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// One row of the source table, in the fixed four-column layout:
/// classification, additive code, ingredient, dosage.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub classification: Option<String>,
    pub code: Option<String>,
    pub ingredient: Option<String>,
    pub dosage: Cell,
}

impl SourceRow {
    /// True when every cell of the row is absent (readers drop these).
    pub fn is_blank(&self) -> bool {
        self.classification.is_none()
            && self.code.is_none()
            && self.ingredient.is_none()
            && self.dosage.is_empty()
    }
}

/// Aggregated output record for one (classification, code) group.
///
/// `min_dosage`/`max_dosage` are either a formatted numeric bound
/// (e.g. `"1000.0 mg/kg"`) or the GMP sentinel (`"BPF"`), always both,
/// never a mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub classification: String,
    pub code: String,
    pub ingredient: String,
    pub min_dosage: String,
    pub max_dosage: String,
}

/// A processed sheet: its name, the number of source rows read, and the
/// aggregated summary table.
#[derive(Debug, Serialize)]
pub struct SheetSummary {
    #[serde(rename = "sheet")]
    pub name: String,
    pub rows_read: usize,
    pub summary: Vec<SummaryRow>,
}

/// Why a sheet was skipped instead of summarized.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetSkip {
    /// The sheet does not expose the four expected data columns.
    WrongShape { found: usize },
    /// No data rows remain after dropping fully-empty ones.
    EmptySheet,
    /// Every row was filtered out, so the aggregation came back empty.
    NothingToAggregate,
    /// The sheet could not be read.
    Unreadable(String),
}

impl std::fmt::Display for SheetSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetSkip::WrongShape { found } => {
                write!(f, "expected 4 data columns, found {}", found)
            }
            SheetSkip::EmptySheet => write!(f, "no data rows"),
            SheetSkip::NothingToAggregate => write!(f, "no rows left to aggregate"),
            SheetSkip::Unreadable(err) => write!(f, "unreadable: {}", err),
        }
    }
}
