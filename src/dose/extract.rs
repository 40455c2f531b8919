use anyhow::Result;
use regex::Regex;

use crate::models::Cell;

/// Extracts the numeric magnitude from a raw dosage cell.
///
/// Handles:
/// - plain numbers and `"<n> mg/kg"` strings
/// - the GMP sentinel in any casing → no value
/// - empty / whitespace-only / digit-free text → no value
/// - ranges like `"500-1000 mg/kg"` → first number only
pub struct ValueExtractor {
    number: Regex,
    gmp: String,
}

impl ValueExtractor {
    /// Build an extractor recognising `gmp` as the no-numeric-value sentinel.
    pub fn new(gmp: &str) -> Result<Self> {
        Ok(Self {
            number: Regex::new(r"\d+(?:\.\d+)?")?,
            gmp: gmp.to_string(),
        })
    }

    /// The first decimal number found in the cell, or `None`.
    ///
    /// Only the first digit run counts: comparison operators, units,
    /// thousands separators, and surrounding prose are ignored, and a range
    /// expression keeps its lower bound. Numeric cells are stringified and
    /// take the same path as text.
    pub fn extract(&self, cell: &Cell) -> Option<f64> {
        let text = match cell {
            Cell::Empty => return None,
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => n.to_string(),
        };

        if text.is_empty() || text.eq_ignore_ascii_case(&self.gmp) {
            return None;
        }

        self.number
            .find(&text)
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }
}
