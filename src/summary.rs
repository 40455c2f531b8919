use std::collections::BTreeMap;

use anyhow::Result;

use crate::dose::extract::ValueExtractor;
use crate::dose::format::format_dose;
use crate::models::{SourceRow, SummaryRow};

/// Knobs for the aggregation pass.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Unit suffix appended to numeric dosage bounds.
    pub unit: String,
    /// Sentinel recognised on input (any casing) and emitted when a group
    /// has no numeric dosage at all.
    pub gmp: String,
    /// Treat the literal string "None" as a missing value, for data sets
    /// exported by tools that stringify nulls before filtering.
    pub textual_nulls: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            unit: "mg/kg".to_string(),
            gmp: "BPF".to_string(),
            textual_nulls: false,
        }
    }
}

/// Reduce a source table to one summary row per (classification, code) group.
///
/// Key columns are trimmed (internal whitespace is significant); rows with a
/// missing classification or code are dropped. Each group keeps the first
/// non-empty ingredient in input order, and its dosage cells collapse to a
/// min/max pair, or to the GMP sentinel when no cell yields a number.
/// Output is ordered ascending by classification, then code. An empty input
/// yields an empty output. Pure transform: no state survives the call.
pub fn summarize(rows: &[SourceRow], opts: &SummaryOptions) -> Result<Vec<SummaryRow>> {
    let extractor = ValueExtractor::new(&opts.gmp)?;

    struct Group {
        ingredient: Option<String>,
        bounds: Option<(f64, f64)>,
    }

    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();

    for row in rows {
        let classification = match key_text(row.classification.as_deref(), opts) {
            Some(text) => text,
            None => continue,
        };
        let code = match key_text(row.code.as_deref(), opts) {
            Some(text) => text,
            None => continue,
        };

        let group = groups
            .entry((classification.to_string(), code.to_string()))
            .or_insert_with(|| Group {
                ingredient: None,
                bounds: None,
            });

        if group.ingredient.is_none() {
            if let Some(ingredient) = key_text(row.ingredient.as_deref(), opts) {
                group.ingredient = Some(ingredient.to_string());
            }
        }

        if let Some(value) = extractor.extract(&row.dosage) {
            group.bounds = Some(match group.bounds {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
    }

    let summary = groups
        .into_iter()
        .map(|((classification, code), group)| {
            let (min_dosage, max_dosage) = match group.bounds {
                Some((lo, hi)) => (format_dose(lo, &opts.unit), format_dose(hi, &opts.unit)),
                None => (opts.gmp.clone(), opts.gmp.clone()),
            };
            SummaryRow {
                classification,
                code,
                ingredient: group.ingredient.unwrap_or_default(),
                min_dosage,
                max_dosage,
            }
        })
        .collect();

    Ok(summary)
}

/// Trimmed text of a key column, or `None` when the column counts as missing.
fn key_text<'a>(raw: Option<&'a str>, opts: &SummaryOptions) -> Option<&'a str> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || (opts.textual_nulls && trimmed == "None") {
        return None;
    }
    Some(trimmed)
}
