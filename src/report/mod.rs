//! Report renderers for dosage summaries.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//! - [`csv`] — one CSV file per processed sheet, named after the (truncated) sheet name.

pub mod csv;
pub mod terminal;
