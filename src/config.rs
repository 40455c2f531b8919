use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::summary::SummaryOptions;

/// Root configuration structure, deserialized from `.additive-digest/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output formatting knobs.
    pub format: FormatConfig,
    /// Compatibility switches for legacy data sets.
    pub compat: CompatConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Unit suffix appended to numeric dosage bounds.
    pub unit: String,
    /// Sentinel recognised on input (any casing) and emitted for groups
    /// without a numeric dosage.
    pub gmp: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            unit: "mg/kg".to_string(),
            gmp: "BPF".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Treat the literal string "None" as a missing value in the text
    /// columns, matching exports that stringify nulls before filtering.
    pub textual_nulls: bool,
}

impl Config {
    /// Aggregation options derived from this configuration.
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            unit: self.format.unit.clone(),
            gmp: self.format.gmp.clone(),
            textual_nulls: self.compat.textual_nulls,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<input_dir>/.additive-digest/config.toml`
/// 3. `~/.config/additive-digest/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(input_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let local_config = input_dir.join(".additive-digest").join("config.toml");
    if local_config.exists() {
        let content = std::fs::read_to_string(&local_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("additive-digest")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
