use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tenor_calendar::PeriodUnit;

/// Top-level Tenor configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenorConfig {
    /// Input dates.
    pub dates: DatesToml,

    /// Periods applied by `shift`.
    #[serde(default)]
    pub period: PeriodToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

/// Input dates: exactly one of `tuples` or `ordinals`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DatesToml {
    #[serde(default)]
    pub tuples: Option<Vec<(i32, u32, u32)>>,
    #[serde(default)]
    pub ordinals: Option<Vec<i32>>,
    /// Optional shape the flat input is reshaped to.
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    #[serde(default)]
    pub unit: PeriodUnit,
    #[serde(default = "default_quantities")]
    pub quantities: Vec<i32>,
}

impl Default for PeriodToml {
    fn default() -> Self {
        Self {
            unit: PeriodUnit::default(),
            quantities: default_quantities(),
        }
    }
}

fn default_quantities() -> Vec<i32> {
    vec![1]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<TenorConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
