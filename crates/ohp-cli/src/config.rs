//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <PATH>` flag
//! 2. `$OHP_CONFIG` environment variable
//! 3. `<platform config dir>/ohp/config.toml` (`~/.config/ohp` on Linux)
//! 4. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ohp_core::join::DEFAULT_PLACEHOLDER;
use ohp_core::numeric::{DEFAULT_PRECISION, MAX_PRECISION};
use ohp_core::{ColumnPolicy, JoinOptions, OhpError, OhpResult};
use ohp_csv::OutputLayout;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub join: JoinConfig,
    pub output: OutputConfig,
    pub numeric: NumericConfig,
}

/// Join defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Filler used for sentinel rows when nothing matches.
    pub placeholder: String,
    /// Prefix every output column with its source table name.
    pub prefix_columns: bool,
    /// Destination of the joined table.
    pub save_as: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// "csv" or "flattened".
    pub layout: OutputLayout,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    pub precision: u32,
}

// --- Defaults ---

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.into(),
            prefix_columns: false,
            save_as: "output/tmp.csv".into(),
        }
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Config {
    pub fn join_options(&self) -> JoinOptions {
        JoinOptions {
            placeholder: self.join.placeholder.clone(),
            columns: if self.join.prefix_columns {
                ColumnPolicy::Prefix
            } else {
                ColumnPolicy::Collapse
            },
        }
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> OhpResult<()> {
        if self.numeric.precision > MAX_PRECISION {
            return Err(OhpError::Config(format!(
                "[numeric] precision {} exceeds {MAX_PRECISION}",
                self.numeric.precision
            )));
        }
        if self.join.save_as.trim().is_empty() {
            return Err(OhpError::Config("[join] save_as is empty".into()));
        }
        Ok(())
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        // An explicitly requested file must exist.
        return read_config(p);
    }

    if let Some(p) = config_path() {
        if p.exists() {
            return read_config(&p);
        }
    }

    Ok(Config::default())
}

fn read_config(p: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
    config
        .validate()
        .with_context(|| format!("validating {}", p.display()))?;
    Ok(config)
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(p) = std::env::var("OHP_CONFIG") {
        return Some(PathBuf::from(p));
    }

    // 2. Platform config dir
    directories::ProjectDirs::from("dev", "ohp", "ohp")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Show the active config path (for `ohp config`).
pub fn show_config_path(explicit: Option<&Path>) -> String {
    if let Some(p) = explicit {
        return format!("{} (from --config)", p.display());
    }
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}
