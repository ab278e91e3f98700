//! Runtime configuration
//!
//! Only operational settings live here (where to write, what to call the
//! file, which input sheet to read). Business thresholds are fixed in code.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding `output_dir`
pub const OUTPUT_DIR_ENV: &str = "ROUTE_MONITOR_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory report files are written to
    pub output_dir: PathBuf,
    /// File name prefix, followed by the run timestamp
    pub file_prefix: String,
    /// Worksheet to read from spreadsheet inputs (first sheet when unset)
    pub input_sheet: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: "RouteMonitor".to_string(),
            input_sheet: None,
        }
    }
}

impl Config {
    /// Default config file location: `<config dir>/route-monitor/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("route-monitor").join("config.toml"))
    }

    /// Load configuration from `path` (or the default location), then apply
    /// environment overrides. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(ref p) if p.exists() => Self::from_file(p)?,
            Some(ref p) => {
                log::debug!("No config file at {}, using defaults", p.display());
                Self::default()
            }
            None => Self::default(),
        };

        if let Ok(dir) = env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                log::debug!("{} overrides output_dir: {}", OUTPUT_DIR_ENV, dir);
                config.output_dir = PathBuf::from(dir);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
