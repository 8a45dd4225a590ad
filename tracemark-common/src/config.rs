//! Configuration loading
//!
//! Scan settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`~/.config/tracemark/config.toml`)
//! 4. Compiled default (fallback)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Result};

/// Compiled default for the paste-dump search API.
pub const DEFAULT_PASTEBIN_BASE_URL: &str = "https://psbdmp.cc";

/// Compiled default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Environment override for the paste-dump search API base URL.
pub const ENV_PASTEBIN_BASE_URL: &str = "TRACEMARK_PASTEBIN_URL";

/// Environment override for the export directory.
pub const ENV_EXPORT_DIR: &str = "TRACEMARK_EXPORT_DIR";

/// On-disk TOML shape. Every field is optional so partial files work.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    pub pastebin_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportSection {
    pub dir: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse a config file. A missing file is not an error; defaults
    /// apply.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Default config file location for the platform.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tracemark").join("config.toml"))
    }
}

/// CLI-provided overrides (highest priority).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub pastebin_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Resolved settings for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub pastebin_base_url: String,
    pub timeout: Duration,
    pub export_dir: PathBuf,
}

impl ScanConfig {
    /// Resolve settings with priority CLI > environment > file > default.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => TomlConfig::load(path)?,
            None => match TomlConfig::default_path() {
                Some(path) => TomlConfig::load(&path)?,
                None => TomlConfig::default(),
            },
        };

        let pastebin_base_url = overrides
            .pastebin_base_url
            .clone()
            .or_else(|| std::env::var(ENV_PASTEBIN_BASE_URL).ok())
            .or_else(|| file.api.pastebin_base_url.clone())
            .unwrap_or_else(|| DEFAULT_PASTEBIN_BASE_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(file.api.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let export_dir = overrides
            .export_dir
            .clone()
            .or_else(|| std::env::var(ENV_EXPORT_DIR).ok().map(PathBuf::from))
            .or_else(|| file.export.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            pastebin_base_url,
            timeout: Duration::from_secs(timeout_secs),
            export_dir,
        })
    }
}
