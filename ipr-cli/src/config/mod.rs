//! Application configuration
//!
//! Settings are read from `<config_dir>/kle-ipr/config.toml` when it exists,
//! then overridden by environment variables (a `.env` file is honoured), and
//! finally by command-line flags.

pub mod repository;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "kle-ipr";

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "ipr.db";

pub const ENV_DATABASE: &str = "IPR_DATABASE";
pub const ENV_DEFAULT_WORKBOOK: &str = "IPR_DEFAULT_WORKBOOK";
pub const ENV_EXPORT_DIR: &str = "IPR_EXPORT_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Bundled workbook used by `import --default` and `init`
    pub default_workbook: PathBuf,
    /// Directory exports are written to
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            database_path: data_dir.join(DATABASE_FILE),
            default_workbook: PathBuf::from("data").join("KLE-IPR.xlsx"),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from the default location plus environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML; missing keys fall back to defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty(ENV_DATABASE) {
            self.database_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(ENV_DEFAULT_WORKBOOK) {
            self.default_workbook = PathBuf::from(v);
        }
        if let Some(v) = non_empty(ENV_EXPORT_DIR) {
            self.export_dir = PathBuf::from(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(r#"export_dir = "/tmp/exports""#).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.default_workbook, Config::default().default_workbook);
        assert_eq!(config.database_path, Config::default().database_path);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("database_path = [").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_DATABASE, "/var/lib/ipr/ipr.db"),
            (ENV_EXPORT_DIR, "  "),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_path, PathBuf::from("/var/lib/ipr/ipr.db"));
        // Blank values are ignored
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_workbook = \"seed.xlsx\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_workbook, PathBuf::from("seed.xlsx"));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
