//! Application configuration
//!
//! Every field has a default, so an empty JSON object (or no file at all) is
//! a valid configuration. `COMPOUND_CALC_DATA_DIR` overrides the data directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CalcError, CalcResult};
use crate::history::{DEFAULT_HISTORY_LIMIT, HISTORY_KEY};

/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "COMPOUND_CALC_DATA_DIR";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "compound-calculator";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where history (and by default exports) are kept
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_history_key")]
    pub history_key: String,

    /// Most history records kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Export directory; falls back to `data_dir`
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf { PathBuf::from(DEFAULT_DATA_DIR) }
fn default_history_key() -> String { HISTORY_KEY.to_string() }
fn default_history_limit() -> usize { DEFAULT_HISTORY_LIMIT }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_key: default_history_key(),
            history_limit: default_history_limit(),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Load from an optional JSON file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::var(DATA_DIR_ENV).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CalcError::invalid("config", format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CalcResult<Self> {
        serde_json::from_str(content).map_err(|e| CalcError::invalid("config", e.to_string()))
    }

    fn apply_env(&mut self, data_dir: Option<String>) {
        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            log::debug!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
            self.data_dir = PathBuf::from(dir);
        }
    }

    pub fn export_dir(&self) -> &Path {
        self.export_dir.as_deref().unwrap_or(self.data_dir.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.history_limit, 1000);
        assert_eq!(config.history_key, "compound-calculator-history");
        assert_eq!(config.export_dir(), Path::new(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_partial_json() {
        let config = AppConfig::from_json(r#"{"history_limit": 50, "export_dir": "/tmp/out"}"#).unwrap();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.export_dir(), Path::new("/tmp/out"));
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::default();
        config.apply_env(Some("/var/lib/calc".to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/calc"));

        config.apply_env(Some("  ".to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/calc"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_dir": "history"}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("history"));
        assert!(AppConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
