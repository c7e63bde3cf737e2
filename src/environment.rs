//! Host capability check run before the history store is mounted

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::{CalcError, CalcResult};
use crate::history::{HistoryLog, JsonFileStore};

/// A host whose data directory exists and accepts writes
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    data_dir: PathBuf,
}

impl HostEnvironment {
    /// Create the data directory if needed and probe it for writes.
    ///
    /// An `Environment` error means history should run disabled.
    pub fn detect(config: &AppConfig) -> CalcResult<Self> {
        let data_dir = config.data_dir.clone();

        fs::create_dir_all(&data_dir).map_err(|e| {
            CalcError::Environment(format!("cannot create data directory {}: {}", data_dir.display(), e))
        })?;
        if !data_dir.is_dir() {
            return Err(CalcError::Environment(format!("{} is not a directory", data_dir.display())));
        }

        let probe = data_dir.join(".write-probe");
        fs::write(&probe, b"ok")
            .and_then(|_| fs::remove_file(&probe))
            .map_err(|e| {
                CalcError::Environment(format!("data directory {} is not writable: {}", data_dir.display(), e))
            })?;

        log::debug!("Data directory ready: {}", data_dir.display());
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// History log over the file store in the data directory
    pub fn history(&self, config: &AppConfig) -> HistoryLog<JsonFileStore> {
        HistoryLog::with_settings(
            JsonFileStore::new(&self.data_dir),
            &config.history_key,
            config.history_limit,
        )
    }
}
