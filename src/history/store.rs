//! Key/value stores backing the history log

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CalcError, CalcResult};

/// Minimal key/value capability the history log needs from its host
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CalcResult<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> CalcResult<()>;
    fn remove(&mut self, key: &str) -> CalcResult<()>;
}

/// In-memory store, for tests and history-disabled runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CalcResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> CalcResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CalcResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` document per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys never escape the store directory
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> CalcResult<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| CalcError::Persistence(format!("cannot read {}: {}", path.display(), e)))?;
        let value = serde_json::from_str(&content)
            .map_err(|e| CalcError::Persistence(format!("corrupt {}: {}", path.display(), e)))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: Value) -> CalcResult<()> {
        let path = self.path_for(key);
        let content = serde_json::to_string(&value)
            .map_err(|e| CalcError::Persistence(e.to_string()))?;

        // Write-then-rename so an interrupted write leaves the old document intact
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .map_err(|e| CalcError::Persistence(format!("cannot write {}: {}", temp_path.display(), e)))?;
        fs::rename(&temp_path, &path)
            .map_err(|e| CalcError::Persistence(format!("cannot replace {}: {}", path.display(), e)))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CalcResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CalcError::Persistence(format!("cannot remove {}: {}", path.display(), e))),
        }
    }
}
