//! Append-only calculation history, most recent first

use serde_json::Value;

use super::record::{CalculationRecord, RecordSnapshot};
use super::store::KeyValueStore;
use crate::error::{CalcError, CalcResult};
use crate::params::CalculationParams;
use crate::projection::CalculationResult;

/// Store key the history list lives under
pub const HISTORY_KEY: &str = "compound-calculator-history";

/// Most records kept
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// History log over any key/value store
///
/// Every write rewrites the whole list; concurrent writers are last-writer-wins.
#[derive(Debug)]
pub struct HistoryLog<S: KeyValueStore> {
    store: S,
    key: String,
    limit: usize,
}

impl<S: KeyValueStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, HISTORY_KEY, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_settings(store: S, key: &str, limit: usize) -> Self {
        Self {
            store,
            key: key.to_string(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prepend a new record and truncate to the limit
    pub fn append(&mut self, snapshot: RecordSnapshot) -> CalcResult<CalculationRecord> {
        let record = CalculationRecord::from_snapshot(snapshot);

        let mut history = self.read_all()?;
        history.insert(0, record.clone());
        history.truncate(self.limit);

        let value = serde_json::to_value(&history)
            .map_err(|e| CalcError::Persistence(e.to_string()))?;
        self.store.set(&self.key, value)?;

        log::info!("Saved calculation {} ({} records in history)", record.id, history.len());
        Ok(record)
    }

    /// Snapshot a finished projection and append it
    pub fn record_projection(
        &mut self,
        params: &CalculationParams,
        result: &CalculationResult,
    ) -> CalcResult<CalculationRecord> {
        self.append(RecordSnapshot::new(params, result))
    }

    /// All records, most recent first
    pub fn read_all(&self) -> CalcResult<Vec<CalculationRecord>> {
        match self.store.get(&self.key)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| CalcError::Persistence(format!("unreadable history: {}", e))),
        }
    }

    pub fn clear(&mut self) -> CalcResult<()> {
        self.store.remove(&self.key)?;
        log::info!("Cleared calculation history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::record::{RecordParams, RecordResult};
    use crate::history::store::{JsonFileStore, MemoryStore};
    use crate::params::CalculationParams;
    use crate::projection::project;
    use tempfile::tempdir;

    fn snapshot(principal: f64) -> RecordSnapshot {
        RecordSnapshot {
            params: RecordParams {
                principal,
                rate: 3.5,
                years: 10.0,
                monthly_investment: Some(0.0),
                compound_frequency: Some(1),
            },
            result: RecordResult { final_amount: principal * 1.41, total_interest: principal * 0.41 },
        }
    }

    #[test]
    fn test_empty_history() {
        let log = HistoryLog::new(MemoryStore::new());
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_prepends() {
        let mut log = HistoryLog::new(MemoryStore::new());
        let first = log.append(snapshot(1.0)).unwrap();
        let second = log.append(snapshot(2.0)).unwrap();

        let all = log.read_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_truncates_to_limit() {
        let mut log = HistoryLog::new(MemoryStore::new());
        for i in 0..1001 {
            log.append(snapshot(i as f64 + 1.0)).unwrap();
        }

        let all = log.read_all().unwrap();
        assert_eq!(all.len(), 1000);
        assert_eq!(all[0].params.principal, 1001.0);
        assert_eq!(all[999].params.principal, 2.0);
    }

    #[test]
    fn test_clear() {
        let mut log = HistoryLog::with_settings(MemoryStore::new(), "k", 5);
        log.append(snapshot(1.0)).unwrap();
        log.clear().unwrap();
        assert!(log.read_all().unwrap().is_empty());
        assert!(log.store().get("k").unwrap().is_none());
    }

    #[test]
    fn test_file_backed_history_survives_reopen() {
        let dir = tempdir().unwrap();
        let params = CalculationParams::default();
        let result = project(&params).unwrap();

        {
            let mut log = HistoryLog::new(JsonFileStore::new(dir.path()));
            log.record_projection(&params, &result).unwrap();
        }

        let log = HistoryLog::new(JsonFileStore::new(dir.path()));
        let all = log.read_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].result.final_amount, result.final_amount);
        assert_eq!(all[0].params.compound_frequency, Some(1));
    }

    #[test]
    fn test_unreadable_history_is_persistence_error() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, serde_json::json!({"not": "a list"})).unwrap();
        let log = HistoryLog::new(store);
        assert!(matches!(log.read_all(), Err(CalcError::Persistence(_))));
    }
}
