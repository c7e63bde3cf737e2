//! Calculation history persisted through a key/value store

mod record;
mod store;
mod ledger;

pub use record::{CalculationRecord, RecordParams, RecordResult, RecordSnapshot};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use ledger::{HistoryLog, DEFAULT_HISTORY_LIMIT, HISTORY_KEY};
