//! Compound Interest - yearly growth projections with contribution schedules
//!
//! This library provides:
//! - The projection engine: yearly balances under discrete compounding
//! - Aggregate totals (final amount, interest, total investment, return rate)
//! - A capped, most-recent-first calculation history over a key/value store
//! - CSV export with a summary block, and a parser for its rows
//! - Batch and rate-comparison runs

pub mod error;
pub mod params;
pub mod projection;
pub mod history;
pub mod export;
pub mod format;
pub mod scenario;
pub mod config;
pub mod environment;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use params::{CalculationParams, CompoundFrequency, ContributionFrequency, PeriodUnit};
pub use projection::{project, CalculationResult, YearlyDetail};
pub use history::{CalculationRecord, HistoryLog, KeyValueStore};
pub use scenario::ScenarioRunner;
pub use config::AppConfig;
pub use environment::HostEnvironment;
