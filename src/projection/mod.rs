//! Projection engine for yearly compound interest projections

mod state;
mod engine;
mod schedule;

pub use state::ProjectionState;
pub use engine::project;
pub use schedule::{CalculationResult, YearlyDetail};
