//! Calculation parameters and batch loading

mod data;
pub mod loader;

pub use data::{
    CalculationParams, CompoundFrequency, ContributionFrequency, PeriodUnit,
    MAX_ADDITIONAL_INVESTMENT, MAX_ANNUAL_RATE, MAX_PERIOD, MAX_PRINCIPAL,
};
pub use loader::{load_params, load_params_from_reader};
