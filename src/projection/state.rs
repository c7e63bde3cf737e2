//! Running state of a projection between years

use crate::params::CalculationParams;

/// State carried from one projected year to the next
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current year (1-indexed once advanced, 0 before the first year)
    pub year: u32,

    /// Total horizon in years (may be fractional)
    pub horizon_years: f64,

    /// Balance at the start of the current year
    pub current_balance: f64,

    /// Contributions accumulated so far
    pub total_additional: f64,
}

impl ProjectionState {
    /// Initialize state at the start of the horizon
    pub fn from_params(params: &CalculationParams) -> Self {
        Self {
            year: 0,
            horizon_years: params.years(),
            current_balance: params.principal,
            total_additional: 0.0,
        }
    }

    /// Number of rows the horizon produces
    pub fn total_years(&self) -> u32 {
        self.horizon_years.ceil() as u32
    }

    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Fraction of the current year inside the horizon; below 1 only for a
    /// partial final year
    pub fn actual_years(&self) -> f64 {
        let year = self.year as f64;
        if year <= self.horizon_years {
            1.0
        } else {
            self.horizon_years - (year - 1.0)
        }
    }

    /// Whether the current year reaches the end of the horizon
    pub fn is_final_year(&self) -> bool {
        self.year as f64 >= self.horizon_years
    }
}
