//! Yearly output rows and aggregate totals for a projection

use serde::{Deserialize, Serialize};

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyDetail {
    /// Year index (1-based, sequential)
    pub year: u32,

    pub beginning_balance: f64,

    /// Interest earned during the year (or partial final year)
    pub interest: f64,

    /// Contributions added during the year
    pub additional_investment: f64,

    pub ending_balance: f64,
}

impl YearlyDetail {
    pub fn new(year: u32, beginning_balance: f64) -> Self {
        Self {
            year,
            beginning_balance,
            interest: 0.0,
            additional_investment: 0.0,
            ending_balance: beginning_balance,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Ending balance of the last row
    pub final_amount: f64,

    /// Final amount minus everything contributed
    pub total_interest: f64,

    /// Principal plus all additional investments
    pub total_investment: f64,

    /// Total interest as a percentage of total investment
    pub return_rate: f64,

    pub yearly_details: Vec<YearlyDetail>,
}

impl CalculationResult {
    /// Derive the aggregate totals from the yearly rows and the contributions
    /// accumulated while projecting them
    pub fn from_totals(principal: f64, total_additional: f64, yearly_details: Vec<YearlyDetail>) -> Self {
        let total_investment = principal + total_additional;
        let final_amount = yearly_details.last().map(|r| r.ending_balance).unwrap_or(0.0);
        let total_interest = final_amount - total_investment;

        let return_rate = if total_investment > 0.0 {
            total_interest / total_investment * 100.0
        } else {
            0.0
        };

        Self {
            final_amount,
            total_interest,
            total_investment,
            return_rate,
            yearly_details,
        }
    }

    /// Zero-valued result for display when a calculation fails
    pub fn empty() -> Self {
        Self {
            final_amount: 0.0,
            total_interest: 0.0,
            total_investment: 0.0,
            return_rate: 0.0,
            yearly_details: Vec::new(),
        }
    }
}
