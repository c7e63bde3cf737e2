//! Scenario runner for batch projections
//!
//! Projections are independent, so batches fan out across threads with rayon
//! and come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::CalcResult;
use crate::params::CalculationParams;
use crate::projection::{project, CalculationResult};

/// A named reference rate (percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetRate {
    pub label: &'static str,
    pub value: f64,
}

/// Typical rates offered alongside the calculator
pub const PRESET_RATES: [PresetRate; 6] = [
    PresetRate { label: "Demand deposit", value: 0.35 },
    PresetRate { label: "1-year term deposit", value: 1.5 },
    PresetRate { label: "3-year term deposit", value: 2.75 },
    PresetRate { label: "Wealth management product", value: 3.5 },
    PresetRate { label: "Fund investment", value: 6.0 },
    PresetRate { label: "Equity investment", value: 8.0 },
];

/// One row of a rate comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateComparison {
    pub label: String,
    pub annual_rate: f64,
    pub final_amount: f64,
    pub total_interest: f64,
    pub return_rate: f64,
}

/// Runs many projections against shared base parameters
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(CalculationParams::default());
/// for row in runner.compare_presets()? {
///     println!("{}: {:.2}", row.label, row.final_amount);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base: CalculationParams,
}

impl ScenarioRunner {
    pub fn new(base: CalculationParams) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &CalculationParams {
        &self.base
    }

    /// Project the base parameters
    pub fn run(&self) -> CalcResult<CalculationResult> {
        project(&self.base)
    }

    /// Validate and project every parameter set in parallel, preserving order
    ///
    /// A row that fails validation gets its own `Err`; the rest still run.
    pub fn run_batch(&self, params: &[CalculationParams]) -> Vec<CalcResult<CalculationResult>> {
        params
            .par_iter()
            .map(|p| p.validate().and_then(|_| project(p)))
            .collect()
    }

    /// Project the base parameters at each annual rate
    pub fn compare_rates(&self, rates: &[f64]) -> CalcResult<Vec<RateComparison>> {
        let labelled: Vec<(String, f64)> = rates
            .iter()
            .map(|&rate| (format!("{}%", crate::format::trim_number(rate)), rate))
            .collect();
        self.compare_labelled(&labelled)
    }

    /// Project the base parameters at each preset rate
    pub fn compare_presets(&self) -> CalcResult<Vec<RateComparison>> {
        let labelled: Vec<(String, f64)> = PRESET_RATES
            .iter()
            .map(|p| (p.label.to_string(), p.value))
            .collect();
        self.compare_labelled(&labelled)
    }

    fn compare_labelled(&self, rates: &[(String, f64)]) -> CalcResult<Vec<RateComparison>> {
        rates
            .par_iter()
            .map(|(label, rate)| {
                let params = CalculationParams {
                    annual_rate: *rate,
                    ..self.base.clone()
                };
                let result = project(&params)?;
                Ok(RateComparison {
                    label: label.clone(),
                    annual_rate: *rate,
                    final_amount: result.final_amount,
                    total_interest: result.total_interest,
                    return_rate: result.return_rate,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::params::{load_params_from_reader, CompoundFrequency, PeriodUnit};

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::default();
        let batch: Vec<_> = [1000.0, 2000.0, -5.0, 4000.0]
            .iter()
            .map(|&p| CalculationParams::new(p, 5.0, 3.0, PeriodUnit::Year, CompoundFrequency::Yearly))
            .collect();

        let results = runner.run_batch(&batch);
        assert_eq!(results.len(), 4);
        assert!(results[2].is_err());

        let first = results[0].as_ref().unwrap();
        let second = results[1].as_ref().unwrap();
        assert!((second.final_amount - 2.0 * first.final_amount).abs() < 1e-6);
    }

    #[test]
    fn test_run_batch_isolates_out_of_range_period() {
        let csv = "\
principal,annualRate,period,periodUnit,frequency,additionalInvestment,additionalInvestmentFrequency
1000,5,3,year,yearly,0,monthly
1000,5,1e12,year,yearly,0,monthly
1000,5,101,year,yearly,0,monthly
2000,5,3,year,yearly,0,monthly
";
        let batch = load_params_from_reader(csv.as_bytes()).unwrap();
        let results = ScenarioRunner::default().run_batch(&batch);

        assert_eq!(results.len(), 4);
        for bad in &results[1..3] {
            match bad {
                Err(CalcError::InvalidParameter { field, .. }) => assert_eq!(field, "period"),
                other => panic!("expected period error, got {:?}", other),
            }
        }
        assert_eq!(results[0].as_ref().unwrap().yearly_details.len(), 3);
        assert_eq!(results[3].as_ref().unwrap().yearly_details.len(), 3);
    }

    #[test]
    fn test_compare_rates_monotonic() {
        let runner = ScenarioRunner::new(CalculationParams::default());
        let rows = runner.compare_rates(&[1.0, 3.0, 5.0]).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "1%");
        assert!(rows[2].final_amount > rows[1].final_amount);
        assert!(rows[1].final_amount > rows[0].final_amount);
    }

    #[test]
    fn test_compare_presets() {
        let runner = ScenarioRunner::default();
        let rows = runner.compare_presets().unwrap();

        assert_eq!(rows.len(), PRESET_RATES.len());
        assert_eq!(rows[3].annual_rate, 3.5);
        assert_eq!(rows[3].final_amount, runner.run().unwrap().final_amount);
    }

    #[test]
    fn test_compare_rates_rejects_negative() {
        let runner = ScenarioRunner::default();
        assert!(runner.compare_rates(&[2.0, -1.0]).is_err());
    }
}
