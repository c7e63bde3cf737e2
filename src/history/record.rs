//! History record snapshots

use serde::{Deserialize, Serialize};

use crate::params::{CalculationParams, CompoundFrequency, ContributionFrequency, PeriodUnit};
use crate::projection::CalculationResult;

/// Parameter snapshot kept with each record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordParams {
    pub principal: f64,

    /// Annual rate, percent
    pub rate: f64,

    /// Horizon in years (months divided by 12)
    pub years: f64,

    /// Contribution normalised to a monthly amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_investment: Option<f64>,

    /// Compounding count per year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_frequency: Option<u32>,
}

impl RecordParams {
    pub fn from_params(params: &CalculationParams) -> Self {
        let monthly_investment = match params.additional_investment_frequency {
            ContributionFrequency::Monthly => params.additional_investment,
            ContributionFrequency::Yearly => params.additional_investment / 12.0,
        };

        Self {
            principal: params.principal,
            rate: params.annual_rate,
            years: params.years(),
            monthly_investment: Some(monthly_investment),
            compound_frequency: Some(params.frequency.periods_per_year()),
        }
    }

    /// Parameters to re-run a stored calculation
    ///
    /// The snapshot only keeps years and a monthly amount, so the horizon comes
    /// back in years and contributions as monthly. An unknown compounding count
    /// falls back to monthly.
    pub fn to_params(&self) -> CalculationParams {
        let frequency = match self.compound_frequency {
            Some(1) => CompoundFrequency::Yearly,
            Some(2) => CompoundFrequency::SemiAnnually,
            Some(4) => CompoundFrequency::Quarterly,
            _ => CompoundFrequency::Monthly,
        };

        CalculationParams::new(self.principal, self.rate, self.years, PeriodUnit::Year, frequency)
            .with_contribution(self.monthly_investment.unwrap_or(0.0), ContributionFrequency::Monthly)
    }
}

/// Result snapshot kept with each record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResult {
    pub final_amount: f64,
    pub total_interest: f64,
}

impl RecordResult {
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            final_amount: result.final_amount,
            total_interest: result.total_interest,
        }
    }
}

/// What a caller hands to the history log; id and timestamp are assigned on append
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub params: RecordParams,
    pub result: RecordResult,
}

impl RecordSnapshot {
    pub fn new(params: &CalculationParams, result: &CalculationResult) -> Self {
        Self {
            params: RecordParams::from_params(params),
            result: RecordResult::from_result(result),
        }
    }
}

/// A stored calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: String,

    /// Creation time, Unix milliseconds
    pub timestamp: i64,

    pub params: RecordParams,
    pub result: RecordResult,
}

impl CalculationRecord {
    pub fn from_snapshot(snapshot: RecordSnapshot) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            params: snapshot.params,
            result: snapshot.result,
        }
    }

    /// Creation time as a UTC datetime
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    #[test]
    fn test_snapshot_normalisation() {
        let params = CalculationParams::new(1000.0, 5.0, 18.0, PeriodUnit::Month, CompoundFrequency::Quarterly)
            .with_contribution(1200.0, ContributionFrequency::Yearly);
        let result = project(&params).unwrap();
        let snap = RecordSnapshot::new(&params, &result);

        assert_eq!(snap.params.years, 1.5);
        assert_eq!(snap.params.monthly_investment, Some(100.0));
        assert_eq!(snap.params.compound_frequency, Some(4));
        assert_eq!(snap.result.final_amount, result.final_amount);
    }

    #[test]
    fn test_rerun_from_snapshot() {
        let params = CalculationParams::new(25_000.0, 4.25, 15.0, PeriodUnit::Year, CompoundFrequency::Quarterly)
            .with_contribution(300.0, ContributionFrequency::Monthly);
        let restored = RecordParams::from_params(&params).to_params();

        assert_eq!(restored, params);
        assert_eq!(
            project(&restored).unwrap().final_amount,
            project(&params).unwrap().final_amount
        );
    }

    #[test]
    fn test_to_params_fallbacks() {
        let snapshot = RecordParams {
            principal: 1000.0,
            rate: 3.0,
            years: 1.5,
            monthly_investment: None,
            compound_frequency: Some(3),
        };
        let params = snapshot.to_params();

        assert_eq!(params.frequency, CompoundFrequency::Monthly);
        assert_eq!(params.period_unit, PeriodUnit::Year);
        assert_eq!(params.period, 1.5);
        assert_eq!(params.additional_investment, 0.0);
        assert_eq!(params.additional_investment_frequency, ContributionFrequency::Monthly);

        let yearly = RecordParams { compound_frequency: Some(1), ..snapshot.clone() };
        assert_eq!(yearly.to_params().frequency, CompoundFrequency::Yearly);
        let unset = RecordParams { compound_frequency: None, ..snapshot };
        assert_eq!(unset.to_params().frequency, CompoundFrequency::Monthly);
    }

    #[test]
    fn test_record_json_shape() {
        let record = CalculationRecord::from_snapshot(RecordSnapshot {
            params: RecordParams {
                principal: 100.0,
                rate: 2.0,
                years: 1.0,
                monthly_investment: None,
                compound_frequency: Some(12),
            },
            result: RecordResult { final_amount: 102.0, total_interest: 2.0 },
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["params"]["compoundFrequency"], 12);
        assert!(json["params"].get("monthlyInvestment").is_none());
        assert_eq!(json["result"]["finalAmount"], 102.0);
        assert_eq!(json["id"].as_str().unwrap().len(), 36);
        assert!(record.created_at().is_some());
    }
}
