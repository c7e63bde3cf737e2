//! Calculation parameter structures matching the calculator form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, CalcResult};

/// Upper bound accepted for the principal
pub const MAX_PRINCIPAL: f64 = 1_000_000_000.0;

/// Upper bound accepted for the contribution amount
pub const MAX_ADDITIONAL_INVESTMENT: f64 = 100_000_000.0;

/// Upper bound for the annual rate (percent)
pub const MAX_ANNUAL_RATE: f64 = 100.0;

/// Upper bound for the period, in its own unit
pub const MAX_PERIOD: f64 = 100.0;

/// Unit the investment period is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Year,
    Month,
}

impl PeriodUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Year => "year",
            PeriodUnit::Month => "month",
        }
    }
}

/// How often interest is compounded within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundFrequency {
    Yearly,
    SemiAnnually,
    Quarterly,
    Monthly,
}

impl CompoundFrequency {
    /// Compounding count per year (n)
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundFrequency::Yearly => 1,
            CompoundFrequency::SemiAnnually => 2,
            CompoundFrequency::Quarterly => 4,
            CompoundFrequency::Monthly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundFrequency::Yearly => "yearly",
            CompoundFrequency::SemiAnnually => "semi-annually",
            CompoundFrequency::Quarterly => "quarterly",
            CompoundFrequency::Monthly => "monthly",
        }
    }
}

/// Cadence of additional contributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionFrequency {
    Yearly,
    Monthly,
}

impl ContributionFrequency {
    /// Contribution events in a full year
    pub fn events_per_year(&self) -> u32 {
        match self {
            ContributionFrequency::Yearly => 1,
            ContributionFrequency::Monthly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionFrequency::Yearly => "yearly",
            ContributionFrequency::Monthly => "monthly",
        }
    }
}

impl FromStr for PeriodUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "years" => Ok(PeriodUnit::Year),
            "month" | "months" => Ok(PeriodUnit::Month),
            other => Err(CalcError::invalid("periodUnit", format!("Unknown period unit: {}", other))),
        }
    }
}

impl FromStr for CompoundFrequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yearly" => Ok(CompoundFrequency::Yearly),
            "semi-annually" => Ok(CompoundFrequency::SemiAnnually),
            "quarterly" => Ok(CompoundFrequency::Quarterly),
            "monthly" => Ok(CompoundFrequency::Monthly),
            other => Err(CalcError::invalid("frequency", format!("Unknown compound frequency: {}", other))),
        }
    }
}

impl FromStr for ContributionFrequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yearly" => Ok(ContributionFrequency::Yearly),
            "monthly" => Ok(ContributionFrequency::Monthly),
            other => Err(CalcError::invalid(
                "additionalInvestmentFrequency",
                format!("Unknown contribution frequency: {}", other),
            )),
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CompoundFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContributionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for a single compound interest projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationParams {
    /// Starting amount invested
    pub principal: f64,

    /// Nominal annual rate as a percentage (3.5 = 3.5%)
    pub annual_rate: f64,

    /// Length of the investment, in `period_unit`
    pub period: f64,

    pub period_unit: PeriodUnit,

    /// Compounding frequency
    pub frequency: CompoundFrequency,

    /// Amount added at each contribution event
    #[serde(default)]
    pub additional_investment: f64,

    #[serde(default = "default_contribution_frequency")]
    pub additional_investment_frequency: ContributionFrequency,
}

fn default_contribution_frequency() -> ContributionFrequency {
    ContributionFrequency::Monthly
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            annual_rate: 3.5,
            period: 10.0,
            period_unit: PeriodUnit::Year,
            frequency: CompoundFrequency::Yearly,
            additional_investment: 0.0,
            additional_investment_frequency: ContributionFrequency::Monthly,
        }
    }
}

impl CalculationParams {
    pub fn new(
        principal: f64,
        annual_rate: f64,
        period: f64,
        period_unit: PeriodUnit,
        frequency: CompoundFrequency,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            period,
            period_unit,
            frequency,
            additional_investment: 0.0,
            additional_investment_frequency: ContributionFrequency::Monthly,
        }
    }

    /// Builder-style contribution schedule
    pub fn with_contribution(mut self, amount: f64, frequency: ContributionFrequency) -> Self {
        self.additional_investment = amount;
        self.additional_investment_frequency = frequency;
        self
    }

    /// Horizon in (possibly fractional) years
    pub fn years(&self) -> f64 {
        match self.period_unit {
            PeriodUnit::Year => self.period,
            PeriodUnit::Month => self.period / 12.0,
        }
    }

    /// Annual rate as a fraction
    pub fn rate_fraction(&self) -> f64 {
        self.annual_rate / 100.0
    }

    /// Full form-level validation, done by callers before projecting
    pub fn validate(&self) -> CalcResult<()> {
        check_range("principal", self.principal, 0.01, MAX_PRINCIPAL)?;
        check_range("annualRate", self.annual_rate, 0.0, MAX_ANNUAL_RATE)?;
        check_range("period", self.period, 1.0, MAX_PERIOD)?;
        check_range(
            "additionalInvestment",
            self.additional_investment,
            0.0,
            MAX_ADDITIONAL_INVESTMENT,
        )?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < min {
        return Err(CalcError::invalid(field, format!("must be at least {}", min)));
    }
    if value > max {
        return Err(CalcError::invalid(field, format!("cannot exceed {}", max)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_mapping() {
        assert_eq!(CompoundFrequency::Yearly.periods_per_year(), 1);
        assert_eq!(CompoundFrequency::SemiAnnually.periods_per_year(), 2);
        assert_eq!(CompoundFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(CompoundFrequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("semi-annually".parse::<CompoundFrequency>().unwrap(), CompoundFrequency::SemiAnnually);
        assert_eq!("Month".parse::<PeriodUnit>().unwrap(), PeriodUnit::Month);
        assert_eq!("yearly".parse::<ContributionFrequency>().unwrap(), ContributionFrequency::Yearly);

        let err = "weekly".parse::<CompoundFrequency>().unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!("quarterly".parse::<ContributionFrequency>().is_err());
    }

    #[test]
    fn test_serde_wire_names() {
        let params = CalculationParams::default()
            .with_contribution(500.0, ContributionFrequency::Yearly);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["annualRate"], 3.5);
        assert_eq!(json["periodUnit"], "year");
        assert_eq!(json["frequency"], "yearly");
        assert_eq!(json["additionalInvestmentFrequency"], "yearly");

        let parsed: CalculationParams = serde_json::from_str(
            r#"{"principal":1000,"annualRate":5,"period":18,"periodUnit":"month","frequency":"semi-annually"}"#,
        )
        .unwrap();
        assert_eq!(parsed.frequency, CompoundFrequency::SemiAnnually);
        assert_eq!(parsed.additional_investment, 0.0);
        assert_eq!(parsed.additional_investment_frequency, ContributionFrequency::Monthly);
    }

    #[test]
    fn test_years_conversion() {
        let p = CalculationParams::new(1000.0, 5.0, 18.0, PeriodUnit::Month, CompoundFrequency::Yearly);
        assert_eq!(p.years(), 1.5);
        assert_eq!(p.rate_fraction(), 0.05);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(CalculationParams::default().validate().is_ok());

        let mut p = CalculationParams::default();
        p.annual_rate = 101.0;
        match p.validate() {
            Err(CalcError::InvalidParameter { field, .. }) => assert_eq!(field, "annualRate"),
            other => panic!("unexpected: {:?}", other),
        }

        let mut p = CalculationParams::default();
        p.period = 0.5;
        assert!(p.validate().is_err());

        let mut p = CalculationParams::default();
        p.principal = f64::NAN;
        assert!(p.validate().is_err());

        let mut p = CalculationParams::default();
        p.additional_investment = -1.0;
        assert!(p.validate().is_err());
    }
}
