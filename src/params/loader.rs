//! Load batches of calculation parameters from CSV

use super::CalculationParams;
use crate::error::{CalcError, CalcResult};
use csv::Reader;
use std::path::Path;

/// Raw CSV row; enum columns are parsed separately so unknown values
/// surface as parameter errors naming the column
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "principal")]
    principal: f64,
    #[serde(rename = "annualRate")]
    annual_rate: f64,
    #[serde(rename = "period")]
    period: f64,
    #[serde(rename = "periodUnit")]
    period_unit: String,
    #[serde(rename = "frequency")]
    frequency: String,
    #[serde(rename = "additionalInvestment", default)]
    additional_investment: f64,
    #[serde(rename = "additionalInvestmentFrequency", default)]
    additional_investment_frequency: Option<String>,
}

impl CsvRow {
    fn into_params(self) -> CalcResult<CalculationParams> {
        let mut params = CalculationParams::new(
            self.principal,
            self.annual_rate,
            self.period,
            self.period_unit.parse()?,
            self.frequency.parse()?,
        );
        params.additional_investment = self.additional_investment;
        if let Some(freq) = self.additional_investment_frequency.filter(|s| !s.trim().is_empty()) {
            params.additional_investment_frequency = freq.parse()?;
        }
        Ok(params)
    }
}

/// Load all parameter sets from a CSV file
pub fn load_params<P: AsRef<Path>>(path: P) -> CalcResult<Vec<CalculationParams>> {
    let reader = Reader::from_path(path.as_ref()).map_err(|e| {
        CalcError::invalid("input", format!("cannot open {}: {}", path.as_ref().display(), e))
    })?;
    read_rows(reader)
}

/// Load parameter sets from any reader (e.g., string buffer, request body)
pub fn load_params_from_reader<R: std::io::Read>(reader: R) -> CalcResult<Vec<CalculationParams>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> CalcResult<Vec<CalculationParams>> {
    let mut params = Vec::new();

    for (line, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result
            .map_err(|e| CalcError::invalid("input", format!("row {}: {}", line + 1, e)))?;
        params.push(row.into_params()?);
    }

    log::debug!("Loaded {} parameter sets", params.len());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{CompoundFrequency, ContributionFrequency, PeriodUnit};

    const SAMPLE: &str = "\
principal,annualRate,period,periodUnit,frequency,additionalInvestment,additionalInvestmentFrequency
100000,3.5,10,year,yearly,0,monthly
10000,12,1,year,monthly,1000,monthly
1000,5,18,month,semi-annually,200,
";

    #[test]
    fn test_load_params_from_reader() {
        let params = load_params_from_reader(SAMPLE.as_bytes()).expect("Failed to load params");
        assert_eq!(params.len(), 3);

        assert_eq!(params[0].principal, 100_000.0);
        assert_eq!(params[1].frequency, CompoundFrequency::Monthly);
        assert_eq!(params[1].additional_investment, 1000.0);

        let p3 = &params[2];
        assert_eq!(p3.period_unit, PeriodUnit::Month);
        assert_eq!(p3.frequency, CompoundFrequency::SemiAnnually);
        assert_eq!(p3.additional_investment_frequency, ContributionFrequency::Monthly);
    }

    #[test]
    fn test_unknown_enum_is_rejected() {
        let csv = "principal,annualRate,period,periodUnit,frequency\n1000,5,2,decade,yearly\n";
        let err = load_params_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            CalcError::InvalidParameter { field, .. } => assert_eq!(field, "periodUnit"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let csv = "principal,annualRate,period,periodUnit,frequency\nabc,5,2,year,yearly\n";
        assert!(load_params_from_reader(csv.as_bytes()).is_err());
    }
}
