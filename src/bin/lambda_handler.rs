//! AWS Lambda handler for compound interest projections
//!
//! Accepts calculation parameters as JSON and returns the yearly schedule and
//! totals, optionally with the CSV export text.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use compound_interest::{
    export, project, CalcError, CalculationParams, CalculationResult,
    params::{CompoundFrequency, ContributionFrequency, PeriodUnit},
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Input for a projection; omitted fields take the calculator defaults
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default = "default_principal")]
    pub principal: f64,

    /// Annual rate in percent
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,

    #[serde(default = "default_period")]
    pub period: f64,

    /// "year" or "month"
    #[serde(default = "default_period_unit")]
    pub period_unit: String,

    /// "yearly", "semi-annually", "quarterly" or "monthly"
    #[serde(default = "default_frequency")]
    pub frequency: String,

    #[serde(default)]
    pub additional_investment: f64,

    /// "yearly" or "monthly"
    #[serde(default = "default_contribution_frequency")]
    pub additional_investment_frequency: String,

    /// Include the CSV export text in the response
    #[serde(default)]
    pub include_csv: bool,
}

fn default_principal() -> f64 { CalculationParams::default().principal }
fn default_annual_rate() -> f64 { CalculationParams::default().annual_rate }
fn default_period() -> f64 { CalculationParams::default().period }
fn default_period_unit() -> String { PeriodUnit::Year.as_str().to_string() }
fn default_frequency() -> String { CompoundFrequency::Yearly.as_str().to_string() }
fn default_contribution_frequency() -> String { ContributionFrequency::Monthly.as_str().to_string() }

impl CalculateRequest {
    fn to_params(&self) -> Result<CalculationParams, CalcError> {
        let params = CalculationParams::new(
            self.principal,
            self.annual_rate,
            self.period,
            self.period_unit.parse()?,
            self.frequency.parse()?,
        )
        .with_contribution(self.additional_investment, self.additional_investment_frequency.parse()?);
        params.validate()?;
        Ok(params)
    }
}

/// Output from the projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub params: CalculationParams,
    #[serde(flatten)]
    pub result: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &CalculateResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculateRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let params = match request.to_params() {
        Ok(p) => p,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let result = match project(&params) {
        Ok(r) => r,
        Err(e) if e.is_invalid_parameter() => return error_response(400, &e.to_string()),
        Err(e) => {
            log::error!("Projection failed: {}", e);
            return error_response(500, "Projection failed");
        }
    };

    let csv = request.include_csv.then(|| export::to_csv(&result, &params));
    log::info!(
        "Projected {} years, final amount {:.2}",
        result.yearly_details.len(),
        result.final_amount
    );

    let response = CalculateResponse {
        params,
        result,
        csv,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
