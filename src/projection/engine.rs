//! Core projection engine for yearly compound interest projections

use crate::error::{CalcError, CalcResult};
use crate::params::CalculationParams;
use super::state::ProjectionState;
use super::schedule::{CalculationResult, YearlyDetail};

/// Run a projection for one set of parameters
///
/// Fails fast on input the compounding loop cannot handle; range checks
/// beyond that belong to [`CalculationParams::validate`].
pub fn project(params: &CalculationParams) -> CalcResult<CalculationResult> {
    check_params(params)?;

    let n = params.frequency.periods_per_year() as f64;
    let rate = params.rate_fraction();
    let mut state = ProjectionState::from_params(params);
    let mut details = Vec::new();

    for _year in 1..=state.total_years() {
        state.advance_year();

        let row = calculate_year(params, &state, rate, n);
        state.current_balance = row.ending_balance;
        state.total_additional += row.additional_investment;
        details.push(row);

        if state.is_final_year() {
            break;
        }
    }

    log::debug!(
        "Projected principal={} rate={}% over {} years ({} rows, n={})",
        params.principal,
        params.annual_rate,
        state.horizon_years,
        details.len(),
        n,
    );

    Ok(CalculationResult::from_totals(params.principal, state.total_additional, details))
}

/// Calculate balances for the state's current year
fn calculate_year(params: &CalculationParams, state: &ProjectionState, rate: f64, n: f64) -> YearlyDetail {
    let mut row = YearlyDetail::new(state.year, state.current_balance);
    let actual_years = state.actual_years();

    // A = P(1 + r/n)^(n*t), t = 1 except in a partial final year
    let end_without_additional = row.beginning_balance * (1.0 + rate / n).powf(n * actual_years);
    row.interest = end_without_additional - row.beginning_balance;

    // Partial final year receives the same fraction of the year's contributions
    let events = params.additional_investment_frequency.events_per_year() as f64;
    row.additional_investment = params.additional_investment * events * actual_years;

    row.ending_balance = end_without_additional + row.additional_investment;
    row
}

fn check_params(params: &CalculationParams) -> CalcResult<()> {
    if !params.principal.is_finite() || params.principal <= 0.0 {
        return Err(CalcError::invalid("principal", "must be greater than 0"));
    }
    if !params.annual_rate.is_finite() || params.annual_rate < 0.0 {
        return Err(CalcError::invalid("annualRate", "cannot be negative"));
    }
    if !params.period.is_finite() || params.period < 1.0 {
        return Err(CalcError::invalid("period", "must be at least 1"));
    }
    // Year indices are u32
    if params.years().ceil() > u32::MAX as f64 {
        return Err(CalcError::invalid("period", "horizon is too long"));
    }
    if !params.additional_investment.is_finite() {
        return Err(CalcError::invalid("additionalInvestment", "must be a finite number"));
    }
    Ok(())
}
