//! Presentation helpers for amounts, percentages and schedule labels

use crate::params::{ContributionFrequency, PeriodUnit};

/// Two decimals with `,` thousands grouping, e.g. `-1,234,567.89`
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads as a stray sign
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// `10 years`, `18 months`, `1 year`
pub fn period_label(period: f64, unit: PeriodUnit) -> String {
    let noun = match unit {
        PeriodUnit::Year => "year",
        PeriodUnit::Month => "month",
    };
    let plural = if period == 1.0 { "" } else { "s" };
    format!("{} {}{}", trim_number(period), noun, plural)
}

/// `500.00 (monthly)`
pub fn contribution_label(amount: f64, frequency: ContributionFrequency) -> String {
    format!("{:.2} ({})", amount, frequency.as_str())
}

/// Shortest decimal rendering: `10`, `2.5`, `0.35`
pub fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
