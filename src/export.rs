//! CSV export of projection results
//!
//! Layout: a header row, one row per year, a blank separator row, then a
//! `Summary` block of label/value pairs. The downloadable blob carries a
//! leading UTF-8 byte-order mark so spreadsheet tools pick the right encoding.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CalcError, CalcResult};
use crate::format::{contribution_label, period_label, trim_number};
use crate::params::CalculationParams;
use crate::projection::{CalculationResult, YearlyDetail};

/// UTF-8 byte-order mark prepended to exported blobs
pub const BOM: char = '\u{feff}';

pub const HEADER: [&str; 5] = [
    "Year",
    "Beginning Balance",
    "Interest",
    "Additional Investment",
    "Ending Balance",
];

/// Render the CSV text (without BOM)
pub fn to_csv(result: &CalculationResult, params: &CalculationParams) -> String {
    let mut out = String::new();

    out.push_str(&HEADER.join(","));
    for row in &result.yearly_details {
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "\n{},{:.2},{:.2},{:.2},{:.2}",
            row.year,
            row.beginning_balance,
            row.interest,
            row.additional_investment,
            row.ending_balance,
        );
    }

    let summary = [
        ("Principal", format!("{:.2}", params.principal)),
        ("Annual Rate", format!("{}%", trim_number(params.annual_rate))),
        ("Investment Period", period_label(params.period, params.period_unit)),
        (
            "Additional Investment",
            contribution_label(params.additional_investment, params.additional_investment_frequency),
        ),
        ("Total Investment", format!("{:.2}", result.total_investment)),
        ("Final Amount", format!("{:.2}", result.final_amount)),
        ("Total Interest", format!("{:.2}", result.total_interest)),
        ("Return Rate", format!("{:.2}%", result.return_rate)),
    ];

    out.push_str("\n\nSummary");
    for (label, value) in &summary {
        let _ = write!(out, "\n{},{}", label, value);
    }

    out
}

/// BOM-prefixed UTF-8 blob ready for delivery
pub fn export_blob(result: &CalculationResult, params: &CalculationParams) -> Vec<u8> {
    let mut text = String::new();
    text.push(BOM);
    text.push_str(&to_csv(result, params));
    text.into_bytes()
}

/// Default file name for an export created now
pub fn default_export_filename() -> String {
    format!("compound_interest_{}.csv", chrono::Utc::now().timestamp_millis())
}

/// Deliver the export blob to `path` using write-then-rename
pub fn write_export(path: &Path, result: &CalculationResult, params: &CalculationParams) -> CalcResult<PathBuf> {
    let blob = export_blob(result, params);
    let temp_path = path.with_extension("csv.tmp");

    fs::write(&temp_path, &blob)
        .map_err(|e| CalcError::Export(format!("cannot write {}: {}", temp_path.display(), e)))?;
    fs::rename(&temp_path, path)
        .map_err(|e| CalcError::Export(format!("cannot move export to {}: {}", path.display(), e)))?;

    log::info!("Exported {} rows to {}", result.yearly_details.len(), path.display());
    Ok(path.to_path_buf())
}

/// Parse the yearly row section back out of an exported CSV
pub fn parse_rows(text: &str) -> CalcResult<Vec<YearlyDetail>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| CalcError::Export(format!("malformed CSV: {}", e)))?;

        // The row section ends at the first non-year record
        let year: u32 = match record.get(0).and_then(|s| s.trim().parse().ok()) {
            Some(year) => year,
            None => break,
        };

        let field = |idx: usize| -> CalcResult<f64> {
            record
                .get(idx)
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| CalcError::Export(format!("year {}: bad value in column {}", year, HEADER[idx])))
        };

        rows.push(YearlyDetail {
            year,
            beginning_balance: field(1)?,
            interest: field(2)?,
            additional_investment: field(3)?,
            ending_balance: field(4)?,
        });
    }

    Ok(rows)
}
