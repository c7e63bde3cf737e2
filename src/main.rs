//! Compound interest calculator CLI
//!
//! Command-line interface for running projections, browsing history and
//! exporting results

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use compound_interest::{
    export, format,
    history::{HistoryLog, JsonFileStore},
    params::load_params,
    project, AppConfig, CalculationParams, CalculationResult, CompoundFrequency,
    ContributionFrequency, HostEnvironment, PeriodUnit, ScenarioRunner,
};

#[derive(Debug, Parser)]
#[command(name = "compound_interest", version, about = "Compound interest projections")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for history and exports (overrides config and environment)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project one set of parameters
    Calc {
        #[command(flatten)]
        params: ParamArgs,

        /// Write a CSV export; without a value, a timestamped file in the export directory
        #[arg(long)]
        export: Option<Option<PathBuf>>,

        /// Do not record this calculation in history
        #[arg(long)]
        no_history: bool,
    },
    /// List or clear calculation history
    History {
        /// Number of records to show
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Remove all records
        #[arg(long)]
        clear: bool,

        /// Re-run the record with this id (or unique id prefix)
        #[arg(long, value_name = "ID", conflicts_with = "clear")]
        rerun: Option<String>,
    },
    /// Project every parameter set in a CSV file
    Batch {
        input: PathBuf,

        /// Write per-row totals to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compare preset reference rates for the given parameters
    Presets {
        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Debug, Args)]
struct ParamArgs {
    #[arg(long, default_value_t = 100_000.0)]
    principal: f64,

    /// Annual rate in percent
    #[arg(long, default_value_t = 3.5)]
    rate: f64,

    #[arg(long, default_value_t = 10.0)]
    period: f64,

    /// year | month
    #[arg(long, default_value = "year")]
    unit: PeriodUnit,

    /// yearly | semi-annually | quarterly | monthly
    #[arg(long, default_value = "yearly")]
    frequency: CompoundFrequency,

    /// Contribution per event
    #[arg(long, default_value_t = 0.0)]
    additional: f64,

    /// yearly | monthly
    #[arg(long, default_value = "monthly")]
    additional_frequency: ContributionFrequency,
}

impl ParamArgs {
    fn to_params(&self) -> CalculationParams {
        CalculationParams::new(self.principal, self.rate, self.period, self.unit, self.frequency)
            .with_contribution(self.additional, self.additional_frequency)
    }
}

/// Per-row batch output
#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    principal: f64,
    annual_rate: f64,
    years: f64,
    final_amount: Option<f64>,
    total_investment: Option<f64>,
    total_interest: Option<f64>,
    return_rate: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::Calc { params, export, no_history } => {
            run_calc(&config, &params.to_params(), export, no_history)
        }
        Command::History { limit, clear, rerun } => match rerun {
            Some(id) => run_rerun(&config, &id),
            None => run_history(&config, limit, clear),
        },
        Command::Batch { input, output } => run_batch(&input, output.as_deref()),
        Command::Presets { params } => run_presets(params.to_params()),
    }
}

/// History over the data directory, or None when the host cannot support it
fn open_history(config: &AppConfig) -> Option<HistoryLog<JsonFileStore>> {
    match HostEnvironment::detect(config) {
        Ok(env) => Some(env.history(config)),
        Err(e) => {
            log::warn!("History disabled: {}", e);
            None
        }
    }
}

fn run_calc(
    config: &AppConfig,
    params: &CalculationParams,
    export_to: Option<Option<PathBuf>>,
    no_history: bool,
) -> Result<()> {
    params.validate()?;
    let result = project(params)?;

    print_schedule(params, &result);

    if !no_history {
        if let Some(mut history) = open_history(config) {
            // The result stands even if saving fails
            if let Err(e) = history.record_projection(params, &result) {
                log::warn!("Could not save calculation: {}", e);
            }
        }
    }

    if let Some(target) = export_to {
        let path = match target {
            Some(path) => path,
            None => {
                let dir = config.export_dir();
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating export directory {}", dir.display()))?;
                dir.join(export::default_export_filename())
            }
        };
        let written = export::write_export(&path, &result, params)?;
        println!("\nExported to: {}", written.display());
    }

    Ok(())
}

fn print_schedule(params: &CalculationParams, result: &CalculationResult) {
    println!("Compound Interest Projection");
    println!("============================\n");
    println!("  Principal: {}", format::format_amount(params.principal));
    println!("  Annual Rate: {}%", format::trim_number(params.annual_rate));
    println!("  Period: {}", format::period_label(params.period, params.period_unit));
    println!("  Compounding: {}", params.frequency);
    println!(
        "  Additional Investment: {}",
        format::contribution_label(params.additional_investment, params.additional_investment_frequency)
    );
    println!();

    println!("{:>5} {:>18} {:>16} {:>16} {:>18}", "Year", "Beginning", "Interest", "Added", "Ending");
    println!("{}", "-".repeat(77));
    for row in &result.yearly_details {
        println!(
            "{:>5} {:>18} {:>16} {:>16} {:>18}",
            row.year,
            format::format_amount(row.beginning_balance),
            format::format_amount(row.interest),
            format::format_amount(row.additional_investment),
            format::format_amount(row.ending_balance),
        );
    }

    println!("\nSummary:");
    println!("  Total Investment: {}", format::format_amount(result.total_investment));
    println!("  Final Amount: {}", format::format_amount(result.final_amount));
    println!("  Total Interest: {}", format::format_amount(result.total_interest));
    println!("  Return Rate: {}", format::format_percentage(result.return_rate));
}

fn run_history(config: &AppConfig, limit: usize, clear: bool) -> Result<()> {
    let env = HostEnvironment::detect(config)?;
    let mut history = env.history(config);

    if clear {
        history.clear()?;
        println!("History cleared.");
        return Ok(());
    }

    let records = history.read_all()?;
    if records.is_empty() {
        println!("No calculation history.");
        return Ok(());
    }

    println!("History ({} records)\n", records.len());
    println!("{:<8}  {:<20} {:>16} {:>8} {:>7} {:>18} {:>16}", "Id", "Time (UTC)", "Principal", "Rate", "Years", "Final Amount", "Interest");
    for record in records.iter().take(limit) {
        let time = record
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| record.timestamp.to_string());
        println!(
            "{:<8}  {:<20} {:>16} {:>7}% {:>7} {:>18} {:>16}",
            record.id.get(..8).unwrap_or(record.id.as_str()),
            time,
            format::format_amount(record.params.principal),
            format::trim_number(record.params.rate),
            format::trim_number(record.params.years),
            format::format_amount(record.result.final_amount),
            format::format_amount(record.result.total_interest),
        );
    }
    if records.len() > limit {
        println!("... ({} more records)", records.len() - limit);
    }

    Ok(())
}

/// Project a stored calculation again with its snapshot parameters
fn run_rerun(config: &AppConfig, id: &str) -> Result<()> {
    let env = HostEnvironment::detect(config)?;
    let records = env.history(config).read_all()?;

    let mut matches = records.iter().filter(|r| r.id.starts_with(id));
    let record = match (matches.next(), matches.next()) {
        (Some(record), None) => record,
        (None, _) => anyhow::bail!("no history record with id {}", id),
        (Some(_), Some(_)) => anyhow::bail!("id prefix {} matches more than one record", id),
    };
    log::info!("Re-running history record {}", record.id);

    run_calc(config, &record.params.to_params(), None, false)
}

fn run_batch(input: &Path, output: Option<&Path>) -> Result<()> {
    let batch = load_params(input)?;
    println!("Loaded {} parameter sets from {}", batch.len(), input.display());

    let runner = ScenarioRunner::default();
    let results = runner.run_batch(&batch);

    let rows: Vec<BatchRow> = batch
        .iter()
        .zip(&results)
        .enumerate()
        .map(|(i, (params, result))| {
            let ok = result.as_ref().ok();
            BatchRow {
                row: i + 1,
                principal: params.principal,
                annual_rate: params.annual_rate,
                years: params.years(),
                final_amount: ok.map(|r| r.final_amount),
                total_investment: ok.map(|r| r.total_investment),
                total_interest: ok.map(|r| r.total_interest),
                return_rate: ok.map(|r| r.return_rate),
                error: result.as_ref().err().map(|e| e.to_string()),
            }
        })
        .collect();

    for row in &rows {
        match (&row.error, row.final_amount) {
            (None, Some(amount)) => println!("  #{:<4} final amount {}", row.row, format::format_amount(amount)),
            (Some(err), _) => println!("  #{:<4} {}", row.row, err),
            _ => {}
        }
    }

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("\nResults written to: {}", path.display());
    }

    Ok(())
}

fn run_presets(base: CalculationParams) -> Result<()> {
    base.validate()?;
    let runner = ScenarioRunner::new(base);

    println!("{:<28} {:>7} {:>18} {:>16} {:>10}", "Preset", "Rate", "Final Amount", "Interest", "Return");
    println!("{}", "-".repeat(83));
    for row in runner.compare_presets()? {
        println!(
            "{:<28} {:>6}% {:>18} {:>16} {:>10}",
            row.label,
            format::trim_number(row.annual_rate),
            format::format_amount(row.final_amount),
            format::format_amount(row.total_interest),
            format::format_percentage(row.return_rate),
        );
    }

    Ok(())
}
