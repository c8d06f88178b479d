//! Run one plan across a range of annual rates of return
//!
//! Outputs final nominal and inflation-adjusted values per rate as CSV

use anyhow::{Context, Result};
use clap::Parser;
use growth_projector::plan::{load_plan_json_with, percent_to_fraction, ValidationOptions};
use growth_projector::scenario::{rate_range, ScenarioRunner};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

/// Sweep rates of return over a JSON plan
#[derive(Debug, Parser)]
struct Args {
    /// JSON plan to sweep
    plan: PathBuf,

    /// Lowest rate in percent
    #[arg(long, default_value_t = 2.0)]
    from: f64,

    /// Highest rate in percent
    #[arg(long, default_value_t = 12.0)]
    to: f64,

    /// Step between rates in percent
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// Accept overlapping phases
    #[arg(long)]
    allow_overlaps: bool,

    /// Output CSV path
    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let options = ValidationOptions {
        reject_overlaps: !args.allow_overlaps,
        ..Default::default()
    };
    let plan = load_plan_json_with(&args.plan, options)
        .with_context(|| format!("Failed to load plan {}", args.plan.display()))?;

    let rates: Vec<f64> = rate_range(args.from, args.to, args.step)
        .into_iter()
        .map(percent_to_fraction)
        .collect();

    let runner = ScenarioRunner::with_validation(options);

    println!("Running {} scenarios...", rates.len());
    let points = runner.rate_sweep(&plan, &rates)?;
    println!("Scenarios complete in {:?}", start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record([
        "RatePct",
        "FinalNominal",
        "FinalInflationAdjusted",
        "TotalContributed",
        "FourPercentIncome",
    ])?;
    for point in &points {
        writer.write_record([
            format!("{:.2}", point.annual_rate_of_return * 100.0),
            format!("{:.2}", point.final_nominal_value),
            format!("{:.2}", point.final_inflation_adjusted_value),
            format!("{:.2}", point.total_contributed),
            format!("{:.2}", point.four_percent_income),
        ])?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    if let (Some(low), Some(high)) = (points.first(), points.last()) {
        println!(
            "  {:.2}%: ${:.0}  ->  {:.2}%: ${:.0}",
            low.annual_rate_of_return * 100.0,
            low.final_nominal_value,
            high.annual_rate_of_return * 100.0,
            high.final_nominal_value
        );
    }

    Ok(())
}
