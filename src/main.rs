//! Growth Projector CLI
//!
//! Command-line interface for projecting retirement savings growth

use anyhow::{Context, Result};
use clap::Parser;
use growth_projector::plan::{
    load_lump_sums, load_phases, load_plan_json_with, percent_to_fraction, validate_plan_with,
    ContributionPhase, InflationMode, LumpSum, Plan, SimulationParameters, ValidationOptions,
};
use growth_projector::projection::simulate_plan;
use growth_projector::report::{render_text, write_json_report, write_snapshots_csv};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Project portfolio growth with staged monthly contributions, lump sums and inflation
#[derive(Debug, Parser)]
#[command(name = "growth_projector", version)]
struct Cli {
    /// JSON plan to start from; flags below override its parameters
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Initial investment in dollars
    #[arg(long)]
    initial_investment: Option<f64>,

    /// Estimated annual rate of return in percent (7 for 7%)
    #[arg(long)]
    rate: Option<f64>,

    /// Age at which investing starts
    #[arg(long)]
    initial_age: Option<u32>,

    /// Inflation rate in percent
    #[arg(long)]
    inflation: Option<f64>,

    /// How to read the inflation rate: annual or total
    #[arg(long)]
    inflation_mode: Option<InflationMode>,

    /// Contribution phase as START:END:MONTHLY[:INCREASE] (END exclusive)
    #[arg(long = "phase", value_parser = parse_phase)]
    phases: Vec<ContributionPhase>,

    /// Lump sum as AGE:AMOUNT
    #[arg(long = "lump-sum", value_parser = parse_lump_sum)]
    lump_sums: Vec<LumpSum>,

    /// CSV of phases (StartAge,EndAge,MonthlyContribution,AnnualIncrease)
    #[arg(long)]
    phases_csv: Option<PathBuf>,

    /// CSV of lump sums (Age,Amount)
    #[arg(long)]
    lump_sums_csv: Option<PathBuf>,

    /// Accept overlapping phases; the one starting latest wins
    #[arg(long)]
    allow_overlaps: bool,

    /// Write per-age snapshots to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the plan, summary and snapshots to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,
}

fn parse_phase(s: &str) -> Result<ContributionPhase, String> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("expected START:END:MONTHLY[:INCREASE], got '{}'", s));
    }
    let start_age = parts[0].parse::<u32>().map_err(|e| format!("start age '{}': {}", parts[0], e))?;
    let end_age = parts[1].parse::<u32>().map_err(|e| format!("end age '{}': {}", parts[1], e))?;
    let monthly = parts[2].parse::<f64>().map_err(|e| format!("monthly contribution '{}': {}", parts[2], e))?;
    let increase = match parts.get(3) {
        Some(raw) => raw.parse::<f64>().map_err(|e| format!("annual increase '{}': {}", raw, e))?,
        None => 0.0,
    };
    Ok(ContributionPhase::new(start_age, end_age, monthly, increase))
}

fn parse_lump_sum(s: &str) -> Result<LumpSum, String> {
    let (age, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("expected AGE:AMOUNT, got '{}'", s))?;
    let age = age.trim().parse::<u32>().map_err(|e| format!("age '{}': {}", age, e))?;
    let amount = amount.trim().parse::<f64>().map_err(|e| format!("amount '{}': {}", amount, e))?;
    Ok(LumpSum::new(age, amount))
}

impl Cli {
    fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            reject_overlaps: !self.allow_overlaps,
            ..Default::default()
        }
    }

    fn build_plan(&self) -> Result<Plan> {
        let mut plan = match &self.plan {
            Some(path) => load_plan_json_with(path, self.validation_options())
                .with_context(|| format!("Unable to load plan {}", path.display()))?,
            None => Plan::new(SimulationParameters::default()),
        };

        let params = &mut plan.params;
        if let Some(amount) = self.initial_investment {
            params.initial_investment = amount;
        }
        if let Some(rate) = self.rate {
            params.annual_rate_of_return = percent_to_fraction(rate);
        }
        if let Some(age) = self.initial_age {
            params.initial_age = age;
        }
        if let Some(inflation) = self.inflation {
            params.inflation_rate = percent_to_fraction(inflation);
        }
        if let Some(mode) = self.inflation_mode {
            params.inflation_mode = mode;
        }

        plan.phases.extend(self.phases.iter().copied());
        plan.lump_sums.extend(self.lump_sums.iter().copied());

        if let Some(path) = &self.phases_csv {
            let phases = load_phases(path)
                .with_context(|| format!("Unable to load phases from {}", path.display()))?;
            plan.phases.extend(phases);
        }
        if let Some(path) = &self.lump_sums_csv {
            let lump_sums = load_lump_sums(path)
                .with_context(|| format!("Unable to load lump sums from {}", path.display()))?;
            plan.lump_sums.extend(lump_sums);
        }

        Ok(plan)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let plan = cli.build_plan()?;
    validate_plan_with(&plan, cli.validation_options()).context("Invalid plan")?;

    log::info!(
        "Simulating {} phase(s) and {} lump sum(s) from age {}",
        plan.phases.len(),
        plan.lump_sums.len(),
        plan.params.initial_age
    );
    let result = simulate_plan(&plan).context("Simulation failed")?;

    render_text(io::stdout().lock(), &plan, &result)?;

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        write_snapshots_csv(BufWriter::new(file), &result)?;
        println!("\nSnapshots written to: {}", path.display());
    }

    if let Some(path) = &cli.json {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        write_json_report(BufWriter::new(file), &plan, &result)?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}
