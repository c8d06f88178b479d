//! Load contribution phases, lump sums and whole plans from files

use super::{validate_plan_with, ContributionPhase, LumpSum, Plan, ValidationOptions};
use crate::error::PlanError;
use csv::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row for a contribution phase
#[derive(Debug, serde::Deserialize)]
struct PhaseRow {
    #[serde(rename = "StartAge")]
    start_age: u32,
    #[serde(rename = "EndAge")]
    end_age: u32,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "AnnualIncrease", default)]
    annual_increase: f64,
}

impl From<PhaseRow> for ContributionPhase {
    fn from(row: PhaseRow) -> Self {
        ContributionPhase::new(row.start_age, row.end_age, row.monthly_contribution, row.annual_increase)
    }
}

/// Raw CSV row for a lump sum
#[derive(Debug, serde::Deserialize)]
struct LumpSumRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Amount")]
    amount: f64,
}

impl From<LumpSumRow> for LumpSum {
    fn from(row: LumpSumRow) -> Self {
        LumpSum::new(row.age, row.amount)
    }
}

/// Load contribution phases from a CSV file
pub fn load_phases<P: AsRef<Path>>(path: P) -> Result<Vec<ContributionPhase>, PlanError> {
    let path = path.as_ref();
    let phases = load_phases_from_reader(File::open(path)?)?;
    log::info!("Loaded {} contribution phase(s) from {}", phases.len(), path.display());
    Ok(phases)
}

/// Load contribution phases from any reader (e.g., string buffer, request body)
pub fn load_phases_from_reader<R: Read>(reader: R) -> Result<Vec<ContributionPhase>, PlanError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut phases = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PhaseRow = result?;
        phases.push(row.into());
    }

    Ok(phases)
}

/// Load lump sums from a CSV file
pub fn load_lump_sums<P: AsRef<Path>>(path: P) -> Result<Vec<LumpSum>, PlanError> {
    let path = path.as_ref();
    let lump_sums = load_lump_sums_from_reader(File::open(path)?)?;
    log::info!("Loaded {} lump sum(s) from {}", lump_sums.len(), path.display());
    Ok(lump_sums)
}

/// Load lump sums from any reader
pub fn load_lump_sums_from_reader<R: Read>(reader: R) -> Result<Vec<LumpSum>, PlanError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut lump_sums = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LumpSumRow = result?;
        lump_sums.push(row.into());
    }

    Ok(lump_sums)
}

/// Load a complete plan from a JSON file and validate it with the default options
pub fn load_plan_json<P: AsRef<Path>>(path: P) -> Result<Plan, PlanError> {
    load_plan_json_with(path, ValidationOptions::default())
}

/// Load a complete plan from a JSON file and validate it with `options`
pub fn load_plan_json_with<P: AsRef<Path>>(path: P, options: ValidationOptions) -> Result<Plan, PlanError> {
    let path = path.as_ref();
    let plan = load_plan_json_from_reader_with(File::open(path)?, options)?;
    log::info!(
        "Loaded plan from {} ({} phase(s), {} lump sum(s))",
        path.display(),
        plan.phases.len(),
        plan.lump_sums.len()
    );
    Ok(plan)
}

/// Load a complete plan from JSON in any reader and validate it with the default options
pub fn load_plan_json_from_reader<R: Read>(reader: R) -> Result<Plan, PlanError> {
    load_plan_json_from_reader_with(reader, ValidationOptions::default())
}

/// Load a complete plan from JSON in any reader and validate it with `options`
pub fn load_plan_json_from_reader_with<R: Read>(
    reader: R,
    options: ValidationOptions,
) -> Result<Plan, PlanError> {
    let plan: Plan = serde_json::from_reader(reader)?;
    validate_plan_with(&plan, options)?;
    Ok(plan)
}
