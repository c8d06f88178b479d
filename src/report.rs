//! Rendering simulation results as text tables, CSV and JSON

use crate::error::PlanError;
use crate::plan::{InflationMode, Plan};
use crate::projection::{SimulationResult, SimulationSummary, YearSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// CSV row for one snapshot
#[derive(Debug, Serialize)]
struct SnapshotRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "NominalValue")]
    nominal_value: String,
    #[serde(rename = "InflationAdjustedValue")]
    inflation_adjusted_value: String,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: String,
    #[serde(rename = "ContributedToDate")]
    contributed_to_date: String,
}

impl From<&YearSnapshot> for SnapshotRow {
    fn from(s: &YearSnapshot) -> Self {
        // Rounding happens only here, at the presentation boundary
        Self {
            age: s.age,
            nominal_value: format!("{:.2}", s.nominal_value),
            inflation_adjusted_value: format!("{:.2}", s.inflation_adjusted_value),
            monthly_contribution: format!("{:.2}", s.monthly_contribution),
            contributed_to_date: format!("{:.2}", s.contributed_to_date),
        }
    }
}

/// Write one CSV row per snapshot
pub fn write_snapshots_csv<W: Write>(writer: W, result: &SimulationResult) -> Result<(), PlanError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for snapshot in &result.snapshots {
        csv_writer.serialize(SnapshotRow::from(snapshot))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// JSON document bundling a plan with its result
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub plan: &'a Plan,
    pub summary: SimulationSummary,
    pub result: &'a SimulationResult,
}

impl<'a> JsonReport<'a> {
    pub fn new(plan: &'a Plan, result: &'a SimulationResult) -> Self {
        Self {
            generated_at: Utc::now(),
            plan,
            summary: result.summary(),
            result,
        }
    }
}

pub fn write_json_report<W: Write>(writer: W, plan: &Plan, result: &SimulationResult) -> Result<(), PlanError> {
    serde_json::to_writer_pretty(writer, &JsonReport::new(plan, result))?;
    Ok(())
}

/// Format a dollar amount with thousands separators, e.g. `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Describe how inflation was interpreted, e.g. "2.30% (Annual Rate)"
pub fn describe_inflation(plan: &Plan, result: &SimulationResult) -> String {
    let rate = plan.params.inflation_rate * 100.0;
    match plan.params.inflation_mode {
        InflationMode::Annual => format!("{:.2}% (Annual Rate)", rate),
        InflationMode::TotalOverPeriod => format!(
            "{:.2}% (Total Rate over Investment Period of {} years)",
            rate,
            result.period.investment_years()
        ),
    }
}

/// Year-by-year table followed by the results summary
pub fn render_text<W: Write>(mut out: W, plan: &Plan, result: &SimulationResult) -> std::io::Result<()> {
    let params = &plan.params;

    writeln!(out, "Input Parameters:")?;
    writeln!(out, "  Initial Investment: {}", format_currency(params.initial_investment))?;
    writeln!(out, "  Starting Age: {}", params.initial_age)?;
    writeln!(out, "  Estimated Annual Rate of Return: {:.2}%", params.annual_rate_of_return * 100.0)?;
    writeln!(out, "  Inflation Rate: {}", describe_inflation(plan, result))?;

    writeln!(out, "\nContribution Phases:")?;
    if plan.phases.is_empty() {
        writeln!(out, "  No specific contribution phases defined.")?;
    }
    for (i, phase) in plan.phases.iter().enumerate() {
        writeln!(
            out,
            "  Phase {}: Ages {} to {} (Monthly: {}, Annual Inc.: {})",
            i + 1,
            phase.start_age,
            phase.last_contributing_age(),
            format_currency(phase.monthly_contribution),
            format_currency(phase.annual_increase),
        )?;
    }

    writeln!(out, "\nLump Sum Additions:")?;
    if plan.lump_sums.is_empty() {
        writeln!(out, "  No lump sum additions.")?;
    }
    for (i, lump_sum) in plan.lump_sums.iter().enumerate() {
        writeln!(out, "  Lump Sum {}: At Age {} - {}", i + 1, lump_sum.age, format_currency(lump_sum.amount))?;
    }

    writeln!(out, "\n{:>5} {:>15} {:>20} {:>20} {:>20}", "Age", "Monthly Cont.", "Nominal Value", "Inflation-Adj.", "Contributed")?;
    writeln!(out, "{}", "-".repeat(84))?;
    for s in &result.snapshots {
        writeln!(
            out,
            "{:>5} {:>15} {:>20} {:>20} {:>20}",
            s.age,
            format_currency(s.monthly_contribution),
            format_currency(s.nominal_value),
            format_currency(s.inflation_adjusted_value),
            format_currency(s.contributed_to_date),
        )?;
    }

    let summary = result.summary();
    writeln!(out, "\nResults Summary:")?;
    writeln!(out, "  Final Nominal Value: {}", format_currency(summary.final_nominal_value))?;
    writeln!(out, "  Final Inflation-Adjusted Value: {}", format_currency(summary.final_inflation_adjusted_value))?;
    writeln!(
        out,
        "  Total Contributed (Initial + Monthly + Lump Sums): {}",
        format_currency(summary.total_contributed)
    )?;
    writeln!(out, "  Total Monthly Contributions Only: {}", format_currency(summary.total_monthly_contributions))?;
    writeln!(out, "  Total Lump Sums Added: {}", format_currency(summary.total_lump_sums_added))?;
    writeln!(
        out,
        "  4% Rule Annual Income (Nominal): {}",
        format_currency(summary.four_percent_income.nominal)
    )?;
    writeln!(
        out,
        "  4% Rule Annual Income (Inflation-Adjusted): {}",
        format_currency(summary.four_percent_income.inflation_adjusted)
    )?;

    Ok(())
}
