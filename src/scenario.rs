//! Scenario runner for batch simulations
//!
//! Each simulation is independent, so batches and rate sweeps run in
//! parallel on the rayon thread pool.

use crate::plan::{validate_plan_with, Plan, ValidationOptions};
use crate::projection::{simulate_plan, SimulationResult};
use crate::{PlanError, SimulationError};
use rayon::prelude::*;
use serde::Serialize;

/// Outcome of one point in a rate-of-return sweep
#[derive(Debug, Clone, Serialize)]
pub struct RateSweepPoint {
    pub annual_rate_of_return: f64,
    pub final_nominal_value: f64,
    pub final_inflation_adjusted_value: f64,
    pub total_contributed: f64,
    pub four_percent_income: f64,
}

impl RateSweepPoint {
    fn from_result(annual_rate_of_return: f64, result: &SimulationResult) -> Self {
        Self {
            annual_rate_of_return,
            final_nominal_value: result.final_nominal_value,
            final_inflation_adjusted_value: result.final_inflation_adjusted_value,
            total_contributed: result.total_contributed,
            four_percent_income: result.four_percent_income().nominal,
        }
    }
}

/// Runs plans, optionally validating them first
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let points = runner.rate_sweep(&plan, &[0.05, 0.07, 0.09])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Validation applied before simulating; `None` skips validation
    validation: Option<ValidationOptions>,
}

impl ScenarioRunner {
    /// Runner that validates every plan with the default options
    pub fn new() -> Self {
        Self {
            validation: Some(ValidationOptions::default()),
        }
    }

    /// Runner that hands plans straight to the simulator
    pub fn unvalidated() -> Self {
        Self { validation: None }
    }

    pub fn with_validation(options: ValidationOptions) -> Self {
        Self {
            validation: Some(options),
        }
    }

    /// Validate (if configured) and simulate a single plan
    pub fn run(&self, plan: &Plan) -> Result<SimulationResult, PlanError> {
        if let Some(options) = self.validation {
            validate_plan_with(plan, options)?;
        }
        simulate_plan(plan).map_err(|err| {
            log::warn!("Simulation rejected plan: {}", err);
            PlanError::from(err)
        })
    }

    /// Run many plans in parallel, preserving input order
    pub fn run_batch(&self, plans: &[Plan]) -> Vec<Result<SimulationResult, PlanError>> {
        log::info!("Running batch of {} plan(s)", plans.len());
        plans.par_iter().map(|plan| self.run(plan)).collect()
    }

    /// Run one plan at several rates of return in parallel
    pub fn rate_sweep(&self, plan: &Plan, rates: &[f64]) -> Result<Vec<RateSweepPoint>, PlanError> {
        if let Some(options) = self.validation {
            validate_plan_with(plan, options)?;
        }
        log::info!("Sweeping {} rate(s) of return", rates.len());

        let points: Result<Vec<_>, SimulationError> = rates
            .par_iter()
            .map(|&rate| {
                let result = simulate_plan(&plan.with_rate_of_return(rate))?;
                Ok(RateSweepPoint::from_result(rate, &result))
            })
            .collect();

        points.map_err(PlanError::from)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Evenly spaced rates from `start` to `end` inclusive
pub fn rate_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || end < start {
        return vec![start];
    }
    let count = ((end - start) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ContributionPhase, LumpSum, SimulationParameters};
    use crate::projection::simulate;

    fn test_plan() -> Plan {
        Plan::new(SimulationParameters::new(10_000.0, 0.07, 30))
            .with_phase(ContributionPhase::new(30, 60, 500.0, 20.0))
            .with_lump_sum(LumpSum::new(45, 25_000.0))
    }

    #[test]
    fn test_rate_sweep_is_ordered_and_increasing() {
        let runner = ScenarioRunner::new();
        let points = runner.rate_sweep(&test_plan(), &[0.03, 0.05, 0.07]).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].annual_rate_of_return, 0.03);
        // Higher return should result in higher final value
        assert!(points[2].final_nominal_value > points[1].final_nominal_value);
        assert!(points[1].final_nominal_value > points[0].final_nominal_value);
        // Contributions do not depend on the rate
        assert!((points[0].total_contributed - points[2].total_contributed).abs() < 1e-6);
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let plans = vec![test_plan(), test_plan().with_rate_of_return(0.1)];
        let results = ScenarioRunner::new().run_batch(&plans);

        assert_eq!(results.len(), 2);
        let expected = simulate(&plans[1].params, &plans[1].phases, &plans[1].lump_sums).unwrap();
        assert_eq!(results[1].as_ref().unwrap(), &expected);
    }

    #[test]
    fn test_validation_rejects_overlaps_but_unvalidated_runs() {
        let plan = test_plan().with_phase(ContributionPhase::level(50, 55, 1000.0));

        assert!(matches!(ScenarioRunner::new().run(&plan), Err(PlanError::Validation(_))));
        assert!(ScenarioRunner::unvalidated().run(&plan).is_ok());
    }

    #[test]
    fn test_unvalidated_still_fails_on_inverted_range() {
        let plan = test_plan().with_phase(ContributionPhase::level(70, 65, 100.0));
        assert!(matches!(
            ScenarioRunner::unvalidated().run(&plan),
            Err(PlanError::Simulation(SimulationError::InvalidPhaseRange { index: 1, .. }))
        ));
    }

    #[test]
    fn test_rate_range() {
        let rates = rate_range(0.04, 0.08, 0.01);
        assert_eq!(rates.len(), 5);
        assert!((rates[4] - 0.08).abs() < 1e-12);
        assert_eq!(rate_range(0.05, 0.01, 0.01), vec![0.05]);
    }
}
