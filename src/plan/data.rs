//! Input records for a growth simulation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default parameters matching the original calculator form
pub const DEFAULT_INITIAL_INVESTMENT: f64 = 10_000.0;
pub const DEFAULT_ANNUAL_RATE_OF_RETURN: f64 = 0.07;
pub const DEFAULT_INITIAL_AGE: u32 = 18;
pub const DEFAULT_INFLATION_RATE: f64 = 0.023;

/// Oldest age accepted for the initial age, phase bounds and lump sums
pub const MAX_AGE: u32 = 150;

/// Convert a user-facing percentage (7 for 7%) into a fraction (0.07)
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// How the supplied inflation rate should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationMode {
    /// The rate applies every year
    #[default]
    Annual,
    /// The rate is the cumulative inflation over the whole investment period
    #[serde(alias = "total", alias = "total_over_investment_period")]
    TotalOverPeriod,
}

impl InflationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InflationMode::Annual => "annual",
            InflationMode::TotalOverPeriod => "total_over_period",
        }
    }
}

impl fmt::Display for InflationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InflationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" => Ok(InflationMode::Annual),
            "total" | "total_over_period" | "total_over_investment_period" => {
                Ok(InflationMode::TotalOverPeriod)
            }
            other => Err(format!("Unknown inflation mode: {}", other)),
        }
    }
}

/// A span of ages during which a monthly contribution is made
///
/// `end_age` is exclusive. The monthly amount grows linearly by
/// `annual_increase` for every full year since `start_age`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPhase {
    pub start_age: u32,
    pub end_age: u32,
    pub monthly_contribution: f64,
    #[serde(default)]
    pub annual_increase: f64,
}

impl ContributionPhase {
    pub fn new(start_age: u32, end_age: u32, monthly_contribution: f64, annual_increase: f64) -> Self {
        Self {
            start_age,
            end_age,
            monthly_contribution,
            annual_increase,
        }
    }

    /// Level contribution with no annual increase
    pub fn level(start_age: u32, end_age: u32, monthly_contribution: f64) -> Self {
        Self::new(start_age, end_age, monthly_contribution, 0.0)
    }

    /// Whether the phase contributes at `age`
    pub fn is_active_at(&self, age: u32) -> bool {
        self.start_age <= age && age < self.end_age
    }

    pub fn has_valid_range(&self) -> bool {
        self.start_age < self.end_age
    }

    /// Monthly contribution in effect at `age`
    ///
    /// Callers must check [`is_active_at`](Self::is_active_at) first; the
    /// increase is linear in the years elapsed since the phase began.
    pub fn monthly_contribution_at(&self, age: u32) -> f64 {
        let years_in_phase = age.saturating_sub(self.start_age);
        self.monthly_contribution + years_in_phase as f64 * self.annual_increase
    }

    /// Last age (inclusive) at which the phase contributes
    pub fn last_contributing_age(&self) -> u32 {
        self.end_age.saturating_sub(1)
    }
}

/// A one-time deposit applied at the start of the simulated year for `age`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSum {
    pub age: u32,
    pub amount: f64,
}

impl LumpSum {
    pub fn new(age: u32, amount: f64) -> Self {
        Self { age, amount }
    }
}

/// Scalar parameters of a simulation
///
/// Rates are fractions (0.07 for 7%), never percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    #[serde(default)]
    pub initial_investment: f64,
    pub annual_rate_of_return: f64,
    pub initial_age: u32,
    #[serde(default)]
    pub inflation_rate: f64,
    #[serde(default)]
    pub inflation_mode: InflationMode,
}

impl SimulationParameters {
    pub fn new(initial_investment: f64, annual_rate_of_return: f64, initial_age: u32) -> Self {
        Self {
            initial_investment,
            annual_rate_of_return,
            initial_age,
            inflation_rate: 0.0,
            inflation_mode: InflationMode::Annual,
        }
    }

    pub fn with_inflation(mut self, inflation_rate: f64, inflation_mode: InflationMode) -> Self {
        self.inflation_rate = inflation_rate;
        self.inflation_mode = inflation_mode;
        self
    }

    /// Growth factor applied once per simulated month
    pub fn monthly_growth_factor(&self) -> f64 {
        1.0 + self.annual_rate_of_return / 12.0
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_INVESTMENT, DEFAULT_ANNUAL_RATE_OF_RETURN, DEFAULT_INITIAL_AGE)
            .with_inflation(DEFAULT_INFLATION_RATE, InflationMode::Annual)
    }
}

/// Everything needed for one simulation call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub params: SimulationParameters,
    #[serde(default)]
    pub phases: Vec<ContributionPhase>,
    #[serde(default)]
    pub lump_sums: Vec<LumpSum>,
}

impl Plan {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            params,
            phases: Vec::new(),
            lump_sums: Vec::new(),
        }
    }

    pub fn with_phase(mut self, phase: ContributionPhase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_lump_sum(mut self, lump_sum: LumpSum) -> Self {
        self.lump_sums.push(lump_sum);
        self
    }

    /// Same plan with a different annual rate of return
    pub fn with_rate_of_return(&self, annual_rate_of_return: f64) -> Self {
        let mut plan = self.clone();
        plan.params.annual_rate_of_return = annual_rate_of_return;
        plan
    }
}
