//! Output structures for growth simulations

use serde::{Deserialize, Serialize};

/// Safe withdrawal rate of the 4% rule
pub const FOUR_PERCENT_RULE: f64 = 0.04;

/// Portfolio value at the end of one simulated age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub age: u32,
    pub nominal_value: f64,
    pub inflation_adjusted_value: f64,

    /// Effective monthly contribution applied during this age (0 if none)
    pub monthly_contribution: f64,

    /// Initial investment plus every contribution and lump sum so far
    pub contributed_to_date: f64,
}

/// Inclusive age range the simulator walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationPeriod {
    pub min_age: u32,
    pub max_age: u32,
    pub initial_age: u32,
}

impl SimulationPeriod {
    /// Years between the initial age and the last simulated age
    pub fn investment_years(&self) -> i64 {
        self.max_age as i64 - self.initial_age as i64
    }

    /// Number of ages simulated, including those before the initial age
    pub fn simulated_ages(&self) -> u32 {
        (self.max_age - self.min_age).saturating_add(1)
    }
}

/// Annual income supported by a withdrawal rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalIncome {
    pub rate: f64,
    pub nominal: f64,
    pub inflation_adjusted: f64,
}

/// Complete simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One snapshot per age from the initial age onward, in increasing age order
    pub snapshots: Vec<YearSnapshot>,

    pub final_nominal_value: f64,
    pub final_inflation_adjusted_value: f64,

    /// Initial investment + all monthly contributions + all lump sums
    pub total_contributed: f64,
    pub total_lump_sums_added: f64,

    pub initial_investment: f64,
    pub period: SimulationPeriod,

    /// Equivalent annual inflation rate used for the adjustment
    pub annual_inflation_rate: f64,
}

impl SimulationResult {
    /// Sum of the monthly contributions actually applied
    pub fn total_monthly_contributions(&self) -> f64 {
        self.total_contributed - self.initial_investment - self.total_lump_sums_added
    }

    /// Growth earned beyond what was put in
    pub fn total_growth(&self) -> f64 {
        self.final_nominal_value - self.total_contributed
    }

    /// Snapshot recorded for `age`, if any
    pub fn snapshot_at(&self, age: u32) -> Option<&YearSnapshot> {
        self.snapshots
            .binary_search_by_key(&age, |s| s.age)
            .ok()
            .map(|i| &self.snapshots[i])
    }

    /// Sustainable annual income at the given withdrawal rate
    pub fn withdrawal_income(&self, rate: f64) -> WithdrawalIncome {
        WithdrawalIncome {
            rate,
            nominal: self.final_nominal_value * rate,
            inflation_adjusted: self.final_inflation_adjusted_value * rate,
        }
    }

    /// Annual income under the 4% rule
    pub fn four_percent_income(&self) -> WithdrawalIncome {
        self.withdrawal_income(FOUR_PERCENT_RULE)
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            years_simulated: self.snapshots.len() as u32,
            investment_years: self.period.investment_years(),
            final_nominal_value: self.final_nominal_value,
            final_inflation_adjusted_value: self.final_inflation_adjusted_value,
            total_contributed: self.total_contributed,
            total_monthly_contributions: self.total_monthly_contributions(),
            total_lump_sums_added: self.total_lump_sums_added,
            total_growth: self.total_growth(),
            four_percent_income: self.four_percent_income(),
        }
    }
}

/// Summary statistics for a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub years_simulated: u32,
    pub investment_years: i64,
    pub final_nominal_value: f64,
    pub final_inflation_adjusted_value: f64,
    pub total_contributed: f64,
    pub total_monthly_contributions: f64,
    pub total_lump_sums_added: f64,
    pub total_growth: f64,
    pub four_percent_income: WithdrawalIncome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> SimulationResult {
        SimulationResult {
            snapshots: vec![
                YearSnapshot {
                    age: 30,
                    nominal_value: 110_000.0,
                    inflation_adjusted_value: 110_000.0,
                    monthly_contribution: 500.0,
                    contributed_to_date: 106_000.0,
                },
                YearSnapshot {
                    age: 31,
                    nominal_value: 125_000.0,
                    inflation_adjusted_value: 120_000.0,
                    monthly_contribution: 500.0,
                    contributed_to_date: 117_000.0,
                },
            ],
            final_nominal_value: 125_000.0,
            final_inflation_adjusted_value: 120_000.0,
            total_contributed: 117_000.0,
            total_lump_sums_added: 5_000.0,
            initial_investment: 100_000.0,
            period: SimulationPeriod { min_age: 30, max_age: 31, initial_age: 30 },
            annual_inflation_rate: 0.04,
        }
    }

    #[test]
    fn test_simulated_ages_saturates() {
        assert_eq!(SimulationPeriod { min_age: 18, max_age: 25, initial_age: 18 }.simulated_ages(), 8);
        let widest = SimulationPeriod { min_age: 0, max_age: u32::MAX, initial_age: 0 };
        assert_eq!(widest.simulated_ages(), u32::MAX);
    }

    #[test]
    fn test_four_percent_income() {
        let income = sample_result().four_percent_income();
        assert_eq!(income.rate, 0.04);
        assert!((income.nominal - 5_000.0).abs() < 1e-9);
        assert!((income.inflation_adjusted - 4_800.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_totals() {
        let summary = sample_result().summary();
        assert_eq!(summary.years_simulated, 2);
        assert_eq!(summary.investment_years, 1);
        assert!((summary.total_monthly_contributions - 12_000.0).abs() < 1e-9);
        assert!((summary.total_growth - 8_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_lookup() {
        let result = sample_result();
        assert_eq!(result.snapshot_at(31).map(|s| s.nominal_value), Some(125_000.0));
        assert!(result.snapshot_at(29).is_none());
    }
}
