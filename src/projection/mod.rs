//! Growth simulation engine

mod state;
mod engine;
mod inflation;
mod snapshots;

pub use state::SimulationState;
pub use engine::{
    active_phase, simulate, simulate_plan, simulation_period, GrowthSimulator, MONTHS_PER_YEAR,
};
pub use inflation::{equivalent_annual_rate, InflationAdjuster};
pub use snapshots::{
    SimulationPeriod, SimulationResult, SimulationSummary, WithdrawalIncome, YearSnapshot,
    FOUR_PERCENT_RULE,
};
