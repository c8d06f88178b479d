//! Plan inputs: contribution phases, lump sums and simulation parameters

mod data;
pub mod loader;
mod validate;

pub use data::{
    percent_to_fraction, ContributionPhase, InflationMode, LumpSum, Plan, SimulationParameters,
    DEFAULT_ANNUAL_RATE_OF_RETURN, DEFAULT_INFLATION_RATE, DEFAULT_INITIAL_AGE,
    DEFAULT_INITIAL_INVESTMENT, MAX_AGE,
};
pub use loader::{load_lump_sums, load_phases, load_plan_json, load_plan_json_with};
pub use validate::{find_overlaps, validate_plan, validate_plan_with, ValidationOptions};
