//! Growth Projector - retirement savings growth simulation
//!
//! This library provides:
//! - Staged monthly contribution phases with linear annual increases
//! - One-time lump-sum additions at specific ages
//! - Monthly compounding with inflation-adjusted snapshots per age
//! - 4% rule withdrawal income estimates
//! - Parallel batch runs and rate-of-return sweeps

pub mod error;
pub mod plan;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{PlanError, SimulationError, ValidationError, ValidationIssue};
pub use plan::{ContributionPhase, InflationMode, LumpSum, Plan, SimulationParameters};
pub use projection::{simulate, GrowthSimulator, SimulationResult, SimulationSummary, YearSnapshot};
pub use scenario::ScenarioRunner;
