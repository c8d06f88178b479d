//! Error types for plan loading, validation and simulation

use thiserror::Error;

/// Structural failure surfaced by the simulator itself
///
/// The simulator fails fast: if any phase is malformed no snapshot is
/// produced and no totals are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("phase {index} has an empty age range: start age {start_age} is not below end age {end_age}")]
    InvalidPhaseRange {
        index: usize,
        start_age: u32,
        end_age: u32,
    },
}

/// A single problem found by the upstream validation layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    #[error("phase {index}: start age {start_age} must be below end age {end_age}")]
    InvertedPhaseRange {
        index: usize,
        start_age: u32,
        end_age: u32,
    },

    #[error("phases {first} and {second} are both active at age {age}")]
    OverlappingPhases {
        first: usize,
        second: usize,
        age: u32,
    },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("annual rate of return {0} would make the monthly growth factor non-positive")]
    RateOfReturnTooLow(f64),

    #[error("{field} is {age}, above the maximum age of {max}")]
    AgeOutOfRange { field: String, age: u32, max: u32 },
}

/// Every issue found while validating a plan
#[derive(Error, Debug, Clone, PartialEq)]
#[error("plan failed validation with {} issue(s): {}", .issues.len(), summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while reading, validating or running a plan
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
