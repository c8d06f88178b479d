//! Upstream validation of plan inputs
//!
//! The simulator only refuses inverted phase ranges. Everything else a
//! caller should reject before simulating (bad magnitudes, overlapping
//! phases) is checked here and reported all at once.

use super::{ContributionPhase, Plan, MAX_AGE};
use crate::error::{ValidationError, ValidationIssue};

/// Which checks to run
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Report phases that are active at the same age
    pub reject_overlaps: bool,
    /// Report negative monthly contributions, increases and lump sums
    pub reject_negative_amounts: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            reject_overlaps: true,
            reject_negative_amounts: true,
        }
    }
}

/// Validate a plan with the default options
pub fn validate_plan(plan: &Plan) -> Result<(), ValidationError> {
    validate_plan_with(plan, ValidationOptions::default())
}

/// Validate a plan, collecting every issue rather than stopping at the first
pub fn validate_plan_with(plan: &Plan, options: ValidationOptions) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    let params = &plan.params;

    check_age(&mut issues, "initial_age", params.initial_age);
    check_amount(&mut issues, "initial_investment", params.initial_investment, true);
    check_finite(&mut issues, "annual_rate_of_return", params.annual_rate_of_return);
    check_finite(&mut issues, "inflation_rate", params.inflation_rate);

    if params.annual_rate_of_return.is_finite() && params.monthly_growth_factor() <= 0.0 {
        issues.push(ValidationIssue::RateOfReturnTooLow(params.annual_rate_of_return));
    }

    for (index, phase) in plan.phases.iter().enumerate() {
        if !phase.has_valid_range() {
            issues.push(ValidationIssue::InvertedPhaseRange {
                index,
                start_age: phase.start_age,
                end_age: phase.end_age,
            });
        }
        check_age(&mut issues, &format!("phases[{}].start_age", index), phase.start_age);
        check_age(&mut issues, &format!("phases[{}].end_age", index), phase.end_age);
        check_amount(
            &mut issues,
            &format!("phases[{}].monthly_contribution", index),
            phase.monthly_contribution,
            options.reject_negative_amounts,
        );
        check_amount(
            &mut issues,
            &format!("phases[{}].annual_increase", index),
            phase.annual_increase,
            options.reject_negative_amounts,
        );
    }

    for (index, lump_sum) in plan.lump_sums.iter().enumerate() {
        check_age(&mut issues, &format!("lump_sums[{}].age", index), lump_sum.age);
        check_amount(
            &mut issues,
            &format!("lump_sums[{}].amount", index),
            lump_sum.amount,
            options.reject_negative_amounts,
        );
    }

    if options.reject_overlaps {
        issues.extend(find_overlaps(&plan.phases));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        log::debug!("Plan rejected with {} validation issue(s)", issues.len());
        Err(ValidationError { issues })
    }
}

/// Report the first shared age of every pair of overlapping phases
///
/// Phases with inverted ranges are skipped; they are reported separately.
pub fn find_overlaps(phases: &[ContributionPhase]) -> Vec<ValidationIssue> {
    let mut overlaps = Vec::new();

    for (first, a) in phases.iter().enumerate() {
        if !a.has_valid_range() {
            continue;
        }
        for (offset, b) in phases[first + 1..].iter().enumerate() {
            if !b.has_valid_range() {
                continue;
            }
            let shared_start = a.start_age.max(b.start_age);
            let shared_end = a.end_age.min(b.end_age);
            if shared_start < shared_end {
                overlaps.push(ValidationIssue::OverlappingPhases {
                    first,
                    second: first + 1 + offset,
                    age: shared_start,
                });
            }
        }
    }

    overlaps
}

fn check_age(issues: &mut Vec<ValidationIssue>, field: &str, age: u32) {
    if age > MAX_AGE {
        issues.push(ValidationIssue::AgeOutOfRange {
            field: field.to_string(),
            age,
            max: MAX_AGE,
        });
    }
}

fn check_finite(issues: &mut Vec<ValidationIssue>, field: &str, value: f64) {
    if !value.is_finite() {
        issues.push(ValidationIssue::NonFinite {
            field: field.to_string(),
            value,
        });
    }
}

fn check_amount(issues: &mut Vec<ValidationIssue>, field: &str, value: f64, reject_negative: bool) {
    if !value.is_finite() {
        check_finite(issues, field, value);
    } else if reject_negative && value < 0.0 {
        issues.push(ValidationIssue::Negative {
            field: field.to_string(),
            value,
        });
    }
}
