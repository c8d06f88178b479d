//! Behavioural properties of the growth simulator across many inputs

use approx::assert_relative_eq;
use growth_projector::projection::{simulate, FOUR_PERCENT_RULE};
use growth_projector::{ContributionPhase, InflationMode, LumpSum, SimulationParameters};

fn growth(rate: f64) -> f64 {
    1.0 + rate / 12.0
}

#[test]
fn bare_investment_follows_compound_curve() {
    for &(initial, rate, age) in &[(1_000.0, 0.05, 30), (250_000.0, 0.11, 55), (1.0, 0.0, 0)] {
        let params = SimulationParameters::new(initial, rate, age);
        let result = simulate(&params, &[], &[]).unwrap();

        for snapshot in &result.snapshots {
            let months = 12 * (snapshot.age - age + 1) as i32;
            assert_relative_eq!(
                snapshot.nominal_value,
                initial * growth(rate).powi(months),
                max_relative = 1e-12
            );
        }
        assert_eq!(result.total_contributed, initial);
    }
}

#[test]
fn nominal_value_never_decreases_with_non_negative_inputs() {
    let phases = [
        ContributionPhase::new(25, 35, 400.0, 50.0),
        ContributionPhase::level(35, 50, 0.0),
        ContributionPhase::new(50, 67, 1500.0, 10.0),
    ];
    let lump_sums = [LumpSum::new(40, 20_000.0), LumpSum::new(20, 5_000.0)];

    for &rate in &[0.0, 0.03, 0.07, 0.12] {
        let params = SimulationParameters::new(2_000.0, rate, 25).with_inflation(0.03, InflationMode::Annual);
        let result = simulate(&params, &phases, &lump_sums).unwrap();

        for pair in result.snapshots.windows(2) {
            assert!(pair[1].nominal_value >= pair[0].nominal_value);
            assert_eq!(pair[1].age, pair[0].age + 1);
        }
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let params = SimulationParameters::new(80_000.0, 0.07, 22).with_inflation(0.4, InflationMode::TotalOverPeriod);
    let phases = [ContributionPhase::new(22, 52, 2_500.0, 100.0)];
    let lump_sums = [LumpSum::new(40, 50_000.0)];

    let first = simulate(&params, &phases, &lump_sums).unwrap();
    let second = simulate(&params, &phases, &lump_sums).unwrap();
    assert_eq!(first, second);
}

#[test]
fn input_order_does_not_matter_without_ties() {
    let params = SimulationParameters::new(0.0, 0.06, 20);
    let phases = [ContributionPhase::level(30, 40, 900.0), ContributionPhase::level(20, 30, 300.0)];
    let lump_sums = [LumpSum::new(35, 1_000.0), LumpSum::new(25, 2_000.0)];

    let mut reversed_phases = phases;
    reversed_phases.reverse();
    let mut reversed_lump_sums = lump_sums;
    reversed_lump_sums.reverse();

    let a = simulate(&params, &phases, &lump_sums).unwrap();
    let b = simulate(&params, &reversed_phases, &reversed_lump_sums).unwrap();
    assert_eq!(a, b);
}

#[test]
fn lump_sum_at_initial_age_compounds_from_first_month() {
    let params = SimulationParameters::new(1_000.0, 0.06, 30);
    let with_lump = simulate(&params, &[], &[LumpSum::new(30, 1_000.0)]).unwrap();
    let doubled = simulate(&SimulationParameters::new(2_000.0, 0.06, 30), &[], &[]).unwrap();

    assert_relative_eq!(
        with_lump.snapshots[0].nominal_value,
        doubled.snapshots[0].nominal_value,
        max_relative = 1e-12
    );
}

#[test]
fn total_over_period_deflates_by_total_rate() {
    for &(total, years) in &[(0.25, 5u32), (1.0, 30), (0.05, 1)] {
        let params = SimulationParameters::new(10_000.0, 0.07, 40).with_inflation(total, InflationMode::TotalOverPeriod);
        let phases = [ContributionPhase::level(40, 40 + years, 300.0)];
        let result = simulate(&params, &phases, &[]).unwrap();

        assert_eq!(result.period.investment_years(), years as i64);
        assert_relative_eq!(
            result.final_inflation_adjusted_value,
            result.final_nominal_value / (1.0 + total),
            max_relative = 1e-10
        );
    }
}

#[test]
fn example_scenario_from_calculator_defaults() {
    let params = SimulationParameters::new(10_000.0, 0.09, 18).with_inflation(0.023, InflationMode::Annual);
    let result = simulate(
        &params,
        &[ContributionPhase::level(18, 25, 500.0)],
        &[LumpSum::new(22, 10_000.0)],
    )
    .unwrap();

    assert!(result.final_nominal_value > 10_000.0 + 500.0 * 12.0 * 7.0 + 10_000.0);
    assert_relative_eq!(result.total_monthly_contributions(), 42_000.0, epsilon = 1e-6);
    for snapshot in result.snapshots.iter().filter(|s| s.age > 18) {
        assert!(snapshot.inflation_adjusted_value < snapshot.nominal_value);
    }

    let income = result.four_percent_income();
    assert_eq!(income.rate, FOUR_PERCENT_RULE);
    assert_relative_eq!(income.nominal, result.final_nominal_value * 0.04, max_relative = 1e-15);
}

#[test]
fn empty_inputs_with_zero_investment_stay_zero() {
    let params = SimulationParameters::new(0.0, 0.07, 65).with_inflation(0.03, InflationMode::TotalOverPeriod);
    let result = simulate(&params, &[], &[]).unwrap();

    assert!(result.snapshots.iter().all(|s| s.nominal_value == 0.0));
    assert_eq!(result.final_inflation_adjusted_value, 0.0);
    assert_eq!(result.four_percent_income().nominal, 0.0);
}
