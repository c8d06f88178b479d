//! Core growth simulator: staged monthly contributions, lump sums and
//! monthly compounding, walked one age at a time

use crate::error::SimulationError;
use crate::plan::{ContributionPhase, LumpSum, Plan, SimulationParameters, MAX_AGE};
use super::inflation::InflationAdjuster;
use super::snapshots::{SimulationPeriod, SimulationResult, YearSnapshot};
use super::state::SimulationState;

/// Compounding periods per simulated year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Run a simulation for the given parameters, phases and lump sums
///
/// Phases and lump sums may be in any order. Fails without producing a
/// partial result if any phase has `start_age >= end_age`.
pub fn simulate(
    params: &SimulationParameters,
    phases: &[ContributionPhase],
    lump_sums: &[LumpSum],
) -> Result<SimulationResult, SimulationError> {
    GrowthSimulator::new(*params).simulate(phases, lump_sums)
}

/// Run a simulation for a bundled plan
pub fn simulate_plan(plan: &Plan) -> Result<SimulationResult, SimulationError> {
    simulate(&plan.params, &plan.phases, &plan.lump_sums)
}

/// Inclusive age range to simulate
///
/// Spans the initial age and every phase and lump sum. A bare initial
/// deposit with nothing after the initial age is extended by one year so
/// that growth is visible.
pub fn simulation_period(
    params: &SimulationParameters,
    phases: &[ContributionPhase],
    lump_sums: &[LumpSum],
) -> SimulationPeriod {
    let initial_age = params.initial_age;

    let min_age = phases
        .iter()
        .map(|p| p.start_age)
        .chain(lump_sums.iter().map(|ls| ls.age))
        .fold(initial_age, u32::min);

    let mut max_age = phases
        .iter()
        .map(|p| p.end_age)
        .chain(lump_sums.iter().map(|ls| ls.age))
        .fold(initial_age, u32::max);

    if max_age <= initial_age && params.initial_investment > 0.0 {
        max_age = initial_age.saturating_add(1);
    }

    SimulationPeriod {
        min_age,
        max_age,
        initial_age,
    }
}

/// Choose the phase contributing at `age` from phases sorted by start age
///
/// When several phases are active the last one in sorted order wins: the
/// greatest start age, and for equal start ages the one supplied later.
pub fn active_phase(sorted_phases: &[ContributionPhase], age: u32) -> Option<&ContributionPhase> {
    sorted_phases.iter().rev().find(|p| p.is_active_at(age))
}

/// Growth simulator bound to one set of parameters
#[derive(Debug, Clone)]
pub struct GrowthSimulator {
    params: SimulationParameters,
}

impl GrowthSimulator {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Run the simulation
    pub fn simulate(
        &self,
        phases: &[ContributionPhase],
        lump_sums: &[LumpSum],
    ) -> Result<SimulationResult, SimulationError> {
        check_phase_ranges(phases)?;

        // Stable sorts keep input order among equal ages
        let mut phases = phases.to_vec();
        phases.sort_by_key(|p| p.start_age);
        let mut lump_sums = lump_sums.to_vec();
        lump_sums.sort_by_key(|ls| ls.age);

        let params = &self.params;
        let period = simulation_period(params, &phases, &lump_sums);
        let adjuster = InflationAdjuster::from_mode(
            params.inflation_rate,
            params.inflation_mode,
            period.investment_years(),
        );
        let monthly_factor = params.monthly_growth_factor();

        let mut state = SimulationState::new(params.initial_investment, period.min_age);
        // Unvalidated ages can span most of u32; only reserve for realistic lifetimes
        let recorded_ages = period.max_age.saturating_sub(params.initial_age).min(MAX_AGE) as usize + 1;
        let mut snapshots = Vec::with_capacity(recorded_ages);

        loop {
            self.simulate_year(&mut state, &phases, &lump_sums, monthly_factor);

            if state.age >= params.initial_age {
                let years_elapsed = state.age - params.initial_age;
                snapshots.push(YearSnapshot {
                    age: state.age,
                    nominal_value: state.nominal_value,
                    inflation_adjusted_value: adjuster.adjust(state.nominal_value, years_elapsed),
                    monthly_contribution: state.monthly_contribution,
                    contributed_to_date: state.contributed_to_date(),
                });
            }

            if state.age >= period.max_age {
                break;
            }
            state.advance_year();
        }

        let final_inflation_adjusted_value = snapshots
            .last()
            .map(|s| s.inflation_adjusted_value)
            .unwrap_or(params.initial_investment);

        Ok(SimulationResult {
            snapshots,
            final_nominal_value: state.nominal_value,
            final_inflation_adjusted_value,
            total_contributed: state.contributed_to_date(),
            total_lump_sums_added: state.total_lump_sums_added,
            initial_investment: params.initial_investment,
            period,
            annual_inflation_rate: adjuster.annual_rate(),
        })
    }

    /// Lump sums, then twelve months of contribution and growth
    fn simulate_year(
        &self,
        state: &mut SimulationState,
        sorted_phases: &[ContributionPhase],
        sorted_lump_sums: &[LumpSum],
        monthly_factor: f64,
    ) {
        let age = state.age;

        for lump_sum in sorted_lump_sums.iter().filter(|ls| ls.age == age) {
            state.apply_lump_sum(lump_sum.amount);
        }

        // Contributions only start once the investor reaches the initial age
        let contributing = age >= self.params.initial_age;
        let monthly_contribution = match active_phase(sorted_phases, age) {
            Some(phase) if contributing => phase.monthly_contribution_at(age),
            _ => 0.0,
        };
        state.monthly_contribution = monthly_contribution;

        for _month in 0..MONTHS_PER_YEAR {
            if contributing {
                state.contribute(monthly_contribution);
            }
            state.grow(monthly_factor);
        }
    }
}

fn check_phase_ranges(phases: &[ContributionPhase]) -> Result<(), SimulationError> {
    match phases.iter().position(|p| !p.has_valid_range()) {
        Some(index) => Err(SimulationError::InvalidPhaseRange {
            index,
            start_age: phases[index].start_age,
            end_age: phases[index].end_age,
        }),
        None => Ok(()),
    }
}
