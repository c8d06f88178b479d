//! Running state of a growth simulation

/// Balance and running totals carried from one simulated month to the next
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Age currently being simulated
    pub age: u32,

    /// Portfolio value before inflation adjustment
    pub nominal_value: f64,

    pub initial_investment: f64,

    /// Sum of monthly contributions applied so far
    pub total_monthly_contributed: f64,

    /// Sum of lump sums applied so far
    pub total_lump_sums_added: f64,

    /// Effective monthly contribution for the current age
    pub monthly_contribution: f64,
}

impl SimulationState {
    /// Start the simulation at `start_age` holding the initial investment
    pub fn new(initial_investment: f64, start_age: u32) -> Self {
        Self {
            age: start_age,
            nominal_value: initial_investment,
            initial_investment,
            total_monthly_contributed: 0.0,
            total_lump_sums_added: 0.0,
            monthly_contribution: 0.0,
        }
    }

    /// Move to the next age
    pub fn advance_year(&mut self) {
        self.age += 1;
        self.monthly_contribution = 0.0;
    }

    pub fn apply_lump_sum(&mut self, amount: f64) {
        self.nominal_value += amount;
        self.total_lump_sums_added += amount;
    }

    /// Add one month's contribution to the balance
    pub fn contribute(&mut self, amount: f64) {
        self.nominal_value += amount;
        self.total_monthly_contributed += amount;
    }

    /// Apply one month of growth
    pub fn grow(&mut self, monthly_factor: f64) {
        self.nominal_value *= monthly_factor;
    }

    /// Initial investment plus all contributions and lump sums so far
    pub fn contributed_to_date(&self) -> f64 {
        self.initial_investment + self.total_monthly_contributed + self.total_lump_sums_added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_totals() {
        let mut state = SimulationState::new(1000.0, 30);
        state.apply_lump_sum(500.0);
        state.contribute(100.0);
        state.grow(1.01);

        assert!((state.nominal_value - 1616.0).abs() < 1e-9);
        assert_eq!(state.total_lump_sums_added, 500.0);
        assert_eq!(state.total_monthly_contributed, 100.0);
        assert_eq!(state.contributed_to_date(), 1600.0);

        state.monthly_contribution = 100.0;
        state.advance_year();
        assert_eq!(state.age, 31);
        assert_eq!(state.monthly_contribution, 0.0);
    }
}
