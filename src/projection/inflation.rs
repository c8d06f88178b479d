//! Inflation normalisation
//!
//! A single equivalent annual rate is derived before the simulation runs and
//! used to deflate every snapshot back to initial-age purchasing power.

use crate::plan::InflationMode;

/// Equivalent annual inflation rate for the given mode
///
/// For [`InflationMode::TotalOverPeriod`] the total rate `r` over
/// `investment_years` years becomes `(1 + r)^(1/N) - 1`. A period of zero
/// (or fewer) years means no adjustment and yields 0.
pub fn equivalent_annual_rate(rate: f64, mode: InflationMode, investment_years: i64) -> f64 {
    match mode {
        InflationMode::Annual => rate,
        InflationMode::TotalOverPeriod => {
            if investment_years > 0 {
                (1.0 + rate).powf(1.0 / investment_years as f64) - 1.0
            } else {
                0.0
            }
        }
    }
}

/// Deflator applied to nominal values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationAdjuster {
    annual_rate: f64,
}

impl InflationAdjuster {
    pub fn new(annual_rate: f64) -> Self {
        Self { annual_rate }
    }

    pub fn from_mode(rate: f64, mode: InflationMode, investment_years: i64) -> Self {
        Self::new(equivalent_annual_rate(rate, mode, investment_years))
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Deflate `nominal` by `years_elapsed` years of inflation
    ///
    /// Returns the nominal value unchanged when the rate is zero or the
    /// cumulative factor is not positive.
    pub fn adjust(&self, nominal: f64, years_elapsed: u32) -> f64 {
        if self.annual_rate == 0.0 {
            return nominal;
        }
        let base = 1.0 + self.annual_rate;
        let factor = match i32::try_from(years_elapsed) {
            Ok(years) => base.powi(years),
            Err(_) => base.powf(f64::from(years_elapsed)),
        };
        if factor > 0.0 {
            nominal / factor
        } else {
            nominal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_mode_uses_rate_directly() {
        assert_eq!(equivalent_annual_rate(0.023, InflationMode::Annual, 40), 0.023);
        assert_eq!(equivalent_annual_rate(0.023, InflationMode::Annual, 0), 0.023);
    }

    #[test]
    fn test_total_mode_compounds_back_to_total() {
        let annual = equivalent_annual_rate(0.5, InflationMode::TotalOverPeriod, 10);
        assert_relative_eq!((1.0 + annual).powi(10), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_total_mode_degenerate_period() {
        assert_eq!(equivalent_annual_rate(0.5, InflationMode::TotalOverPeriod, 0), 0.0);
        assert_eq!(equivalent_annual_rate(0.5, InflationMode::TotalOverPeriod, -3), 0.0);
    }

    #[test]
    fn test_adjust() {
        let adjuster = InflationAdjuster::new(0.02);
        assert_eq!(adjuster.adjust(1000.0, 0), 1000.0);
        assert_relative_eq!(adjuster.adjust(1040.4, 2), 1000.0, epsilon = 1e-9);
        assert_eq!(InflationAdjuster::new(0.0).adjust(1000.0, 10), 1000.0);
    }

    #[test]
    fn test_non_positive_factor_leaves_value_unchanged() {
        let adjuster = InflationAdjuster::new(-1.0);
        assert_eq!(adjuster.adjust(500.0, 3), 500.0);
    }

    #[test]
    fn test_adjust_keeps_deflating_past_i32_range() {
        let adjuster = InflationAdjuster::new(0.02);
        let years = i32::MAX as u32 + 1;
        assert!(adjuster.adjust(1000.0, years) < 1000.0);
        assert_eq!(adjuster.adjust(1000.0, u32::MAX), 0.0);
    }
}
