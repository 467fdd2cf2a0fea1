//! Solver entry point: one dispatch over the five modes

use super::closed_form;
use super::config::SolverConfig;
use super::periods::solve_period_count;
use super::rate::{annualize, solve_periodic_rate};
use super::solution::Solution;
use crate::error::{TvmError, TvmResult};
use crate::inputs::{field_name, TvmInputs, Unknown};

/// Main TVM solver
#[derive(Debug, Clone, Default)]
pub struct TvmSolver {
    config: SolverConfig,
}

impl TvmSolver {
    /// Create a solver with the given configuration
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for `unknown` from the other four variables
    pub fn solve(&self, inputs: &TvmInputs, unknown: Unknown) -> TvmResult<Solution> {
        inputs.validate(unknown)?;
        log::debug!("Solving for {} from {:?}", unknown, inputs);

        let frequency = inputs.frequency;
        let pv = inputs.present_value;
        let fv = inputs.future_value;
        let pmt = inputs.payment;

        let (value, periodic_rate, period_count) = match unknown {
            Unknown::FutureValue => {
                let r = inputs.periodic_rate();
                let n = inputs.period_count();
                (closed_form::future_value(pv, pmt, r, n), r, n)
            }
            Unknown::PresentValue => {
                let r = inputs.periodic_rate();
                let n = inputs.period_count();
                (closed_form::present_value(fv, pmt, r, n)?, r, n)
            }
            Unknown::Payment => {
                let r = inputs.periodic_rate();
                let n = inputs.period_count();
                (closed_form::payment(pv, fv, r, n)?, r, n)
            }
            Unknown::AnnualRate => {
                let r = solve_periodic_rate(inputs, &self.config)?;
                (annualize(r, frequency), r, inputs.period_count())
            }
            Unknown::Years => {
                let n = solve_period_count(inputs, &self.config)?;
                (n / frequency as f64, inputs.periodic_rate(), n)
            }
        };

        if !value.is_finite() {
            return Err(TvmError::invalid_input(
                field_name(unknown),
                format!("inputs overflow the solved value ({})", value),
            ));
        }

        Ok(Solution {
            unknown,
            value,
            inputs: inputs.with(unknown, value),
            periodic_rate,
            period_count,
            series_decimals: self.config.series_decimals,
        })
    }
}

/// Solve with the default configuration
pub fn solve(inputs: &TvmInputs, unknown: Unknown) -> TvmResult<Solution> {
    TvmSolver::default().solve(inputs, unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SampleLabel;
    use approx::{assert_relative_eq, relative_eq};
    use proptest::prelude::*;

    fn savings_plan() -> TvmInputs {
        // 10000 up front, 5% a year compounded monthly, 10 years
        TvmInputs::new(10_000.0, 0.0, 0.0, 0.05, 10.0, 12)
    }

    #[test]
    fn test_future_value_of_lump_sum() {
        let solution = solve(&savings_plan(), Unknown::FutureValue).unwrap();

        // (1+r)^120 with r = 1.05^(1/12) - 1 is exactly 1.05^10
        assert_relative_eq!(solution.value, 16_288.946_267_774_42, epsilon = 1e-6);
        assert_eq!(solution.display_value(), "16289");

        let samples = solution.samples();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0].label, SampleLabel::Principal);
        assert_eq!(samples[0].balance, 10_000.0);
        assert_eq!(samples[1].balance, 10_500.0);
        assert_eq!(samples[10].label.to_string(), "10年後");
        assert_eq!(samples[10].balance, 16_289.0);
    }

    #[test]
    fn test_zero_rate_future_value_is_exact() {
        let inputs = TvmInputs::new(2_500.0, 0.0, 125.0, 0.0, 3.0, 12);
        let solution = solve(&inputs, Unknown::FutureValue).unwrap();

        assert_eq!(solution.value, 2_500.0 + 125.0 * 36.0);
        assert!(solution.samples().iter().all(|s| s.balance.is_finite()));
    }

    #[test]
    fn test_zero_rate_inverses() {
        let inputs = TvmInputs::new(1_000.0, 4_000.0, 100.0, 0.0, 2.5, 12);

        let pv = solve(&inputs, Unknown::PresentValue).unwrap();
        assert_relative_eq!(pv.value, 1_000.0, epsilon = 1e-9);

        let pmt = solve(&inputs, Unknown::Payment).unwrap();
        assert_relative_eq!(pmt.value, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_payment_with_no_term_divides_by_zero() {
        let inputs = TvmInputs::new(1_000.0, 4_000.0, 0.0, 0.05, 0.0, 12);
        assert!(matches!(
            solve(&inputs, Unknown::Payment),
            Err(TvmError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_rate_solve_recovers_annual_rate() {
        let fv = solve(&TvmInputs::new(10_000.0, 0.0, 150.0, 0.07, 15.0, 12), Unknown::FutureValue)
            .unwrap()
            .value;

        let inputs = TvmInputs::new(10_000.0, fv, 150.0, 0.0, 15.0, 12);
        let solution = solve(&inputs, Unknown::AnnualRate).unwrap();

        assert_relative_eq!(solution.value, 0.07, epsilon = 1e-9);
        assert_eq!(solution.display_value(), "7.00");
        assert_eq!(solution.samples().len(), 16);
    }

    #[test]
    fn test_rate_solve_without_root_is_non_convergent() {
        // Target below what the payments alone leave at -99% per period
        let inputs = TvmInputs::new(10_000.0, 0.0, 100.0, 0.0, 10.0, 12);
        assert!(matches!(
            solve(&inputs, Unknown::AnnualRate),
            Err(TvmError::NonConvergent { .. })
        ));
    }

    #[test]
    fn test_rate_solve_respects_iteration_budget() {
        let solver = TvmSolver::new(SolverConfig::default().with_max_iterations(1));
        let inputs = TvmInputs::new(10_000.0, 17_000.0, 0.0, 0.0, 10.0, 12);

        assert!(matches!(
            solver.solve(&inputs, Unknown::AnnualRate),
            Err(TvmError::NonConvergent { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_years_solve() {
        let fv = solve(&TvmInputs::new(5_000.0, 0.0, 200.0, 0.06, 7.0, 12), Unknown::FutureValue)
            .unwrap()
            .value;

        let inputs = TvmInputs::new(5_000.0, fv, 200.0, 0.06, 0.0, 12);
        let solution = solve(&inputs, Unknown::Years).unwrap();

        assert_eq!(solution.value, 7.0);
        assert_eq!(solution.display_value(), "7");
        assert_eq!(solution.samples().len() - 1, 7);
    }

    #[test]
    fn test_years_solve_whole_term_has_no_extra_year() {
        for frequency in [1, 12] {
            let plan = TvmInputs::new(10_000.0, 0.0, 100.0, 0.05, 10.0, frequency);
            let fv = solve(&plan, Unknown::FutureValue).unwrap().value;

            let inputs = TvmInputs { future_value: fv, years: 0.0, ..plan };
            let solution = solve(&inputs, Unknown::Years).unwrap();
            assert_eq!(solution.period_count, 10.0 * frequency as f64);

            let samples = solution.samples();
            assert_eq!(samples.len(), 11);
            let last = samples.last().unwrap();
            assert_eq!(last.label.to_string(), "10年後");
            assert_eq!(last.period_index, 10 * u64::from(frequency));
        }
    }

    #[test]
    fn test_years_solve_partial_final_year() {
        // 100 a month with no interest reaches 1450 after 14.5 months
        let inputs = TvmInputs::new(0.0, 1_450.0, 100.0, 0.0, 0.0, 12);
        let solution = solve(&inputs, Unknown::Years).unwrap();

        assert_relative_eq!(solution.period_count, 14.5, epsilon = 1e-3);
        let samples = solution.samples();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].label.to_string(), "1年後");
        assert_eq!(samples[2].label.to_string(), "2年後");
        assert_eq!(samples[2].balance, 1_450.0);
    }

    #[test]
    fn test_years_solve_rejects_withdrawals() {
        let inputs = TvmInputs::new(100_000.0, 50_000.0, -1_000.0, 0.05, 0.0, 12);
        assert!(matches!(
            solve(&inputs, Unknown::Years),
            Err(TvmError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs_rejected_before_solving() {
        let inputs = TvmInputs::new(f64::NAN, 0.0, 0.0, 0.05, 10.0, 12);
        assert!(matches!(
            solve(&inputs, Unknown::FutureValue),
            Err(TvmError::InvalidInput { field: "present_value", .. })
        ));

        let no_freq = TvmInputs { frequency: 0, ..savings_plan() };
        assert!(matches!(
            solve(&no_freq, Unknown::FutureValue),
            Err(TvmError::InvalidInput { field: "frequency", .. })
        ));
    }

    #[test]
    fn test_solution_fills_in_unknown() {
        let solution = solve(&savings_plan(), Unknown::FutureValue).unwrap();
        assert_eq!(solution.inputs.future_value, solution.value);
        assert_eq!(solution.inputs.present_value, 10_000.0);
    }

    #[test]
    fn test_series_decimals_configurable() {
        let solver = TvmSolver::new(SolverConfig::default().with_series_decimals(2));
        let solution = solver.solve(&savings_plan(), Unknown::FutureValue).unwrap();

        assert_relative_eq!(solution.samples()[10].balance, 16_288.95, epsilon = 1e-9);
    }

    #[test]
    fn test_report_serializes() {
        let report = solve(&savings_plan(), Unknown::FutureValue).unwrap().report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["mode"], "fv");
        assert_eq!(json["display"], "16289");
        assert_eq!(json["series"][0]["label"], "principal");
        assert_eq!(json["series"].as_array().unwrap().len(), 11);
    }

    fn frequency() -> impl Strategy<Value = u32> {
        prop_oneof![Just(1u32), Just(2), Just(4), Just(12), Just(52)]
    }

    proptest! {
        #[test]
        fn prop_future_value_round_trips_through_present_value(
            pv in 100.0..1_000_000.0f64,
            pmt in 0.0..10_000.0f64,
            ear in 0.0..0.25f64,
            yrs in 0.5..40.0f64,
            freq in frequency(),
        ) {
            let fv = solve(&TvmInputs::new(pv, 0.0, pmt, ear, yrs, freq), Unknown::FutureValue)
                .unwrap()
                .value;

            let recovered = solve(&TvmInputs::new(0.0, fv, pmt, ear, yrs, freq), Unknown::PresentValue)
                .unwrap()
                .value;

            prop_assert!(relative_eq!(recovered, pv, epsilon = 1e-6, max_relative = 1e-6));
        }

        #[test]
        fn prop_future_value_round_trips_through_payment(
            pv in 0.0..1_000_000.0f64,
            pmt in 1.0..10_000.0f64,
            ear in 0.0..0.25f64,
            yrs in 0.5..40.0f64,
            freq in frequency(),
        ) {
            let fv = solve(&TvmInputs::new(pv, 0.0, pmt, ear, yrs, freq), Unknown::FutureValue)
                .unwrap()
                .value;

            let recovered = solve(&TvmInputs::new(pv, fv, 0.0, ear, yrs, freq), Unknown::Payment)
                .unwrap()
                .value;

            prop_assert!(relative_eq!(recovered, pmt, epsilon = 1e-6, max_relative = 1e-6));
        }

        #[test]
        fn prop_series_has_one_mark_per_whole_year(
            pv in 0.0..100_000.0f64,
            pmt in 0.0..1_000.0f64,
            ear in 0.0..0.2f64,
            yrs in 0.0..30.0f64,
            freq in frequency(),
        ) {
            let solution = solve(&TvmInputs::new(pv, 0.0, pmt, ear, yrs, freq), Unknown::FutureValue)
                .unwrap();
            let samples = solution.samples();

            let expected = (solution.period_count / freq as f64).floor() as usize;
            prop_assert_eq!(samples.len(), expected + 1);
            prop_assert_eq!(samples[0].label, SampleLabel::Principal);
            prop_assert_eq!(samples[0].balance, pv.round());
        }
    }
}
