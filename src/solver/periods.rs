//! Term solver: find the number of periods that grows PV and PMT into FV

use super::closed_form::balance_at;
use super::config::SolverConfig;
use super::roots::{bisection, RootSearch};
use crate::error::{TvmError, TvmResult};
use crate::inputs::TvmInputs;

/// Fail unless the balance is strictly increasing in the period count
///
/// B(n) = (PV + PMT/r)·(1+r)^n - PMT/r for r > 0 and PV + PMT·n for r = 0.
/// Bisection here assumes a growing balance, so payments and rate must not
/// be negative and the growth coefficient must be positive.
pub fn check_monotonic(present_value: f64, payment: f64, rate: f64) -> TvmResult<()> {
    if payment < 0.0 {
        return Err(TvmError::non_monotonic(format!(
            "payment {} is negative",
            payment
        )));
    }
    if rate < 0.0 {
        return Err(TvmError::non_monotonic(format!(
            "periodic rate {} is negative",
            rate
        )));
    }

    if rate == 0.0 {
        if payment > 0.0 {
            return Ok(());
        }
        return Err(TvmError::non_monotonic(
            "balance is constant with a zero rate and no payment",
        ));
    }

    let coefficient = present_value + payment / rate;
    if coefficient > 0.0 {
        Ok(())
    } else {
        Err(TvmError::non_monotonic(format!(
            "growth coefficient PV + PMT/r = {} is not positive",
            coefficient
        )))
    }
}

/// Solve for the real period count n with B(n) = FV
///
/// Bisection over `config.period_bracket`. The years field of `inputs` is
/// ignored.
pub fn solve_period_count(inputs: &TvmInputs, config: &SolverConfig) -> TvmResult<f64> {
    let rate = inputs.periodic_rate();
    let pv = inputs.present_value;
    let pmt = inputs.payment;
    let fv = inputs.future_value;

    check_monotonic(pv, pmt, rate)?;

    let (lower, upper) = config.period_bracket;
    let search = RootSearch {
        lower: lower.min(upper),
        upper: lower.max(upper),
        value_tolerance: config.period_balance_tolerance,
        arg_tolerance: config.period_tolerance,
        max_iterations: config.period_max_iterations,
    };

    // Far above the root the growth factor overflows and PV·g + PMT·a can
    // come out as inf - inf. The balance is increasing there, so it is +inf.
    let objective = |n: f64| {
        let balance = balance_at(pv, pmt, rate, n);
        if balance.is_nan() {
            f64::INFINITY
        } else {
            balance - fv
        }
    };

    let result = bisection(objective, &search)?;

    // Bisection stops anywhere inside the balance tolerance; prefer the whole
    // period count when it meets the tolerance too
    let whole = result.root.round();
    let root = if objective(whole).abs() < search.value_tolerance {
        whole
    } else {
        result.root
    };

    log::debug!(
        "Period solve converged: n={:.6} after {} iterations (residual {:.3e})",
        root, result.iterations, result.residual
    );

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_whole_periods() {
        let inputs = TvmInputs::new(10_000.0, 0.0, 100.0, 0.05, 0.0, 12);
        let fv = balance_at(10_000.0, 100.0, inputs.periodic_rate(), 60.0);
        let inputs = TvmInputs { future_value: fv, ..inputs };

        let n = solve_period_count(&inputs, &SolverConfig::default()).unwrap();
        assert_eq!(n, 60.0);
    }

    #[test]
    fn test_whole_years_snap_to_exact_count() {
        for frequency in [1, 12] {
            let inputs = TvmInputs::new(10_000.0, 0.0, 100.0, 0.05, 10.0, frequency);
            let fv = balance_at(10_000.0, 100.0, inputs.periodic_rate(), inputs.period_count());
            let inputs = TvmInputs { future_value: fv, ..inputs };

            let n = solve_period_count(&inputs, &SolverConfig::default()).unwrap();
            assert_eq!(n, 10.0 * frequency as f64);
        }
    }

    #[test]
    fn test_fractional_periods() {
        // Linear growth: 1000 + 100·n = 2250 at n = 12.5
        let inputs = TvmInputs::new(1000.0, 2250.0, 100.0, 0.0, 0.0, 12);

        let n = solve_period_count(&inputs, &SolverConfig::default()).unwrap();
        assert_relative_eq!(n, 12.5, epsilon = 1e-3);
    }

    #[test]
    fn test_target_below_principal_gives_negative_count() {
        let inputs = TvmInputs::new(1000.0, 500.0, 0.0, 0.1, 0.0, 1);

        let n = solve_period_count(&inputs, &SolverConfig::default()).unwrap();
        assert!(n < 0.0);
        let balance = balance_at(1000.0, 0.0, inputs.periodic_rate(), n);
        assert_relative_eq!(balance, 500.0, epsilon = 0.02);
    }

    #[test]
    fn test_negative_payment_rejected() {
        let inputs = TvmInputs::new(10_000.0, 20_000.0, -100.0, 0.05, 0.0, 12);

        let result = solve_period_count(&inputs, &SolverConfig::default());
        assert!(matches!(result, Err(TvmError::NonMonotonic { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let inputs = TvmInputs::new(10_000.0, 5_000.0, 0.0, -0.05, 0.0, 12);
        assert!(matches!(
            solve_period_count(&inputs, &SolverConfig::default()),
            Err(TvmError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn test_shrinking_debt_rejected() {
        // Negative principal outgrows the payments
        assert!(check_monotonic(-100_000.0, 100.0, 0.01).is_err());
        assert!(check_monotonic(-1_000.0, 100.0, 0.01).is_ok());
        assert!(check_monotonic(1_000.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_unreachable_target_is_non_convergent() {
        // Balance never falls below -PMT/r = -100, even for very negative n
        let inputs = TvmInputs::new(0.0, -150.0, 10.0, 0.1, 0.0, 1);

        let result = solve_period_count(&inputs, &SolverConfig::default());
        assert!(matches!(result, Err(TvmError::NonConvergent { .. })));
    }
}
