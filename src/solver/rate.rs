//! Rate solver: find the periodic rate that grows PV and PMT into FV

use super::closed_form::balance_at;
use super::config::SolverConfig;
use super::roots::{brent, RootSearch};
use crate::error::{TvmError, TvmResult};
use crate::inputs::TvmInputs;

/// Solve for the periodic rate r with B(r, n) = FV
///
/// Brent's method over `config.rate_bracket`. The future value, present
/// value, payment, years and frequency of `inputs` are used.
pub fn solve_periodic_rate(inputs: &TvmInputs, config: &SolverConfig) -> TvmResult<f64> {
    let periods = inputs.period_count();
    if !(periods > 0.0) {
        return Err(TvmError::invalid_input(
            "years",
            "the rate is undetermined without a positive number of periods",
        ));
    }

    let (lower, upper) = config.rate_bracket;
    if !(lower > -1.0 && lower < upper) {
        return Err(TvmError::invalid_input(
            "rate_bracket",
            format!("need -1 < lower < upper, got [{}, {}]", lower, upper),
        ));
    }

    let search = RootSearch {
        lower,
        upper,
        value_tolerance: config.rate_balance_tolerance,
        arg_tolerance: config.rate_tolerance,
        max_iterations: config.rate_max_iterations,
    };

    let pv = inputs.present_value;
    let pmt = inputs.payment;
    let fv = inputs.future_value;

    // Over long terms the growth factor overflows near the top of the bracket
    // and PV·g + PMT·a comes out as inf - inf. The growth term dominates there,
    // so the balance takes the sign of PV + PMT/r.
    let objective = |r: f64| {
        let balance = balance_at(pv, pmt, r, periods);
        if !balance.is_nan() {
            return balance - fv;
        }
        let coefficient = pv + pmt / r;
        if coefficient == 0.0 {
            -pmt / r - fv
        } else {
            coefficient.signum() * f64::INFINITY
        }
    };

    let result = brent(objective, &search)?;

    log::debug!(
        "Rate solve converged: r={:.10} after {} iterations (residual {:.3e})",
        result.root, result.iterations, result.residual
    );

    Ok(result.root)
}

/// Annual rate equivalent to a periodic rate: (1+r)^f - 1
pub fn annualize(periodic_rate: f64, frequency: u32) -> f64 {
    (frequency as f64 * periodic_rate.ln_1p()).exp_m1()
}
