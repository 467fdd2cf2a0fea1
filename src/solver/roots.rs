//! Bracketed root finders used by the rate and years solvers
//!
//! Both methods need a sign change across the bracket and stop after a hard
//! iteration cap. Failing to bracket or to converge is reported as
//! [`TvmError::NonConvergent`], never as a best guess.

use crate::error::{TvmError, TvmResult};

/// Bracket and stopping rules for one search
#[derive(Debug, Clone, Copy)]
pub struct RootSearch {
    pub lower: f64,
    pub upper: f64,
    /// Converged when |f(x)| is below this
    pub value_tolerance: f64,
    /// Converged when the bracket is narrower than this
    pub arg_tolerance: f64,
    pub max_iterations: u32,
}

/// A converged root
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    pub root: f64,
    pub iterations: u32,
    pub residual: f64,
}

/// Evaluate the endpoints and confirm they bracket a root
///
/// Returns `Ok(Err(root))` when an endpoint already satisfies the tolerance.
fn check_bracket<F>(f: &F, search: &RootSearch) -> TvmResult<Result<(f64, f64), RootResult>>
where
    F: Fn(f64) -> f64,
{
    let f_lo = f(search.lower);
    let f_hi = f(search.upper);

    for (x, fx) in [(search.lower, f_lo), (search.upper, f_hi)] {
        if fx.abs() < search.value_tolerance {
            return Ok(Err(RootResult { root: x, iterations: 0, residual: fx }));
        }
    }

    if f_lo.is_nan() || f_hi.is_nan() || f_lo.signum() == f_hi.signum() {
        log::debug!(
            "No sign change on [{}, {}]: f = ({:.6e}, {:.6e})",
            search.lower, search.upper, f_lo, f_hi
        );
        return Err(TvmError::NonConvergent {
            iterations: 0,
            residual: f_lo.abs().min(f_hi.abs()),
        });
    }

    Ok(Ok((f_lo, f_hi)))
}

/// Bisection on `[lower, upper]`
pub fn bisection<F>(f: F, search: &RootSearch) -> TvmResult<RootResult>
where
    F: Fn(f64) -> f64,
{
    let (f_lo, _) = match check_bracket(&f, search)? {
        Ok(values) => values,
        Err(endpoint) => return Ok(endpoint),
    };

    let mut lo = search.lower;
    let mut hi = search.upper;
    let lo_negative = f_lo < 0.0;
    let mut f_mid = f_lo;

    for iteration in 1..=search.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        f_mid = f(mid);

        if f_mid.is_nan() {
            break;
        }

        if f_mid.abs() < search.value_tolerance || (hi - lo) / 2.0 < search.arg_tolerance {
            return Ok(RootResult { root: mid, iterations: iteration, residual: f_mid });
        }

        if (f_mid < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(TvmError::NonConvergent {
        iterations: search.max_iterations,
        residual: f_mid.abs(),
    })
}

/// Brent's method on `[lower, upper]`
///
/// Inverse quadratic interpolation or secant steps, falling back to
/// bisection whenever the interpolated point is not clearly better.
#[allow(clippy::many_single_char_names)]
pub fn brent<F>(f: F, search: &RootSearch) -> TvmResult<RootResult>
where
    F: Fn(f64) -> f64,
{
    let (mut fa, mut fb) = match check_bracket(&f, search)? {
        Ok(values) => values,
        Err(endpoint) => return Ok(endpoint),
    };
    let mut a = search.lower;
    let mut b = search.upper;

    // b is always the best estimate
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = c;
    let mut bisected = true;

    for iteration in 1..=search.max_iterations {
        if fb.abs() < search.value_tolerance || (b - a).abs() < search.arg_tolerance {
            return Ok(RootResult { root: b, iterations: iteration, residual: fb });
        }

        let mut s = if fa != fc && fb != fc {
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            b - fb * (b - a) / (fb - fa)
        };

        let quarter = (3.0 * a + b) / 4.0;
        let outside = !(s > quarter.min(b) && s < quarter.max(b));
        let slow = if bisected {
            (s - b).abs() >= (b - c).abs() / 2.0 || (b - c).abs() < search.arg_tolerance
        } else {
            (s - b).abs() >= (c - d).abs() / 2.0 || (c - d).abs() < search.arg_tolerance
        };

        if !s.is_finite() || outside || slow {
            s = (a + b) / 2.0;
            bisected = true;
        } else {
            bisected = false;
        }

        let fs = f(s);
        if fs.is_nan() {
            break;
        }

        d = c;
        c = b;
        fc = fb;

        if fa.signum() != fs.signum() {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(TvmError::NonConvergent {
        iterations: search.max_iterations,
        residual: fb.abs(),
    })
}
