//! Compound-interest balance and its closed-form inverses (FV, PV, PMT)

use crate::error::{TvmError, TvmResult};

/// (1+r)^k for real k
pub fn growth_factor(rate: f64, periods: f64) -> f64 {
    if periods == 0.0 {
        return 1.0;
    }
    (periods * rate.ln_1p()).exp()
}

/// ((1+r)^k - 1) / r, which is k when r = 0
pub fn annuity_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        periods
    } else {
        (periods * rate.ln_1p()).exp_m1() / rate
    }
}

/// Balance after `periods` periods: PV·(1+r)^k + PMT·annuity(r, k)
pub fn balance_at(present_value: f64, payment: f64, rate: f64, periods: f64) -> f64 {
    scaled(present_value, growth_factor(rate, periods)) + scaled(payment, annuity_factor(rate, periods))
}

/// a·b with a zero amount staying zero against an overflowed factor
fn scaled(amount: f64, factor: f64) -> f64 {
    if amount == 0.0 {
        0.0
    } else {
        amount * factor
    }
}

/// FV = PV·(1+r)^n + PMT·annuity(r, n)
pub fn future_value(present_value: f64, payment: f64, rate: f64, periods: f64) -> f64 {
    balance_at(present_value, payment, rate, periods)
}

/// PV = (FV - PMT·annuity(r, n)) / (1+r)^n
pub fn present_value(future_value: f64, payment: f64, rate: f64, periods: f64) -> TvmResult<f64> {
    let growth = growth_factor(rate, periods);
    if growth == 0.0 {
        return Err(TvmError::DivisionByZero { quantity: "growth factor" });
    }
    Ok((future_value - scaled(payment, annuity_factor(rate, periods))) / growth)
}

/// PMT = (FV - PV·(1+r)^n) / annuity(r, n)
pub fn payment(present_value: f64, future_value: f64, rate: f64, periods: f64) -> TvmResult<f64> {
    let annuity = annuity_factor(rate, periods);
    if annuity == 0.0 {
        return Err(TvmError::DivisionByZero { quantity: "annuity factor" });
    }
    Ok((future_value - scaled(present_value, growth_factor(rate, periods))) / annuity)
}
