//! Balance-over-time samples for charting

use super::closed_form::balance_at;
use serde::{Serialize, Serializer};
use std::fmt;

/// Chart label of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleLabel {
    /// Starting balance
    Principal,
    /// Balance after this many (started) years
    YearsElapsed(u64),
}

impl fmt::Display for SampleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleLabel::Principal => f.write_str("principal"),
            SampleLabel::YearsElapsed(years) => write!(f, "{}年後", years),
        }
    }
}

impl Serialize for SampleLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One bar of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesSample {
    pub period_index: u64,
    pub label: SampleLabel,
    pub balance: f64,
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Lazy iterator over the samples of one solution
///
/// Yields the principal, then one sample at every year boundary up to the
/// last whole period. With `include_final` set (years solver) the last period
/// `ceil(n)` is always sampled, using the balance at the exact, possibly
/// fractional, period count.
#[derive(Debug, Clone)]
pub struct SeriesIter {
    present_value: f64,
    payment: f64,
    rate: f64,
    period_count: f64,
    frequency: u64,
    decimals: u32,
    include_final: bool,
    last_period: u64,
    next_period: u64,
}

impl SeriesIter {
    pub fn new(
        present_value: f64,
        payment: f64,
        rate: f64,
        period_count: f64,
        frequency: u32,
        decimals: u32,
        include_final: bool,
    ) -> Self {
        let last = if include_final {
            period_count.ceil()
        } else {
            period_count.floor()
        };
        // Negative and NaN counts sample nothing past the principal
        let last_period = if last > 0.0 { last as u64 } else { 0 };

        Self {
            present_value,
            payment,
            rate,
            period_count,
            frequency: u64::from(frequency.max(1)),
            decimals,
            include_final,
            last_period,
            next_period: 0,
        }
    }

    fn sample(&self, period_index: u64, at: f64, label: SampleLabel) -> TimeSeriesSample {
        let balance = balance_at(self.present_value, self.payment, self.rate, at);
        TimeSeriesSample {
            period_index,
            label,
            balance: round_to(balance, self.decimals),
        }
    }
}

impl Iterator for SeriesIter {
    type Item = TimeSeriesSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_period == 0 {
            self.next_period = 1;
            return Some(TimeSeriesSample {
                period_index: 0,
                label: SampleLabel::Principal,
                balance: round_to(self.present_value, self.decimals),
            });
        }

        while self.next_period <= self.last_period {
            let i = self.next_period;
            self.next_period += 1;

            let is_final = self.include_final && i == self.last_period;
            if i % self.frequency == 0 || is_final {
                let at = if is_final { self.period_count } else { i as f64 };
                let years = (i + self.frequency - 1) / self.frequency;
                return Some(self.sample(i, at, SampleLabel::YearsElapsed(years)));
            }
        }

        None
    }
}
