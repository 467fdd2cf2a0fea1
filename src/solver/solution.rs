//! Solve output: the solved value plus everything needed to chart it

use super::series::{SeriesIter, TimeSeriesSample};
use crate::display::format_display;
use crate::inputs::{TvmInputs, Unknown};
use serde::Serialize;

/// Result of one successful solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Solution {
    /// Variable that was solved for
    pub unknown: Unknown,

    /// Solved value (annual rate as a decimal, term in years)
    pub value: f64,

    /// Inputs with the solved field filled in
    pub inputs: TvmInputs,

    /// Periodic rate used for the series
    pub periodic_rate: f64,

    /// Period count used for the series, possibly fractional
    pub period_count: f64,

    /// Decimal places kept on series balances
    pub series_decimals: u32,
}

impl Solution {
    /// Lazily produce the chart samples
    pub fn series(&self) -> SeriesIter {
        SeriesIter::new(
            self.inputs.present_value,
            self.inputs.payment,
            self.periodic_rate,
            self.period_count,
            self.inputs.frequency,
            self.series_decimals,
            self.unknown == Unknown::Years,
        )
    }

    /// All chart samples
    pub fn samples(&self) -> Vec<TimeSeriesSample> {
        self.series().collect()
    }

    /// Text for the display field of the solved variable
    pub fn display_value(&self) -> String {
        format_display(self.unknown, self.value)
    }

    /// Serializable summary with the full series
    pub fn report(&self) -> SolveReport {
        SolveReport {
            mode: self.unknown,
            value: self.value,
            display: self.display_value(),
            inputs: self.inputs,
            periodic_rate: self.periodic_rate,
            period_count: self.period_count,
            series: self.samples(),
        }
    }
}

/// JSON-friendly view of a solution
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub mode: Unknown,
    pub value: f64,
    pub display: String,
    pub inputs: TvmInputs,
    pub periodic_rate: f64,
    pub period_count: f64,
    pub series: Vec<TimeSeriesSample>,
}
