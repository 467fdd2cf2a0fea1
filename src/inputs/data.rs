//! Core input types: the five TVM variables and the solve mode

use crate::error::{TvmError, TvmResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the five variables is solved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unknown {
    #[serde(rename = "fv")]
    FutureValue,
    #[serde(rename = "pv")]
    PresentValue,
    #[serde(rename = "ear")]
    AnnualRate,
    #[serde(rename = "pmt")]
    Payment,
    #[serde(rename = "yrs")]
    Years,
}

impl Unknown {
    /// Every mode, in the order the calculator lists them
    pub const ALL: [Unknown; 5] = [
        Unknown::FutureValue,
        Unknown::PresentValue,
        Unknown::AnnualRate,
        Unknown::Payment,
        Unknown::Years,
    ];

    /// Mode key as used by the UI selector
    pub fn key(&self) -> &'static str {
        match self {
            Unknown::FutureValue => "fv",
            Unknown::PresentValue => "pv",
            Unknown::AnnualRate => "ear",
            Unknown::Payment => "pmt",
            Unknown::Years => "yrs",
        }
    }
}

impl Default for Unknown {
    fn default() -> Self {
        Unknown::FutureValue
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Unknown {
    type Err = TvmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fv" => Ok(Unknown::FutureValue),
            "pv" => Ok(Unknown::PresentValue),
            "ear" => Ok(Unknown::AnnualRate),
            "pmt" => Ok(Unknown::Payment),
            "yrs" => Ok(Unknown::Years),
            other => Err(TvmError::invalid_input(
                "mode",
                format!("unknown mode '{}' (expected fv, pv, ear, pmt or yrs)", other),
            )),
        }
    }
}

/// Inputs to a single solve
///
/// The field named by the solve's [`Unknown`] is ignored; its value is
/// whatever the caller left there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TvmInputs {
    /// Starting balance
    pub present_value: f64,

    /// Target balance after `years`
    pub future_value: f64,

    /// Payment added at the end of every period
    pub payment: f64,

    /// Annual rate as a decimal (0.05 for 5%)
    pub annual_rate: f64,

    /// Term in years, may be fractional
    pub years: f64,

    /// Compounding periods per year
    pub frequency: u32,
}

impl TvmInputs {
    pub fn new(
        present_value: f64,
        future_value: f64,
        payment: f64,
        annual_rate: f64,
        years: f64,
        frequency: u32,
    ) -> Self {
        Self {
            present_value,
            future_value,
            payment,
            annual_rate,
            years,
            frequency,
        }
    }

    /// Per-period rate equivalent to the annual rate: (1+EAR)^(1/f) - 1
    pub fn periodic_rate(&self) -> f64 {
        (1.0 + self.annual_rate).powf(1.0 / self.frequency as f64) - 1.0
    }

    /// Number of compounding periods, real valued
    pub fn period_count(&self) -> f64 {
        self.years * self.frequency as f64
    }

    /// Value of one of the five variables
    pub fn get(&self, field: Unknown) -> f64 {
        match field {
            Unknown::FutureValue => self.future_value,
            Unknown::PresentValue => self.present_value,
            Unknown::AnnualRate => self.annual_rate,
            Unknown::Payment => self.payment,
            Unknown::Years => self.years,
        }
    }

    /// Copy with one variable replaced
    pub fn with(mut self, field: Unknown, value: f64) -> Self {
        match field {
            Unknown::FutureValue => self.future_value = value,
            Unknown::PresentValue => self.present_value = value,
            Unknown::AnnualRate => self.annual_rate = value,
            Unknown::Payment => self.payment = value,
            Unknown::Years => self.years = value,
        }
        self
    }

    /// Check every known field before solving for `unknown`
    pub fn validate(&self, unknown: Unknown) -> TvmResult<()> {
        if self.frequency == 0 {
            return Err(TvmError::invalid_input(
                "frequency",
                "must be a positive integer",
            ));
        }

        for field in Unknown::ALL {
            if field == unknown {
                continue;
            }
            let value = self.get(field);
            if !value.is_finite() {
                return Err(TvmError::invalid_input(
                    field_name(field),
                    format!("must be a finite number, got {}", value),
                ));
            }
        }

        // (1+EAR)^(1/f) has no real value below -100%
        if unknown != Unknown::AnnualRate && self.annual_rate <= -1.0 {
            return Err(TvmError::invalid_input(
                "annual_rate",
                format!("must be greater than -100%, got {}", self.annual_rate),
            ));
        }

        Ok(())
    }
}

/// One solve: which variable is unknown, and the values of the rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub unknown: Unknown,
    pub inputs: TvmInputs,
}

impl SolveRequest {
    pub fn new(unknown: Unknown, inputs: TvmInputs) -> Self {
        Self { unknown, inputs }
    }
}

/// Field name used in error messages
pub fn field_name(field: Unknown) -> &'static str {
    match field {
        Unknown::FutureValue => "future_value",
        Unknown::PresentValue => "present_value",
        Unknown::AnnualRate => "annual_rate",
        Unknown::Payment => "payment",
        Unknown::Years => "years",
    }
}
