//! Raw field values as the calculator form supplies them

use super::data::{field_name, TvmInputs, Unknown};
use crate::error::{TvmError, TvmResult};
use serde::{Deserialize, Serialize};

/// The five form fields plus the frequency selector, unparsed
///
/// `ear` is a percentage (`"5"` means 5%), as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValues {
    pub pv: String,
    pub fv: String,
    pub pmt: String,
    pub ear: String,
    pub yrs: String,
    pub frequency: String,
}

impl FieldValues {
    /// Parse every field except the one being solved for
    ///
    /// The unknown field is set to zero whatever its text.
    pub fn parse(&self, unknown: Unknown) -> TvmResult<TvmInputs> {
        let frequency = parse_frequency(&self.frequency)?;

        let read = |field: Unknown, text: &str| -> TvmResult<f64> {
            if field == unknown {
                Ok(0.0)
            } else {
                parse_number(field_name(field), text)
            }
        };

        let present_value = read(Unknown::PresentValue, &self.pv)?;
        let future_value = read(Unknown::FutureValue, &self.fv)?;
        let payment = read(Unknown::Payment, &self.pmt)?;
        let annual_rate = read(Unknown::AnnualRate, &self.ear)? / 100.0;
        let years = read(Unknown::Years, &self.yrs)?;

        let inputs = TvmInputs::new(
            present_value,
            future_value,
            payment,
            annual_rate,
            years,
            frequency,
        );
        inputs.validate(unknown)?;
        Ok(inputs)
    }
}

/// Parse a finite decimal number; blank fields are errors
pub fn parse_number(field: &'static str, text: &str) -> TvmResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TvmError::invalid_input(field, "value is required"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| TvmError::invalid_input(field, format!("'{}' is not a number", trimmed)))?;

    if !value.is_finite() {
        return Err(TvmError::invalid_input(field, format!("'{}' is not finite", trimmed)));
    }
    Ok(value)
}

/// Parse the compounding frequency; must be a positive integer
pub fn parse_frequency(text: &str) -> TvmResult<u32> {
    let trimmed = text.trim();
    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(TvmError::invalid_input(
            "frequency",
            format!("'{}' is not a positive integer", trimmed),
        )),
        Ok(f) => Ok(f),
    }
}
