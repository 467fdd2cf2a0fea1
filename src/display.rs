//! Formatting of solved values for the calculator's display fields
//!
//! FV, PV, PMT and YRS show whole numbers. The rate field shows a
//! percentage with two decimals, so an annual rate of 0.0512 reads "5.12".

use crate::inputs::Unknown;
use crate::solver::round_to;

/// Decimal places shown in the field of `unknown`
pub fn display_decimals(unknown: Unknown) -> u32 {
    match unknown {
        Unknown::AnnualRate => 2,
        _ => 0,
    }
}

/// Value in the units of the display field (the rate becomes a percentage)
pub fn display_units(unknown: Unknown, value: f64) -> f64 {
    match unknown {
        Unknown::AnnualRate => value * 100.0,
        _ => value,
    }
}

/// Text written back into the field of `unknown`
pub fn format_display(unknown: Unknown, value: f64) -> String {
    let decimals = display_decimals(unknown);
    let mut rounded = round_to(display_units(unknown, value), decimals);
    // No "-0" in the field
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{:.*}", decimals as usize, rounded)
}
