//! TVM Calculator - time-value-of-money solver with balance growth series
//!
//! This library provides:
//! - Solving for any one of PV, FV, payment, annual rate or term
//! - Closed forms for PV/FV/PMT with an explicit zero-rate branch
//! - Bracketed root finding (Brent, bisection) for rate and term
//! - Lazily produced (label, balance) samples for charting
//! - Parsing of raw form fields and CSV batches

pub mod error;
pub mod inputs;
pub mod solver;
pub mod display;
pub mod scenario;

// Re-export commonly used types
pub use error::{TvmError, TvmResult};
pub use inputs::{FieldValues, SolveRequest, TvmInputs, Unknown};
pub use solver::{solve, SampleLabel, Solution, SolveReport, SolverConfig, TimeSeriesSample, TvmSolver};
pub use display::format_display;
pub use scenario::ScenarioRunner;
