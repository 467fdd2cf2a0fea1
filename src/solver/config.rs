//! Solver configuration: brackets, tolerances, iteration caps, rounding

use serde::{Deserialize, Serialize};
use std::env;

/// Default lower bound of the periodic-rate bracket (-99% per period)
pub const DEFAULT_RATE_LOWER: f64 = -0.99;

/// Default upper bound of the periodic-rate bracket (1000% per period)
pub const DEFAULT_RATE_UPPER: f64 = 10.0;

/// Default bound on the period count searched by the years solver
pub const DEFAULT_PERIOD_BOUND: f64 = 100_000_000.0;

/// Configuration for a solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Periodic-rate bracket searched by the rate solver
    pub rate_bracket: (f64, f64),

    /// Rate solver stops when |balance - FV| falls below this
    pub rate_balance_tolerance: f64,

    /// Rate solver stops when the bracket is narrower than this
    pub rate_tolerance: f64,

    /// Iteration cap for the rate solver
    pub rate_max_iterations: u32,

    /// Period-count bracket searched by the years solver
    pub period_bracket: (f64, f64),

    /// Years solver stops when |balance - FV| falls below this
    pub period_balance_tolerance: f64,

    /// Years solver stops when the bracket is narrower than this (in periods)
    pub period_tolerance: f64,

    /// Iteration cap for the years solver
    pub period_max_iterations: u32,

    /// Decimal places kept on series balances
    pub series_decimals: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rate_bracket: (DEFAULT_RATE_LOWER, DEFAULT_RATE_UPPER),
            rate_balance_tolerance: 1e-7,
            rate_tolerance: 1e-12,
            rate_max_iterations: 100,
            period_bracket: (-DEFAULT_PERIOD_BOUND, DEFAULT_PERIOD_BOUND),
            period_balance_tolerance: 0.01,
            period_tolerance: 1e-9,
            period_max_iterations: 200,
            series_decimals: 0,
        }
    }
}

impl SolverConfig {
    /// Defaults with overrides from the environment
    ///
    /// Reads `TVM_MAX_ITERATIONS` (both solvers), `TVM_RATE_TOLERANCE`,
    /// `TVM_BALANCE_TOLERANCE` (both solvers) and `TVM_SERIES_DECIMALS`.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max_iter) = env_value::<u32>("TVM_MAX_ITERATIONS") {
            config.rate_max_iterations = max_iter;
            config.period_max_iterations = max_iter;
        }
        if let Some(tol) = env_value::<f64>("TVM_RATE_TOLERANCE") {
            config.rate_tolerance = tol;
        }
        if let Some(tol) = env_value::<f64>("TVM_BALANCE_TOLERANCE") {
            config.rate_balance_tolerance = tol;
            config.period_balance_tolerance = tol;
        }
        if let Some(decimals) = env_value::<u32>("TVM_SERIES_DECIMALS") {
            config.series_decimals = decimals;
        }

        config
    }

    /// Sets the iteration cap of both iterative solvers
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.rate_max_iterations = max_iterations;
        self.period_max_iterations = max_iterations;
        self
    }

    /// Sets the decimal places kept on series balances
    pub fn with_series_decimals(mut self, decimals: u32) -> Self {
        self.series_decimals = decimals;
        self
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
