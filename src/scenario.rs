//! Scenario runner for batches of solves
//!
//! Holds one solver configuration and applies it to many requests, so a
//! caller can reconfigure once and run a whole input file or form history.

use crate::error::TvmResult;
use crate::inputs::{SolveRequest, TvmInputs, Unknown};
use crate::solver::{Solution, SolverConfig, TvmSolver};

/// Pre-configured runner for single and batch solves
///
/// # Example
/// ```
/// use tvm_calculator::{ScenarioRunner, SolveRequest, TvmInputs, Unknown};
///
/// let runner = ScenarioRunner::new();
/// let request = SolveRequest::new(
///     Unknown::FutureValue,
///     TvmInputs::new(10_000.0, 0.0, 0.0, 0.05, 10.0, 12),
/// );
/// let solution = runner.run(&request).unwrap();
/// assert_eq!(solution.display_value(), "16289");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    solver: TvmSolver,
}

impl ScenarioRunner {
    /// Create runner with the default solver configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with configuration read from the environment
    pub fn from_env() -> Self {
        Self::with_config(SolverConfig::from_env())
    }

    /// Create runner with an explicit configuration
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            solver: TvmSolver::new(config),
        }
    }

    /// Run a single solve
    pub fn run(&self, request: &SolveRequest) -> TvmResult<Solution> {
        self.solver.solve(&request.inputs, request.unknown)
    }

    /// Run many solves; results line up with `requests`
    pub fn run_batch(&self, requests: &[SolveRequest]) -> Vec<TvmResult<Solution>> {
        requests.iter().map(|request| self.run(request)).collect()
    }

    /// Solve every mode from one complete set of inputs
    ///
    /// Each mode ignores its own field, so for consistent inputs every
    /// solution should reproduce the value it replaced.
    pub fn run_all_modes(&self, inputs: &TvmInputs) -> Vec<(Unknown, TvmResult<Solution>)> {
        Unknown::ALL
            .iter()
            .map(|&unknown| (unknown, self.solver.solve(inputs, unknown)))
            .collect()
    }

    /// Get reference to the solver configuration
    pub fn config(&self) -> &SolverConfig {
        self.solver.config()
    }
}
