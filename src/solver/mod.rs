//! TVM solver: closed forms for FV, PV and PMT, bracketed root finding for
//! the rate and the term, and the balance series behind the chart

mod closed_form;
mod config;
mod engine;
mod periods;
mod rate;
mod roots;
mod series;
mod solution;

pub use closed_form::{annuity_factor, balance_at, growth_factor};
pub use config::{SolverConfig, DEFAULT_PERIOD_BOUND, DEFAULT_RATE_LOWER, DEFAULT_RATE_UPPER};
pub use engine::{solve, TvmSolver};
pub use periods::{check_monotonic, solve_period_count};
pub use rate::{annualize, solve_periodic_rate};
pub use roots::{bisection, brent, RootResult, RootSearch};
pub use series::{round_to, SampleLabel, SeriesIter, TimeSeriesSample};
pub use solution::{SolveReport, Solution};
