//! Error types for TVM solves

use thiserror::Error;

/// Result alias used throughout the solver
pub type TvmResult<T> = Result<T, TvmError>;

/// Everything that can go wrong during a single solve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TvmError {
    /// A field is missing, non-numeric, non-finite or out of range
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// A closed form would divide by an exactly-zero factor
    #[error("Division by zero: {quantity} is zero")]
    DivisionByZero { quantity: &'static str },

    /// Iterative solver found no root or ran out of iterations
    #[error("Solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    NonConvergent { iterations: u32, residual: f64 },

    /// Balance is not strictly increasing in the number of periods
    #[error("Balance is not monotonic in the number of periods: {reason}")]
    NonMonotonic { reason: String },
}

impl TvmError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn non_monotonic(reason: impl Into<String>) -> Self {
        Self::NonMonotonic {
            reason: reason.into(),
        }
    }

    /// Short machine-readable tag, used in batch output
    pub fn kind(&self) -> &'static str {
        match self {
            TvmError::InvalidInput { .. } => "InvalidInput",
            TvmError::DivisionByZero { .. } => "DivisionByZero",
            TvmError::NonConvergent { .. } => "NonConvergent",
            TvmError::NonMonotonic { .. } => "NonMonotonic",
        }
    }
}
