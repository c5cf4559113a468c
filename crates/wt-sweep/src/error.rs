//! Error types for sweep operations.

use thiserror::Error;
use wt_core::WtError;
use wt_solver::SolverError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Empty {what}")]
    Empty { what: &'static str },

    #[error("Length mismatch: {what} ({left} != {right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Numeric error: {0}")]
    Core(#[from] WtError),
}

pub type SweepResult<T> = Result<T, SweepError>;
