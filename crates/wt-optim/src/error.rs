//! Error types for tuning operations.

use thiserror::Error;
use wt_core::WtError;
use wt_geometry::GeometryError;
use wt_solver::SolverError;
use wt_sweep::SweepError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimError {
    #[error("Baseline unusable: {what}")]
    Baseline { what: String },

    #[error("Wire {index} has radius {actual}, expected {expected}")]
    RadiusMismatch {
        index: usize,
        expected: f64,
        actual: f64,
    },

    #[error("Invalid search configuration: {what}")]
    Config { what: &'static str },

    #[error("Sweep error: {0}")]
    Sweep(#[from] SweepError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Numeric error: {0}")]
    Core(#[from] WtError),
}

impl From<SolverError> for OptimError {
    fn from(e: SolverError) -> Self {
        OptimError::Sweep(SweepError::Solver(e))
    }
}

pub type OptimResult<T> = Result<T, OptimError>;
