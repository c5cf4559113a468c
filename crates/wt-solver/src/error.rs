//! Error types for solver operations.

use thiserror::Error;
use wt_core::WtError;
use wt_geometry::GeometryError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Solver build failed: {what}")]
    Build { what: String },

    #[error("Solver query failed: {what}")]
    Query { what: String },

    #[error("Port {port} out of range ({count} excitations)")]
    Port { port: usize, count: usize },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Numeric error: {0}")]
    Core(#[from] WtError),
}

pub type SolverResult<T> = Result<T, SolverError>;
