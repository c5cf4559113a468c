//! Error types for the wt-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Sweep error: {0}")]
    Sweep(String),

    #[error("Tuning error: {0}")]
    Tuning(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wt-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<wt_project::ProjectError> for AppError {
    fn from(err: wt_project::ProjectError) -> Self {
        match err {
            wt_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<wt_project::ValidationError> for AppError {
    fn from(err: wt_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<wt_geometry::GeometryError> for AppError {
    fn from(err: wt_geometry::GeometryError) -> Self {
        AppError::Geometry(err.to_string())
    }
}

impl From<wt_solver::SolverError> for AppError {
    fn from(err: wt_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<wt_sweep::SweepError> for AppError {
    fn from(err: wt_sweep::SweepError) -> Self {
        AppError::Sweep(err.to_string())
    }
}

impl From<wt_optim::OptimError> for AppError {
    fn from(err: wt_optim::OptimError) -> Self {
        AppError::Tuning(err.to_string())
    }
}

impl From<wt_core::WtError> for AppError {
    fn from(err: wt_core::WtError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
