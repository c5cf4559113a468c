//! Shared application service layer for wiretune.
//!
//! Centralizes what the CLI does with a project: loading and validating it,
//! building the geometry model, running sweeps and pattern cuts, radius
//! compensation and frequency rescaling.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod sweep_service;
pub mod tune_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{TuneProgressEvent, TuneStage};
pub use project_service::{
    ProjectSummary, build_model, load_project, save_project, summarize, validate_project,
};
pub use sweep_service::{SweepResponse, characteristics, pattern, sweep};
pub use tune_service::{
    CompensateRequest, CompensateResponse, compensate, objective_for, rescale_frequency,
    search_config,
};
