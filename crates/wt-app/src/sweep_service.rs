//! Frequency sweep and pattern services.

use std::time::Instant;

use serde::Serialize;
use tracing::info;
use wt_core::timing::solver_timing;
use wt_project::schema::{Project, SweepDef};
use wt_solver::ElectromagneticSolver;
use wt_sweep::{
    CharacteristicsComputer, CutKind, DerivedCharacteristics, PatternCut, SweepOptions,
    horizontal_cut, vertical_cut,
};

use crate::error::{AppError, AppResult};
use crate::project_service::build_model;

#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub project_name: String,
    pub solver: String,
    pub characteristics: DerivedCharacteristics,
    pub elapsed_s: f64,
}

/// Sweep the range in `range`, falling back to the project's own sweep section.
pub fn sweep(
    solver: &dyn ElectromagneticSolver,
    project: &Project,
    range: Option<&SweepDef>,
) -> AppResult<SweepResponse> {
    let range = range.or(project.sweep.as_ref()).ok_or_else(|| {
        AppError::InvalidInput("no sweep range given and the project has none".to_string())
    })?;
    let model = build_model(project)?;
    let computer = CharacteristicsComputer::new(solver).with_options(SweepOptions {
        parallel: range.parallel,
        ..SweepOptions::default()
    });

    let start = Instant::now();
    solver_timing::reset_all();
    let characteristics =
        computer.sweep(&model, range.start_mhz, range.end_mhz, range.step_mhz)?;
    let elapsed_s = start.elapsed().as_secs_f64();
    solver_timing::log_summary();

    info!(
        project = %project.name,
        points = characteristics.len(),
        valid = characteristics.valid_count(),
        elapsed_s,
        "sweep finished"
    );
    Ok(SweepResponse {
        project_name: project.name.clone(),
        solver: solver.name().to_string(),
        characteristics,
        elapsed_s,
    })
}

/// Characteristics at the project's design frequency only.
pub fn characteristics(
    solver: &dyn ElectromagneticSolver,
    project: &Project,
) -> AppResult<SweepResponse> {
    let model = build_model(project)?;
    let start = Instant::now();
    let characteristics = CharacteristicsComputer::new(solver).at_design_frequency(&model)?;
    Ok(SweepResponse {
        project_name: project.name.clone(),
        solver: solver.name().to_string(),
        characteristics,
        elapsed_s: start.elapsed().as_secs_f64(),
    })
}

/// Pattern cut at the design frequency.
///
/// `angle_deg` is the elevation of a horizontal cut or the azimuth of a
/// vertical one.
pub fn pattern(
    solver: &dyn ElectromagneticSolver,
    project: &Project,
    kind: CutKind,
    angle_deg: f64,
) -> AppResult<PatternCut> {
    if !angle_deg.is_finite() {
        return Err(AppError::InvalidInput(format!("cut angle {angle_deg}")));
    }
    let model = build_model(project)?;
    let cut = match kind {
        CutKind::Horizontal => horizontal_cut(solver, &model, angle_deg)?,
        CutKind::Vertical => vertical_cut(solver, &model, angle_deg)?,
    };
    Ok(cut)
}
