//! Radius compensation and frequency rescaling services.

use std::time::Instant;

use serde::Serialize;
use tracing::info;
use wt_core::timing::solver_timing;
use wt_optim::{
    CompensationReport, NelderMeadConfig, ObjectiveWeights, Penalty, RadiusCompensator,
    WeightedDeviation,
};
use wt_project::schema::{PenaltyDef, Project, TuningDef};
use wt_project::store_geometry;
use wt_solver::ElectromagneticSolver;

use crate::error::{AppError, AppResult};
use crate::progress::{TuneProgressEvent, TuneStage};
use crate::project_service::build_model;

/// Change every wire of radius `from_radius` to `to_radius`.
#[derive(Debug, Clone, Copy)]
pub struct CompensateRequest {
    pub from_radius: f64,
    pub to_radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompensateResponse {
    /// In processing order (last declared wire first)
    pub reports: Vec<CompensationReport>,
    pub elapsed_s: f64,
}

/// Search configuration from the project's tuning section.
pub fn search_config(tuning: Option<&TuningDef>) -> NelderMeadConfig {
    let mut config = NelderMeadConfig::default();
    if let Some(t) = tuning {
        config.f_tol = t.f_tol.unwrap_or(config.f_tol);
        config.x_tol = t.x_tol.unwrap_or(config.x_tol);
        config.initial_step = t.initial_step.unwrap_or(config.initial_step);
        if let Some(max) = t.max_evaluations {
            config.max_evaluations = max;
            config.max_iterations = max;
        }
    }
    config
}

pub fn objective_for(tuning: Option<&TuningDef>) -> WeightedDeviation {
    let Some(t) = tuning else {
        return WeightedDeviation::default();
    };
    let weights = t
        .weights
        .as_ref()
        .map(|w| ObjectiveWeights {
            return_loss: w.return_loss,
            front_back: w.front_back,
            gain: w.gain,
        })
        .unwrap_or_default();
    let penalty = match t.penalty {
        Some(PenaltyDef::Signed) => Penalty::Signed,
        Some(PenaltyDef::Absolute) => Penalty::Absolute,
        None => Penalty::default(),
    };
    WeightedDeviation::new(weights, penalty)
}

/// Compensate a radius change and write the adjusted geometry back into `project`.
///
/// `project` is only modified when every wire was compensated successfully.
pub fn compensate(
    solver: &dyn ElectromagneticSolver,
    project: &mut Project,
    request: CompensateRequest,
    mut progress: Option<&mut dyn FnMut(TuneProgressEvent)>,
) -> AppResult<CompensateResponse> {
    let start = Instant::now();
    let mut emit = |event: TuneProgressEvent| {
        if let Some(cb) = progress.as_deref_mut() {
            cb(event);
        }
    };

    emit(TuneProgressEvent::stage(TuneStage::BuildingModel, 0.0, None));
    let mut model = build_model(project)?;
    if model.wires_with_radius(request.from_radius).is_empty() {
        return Err(AppError::InvalidInput(format!(
            "no wire has radius {}",
            request.from_radius
        )));
    }

    let tuning = project.tuning.as_ref();
    let compensator = RadiusCompensator::new(solver)
        .with_search(search_config(tuning))
        .with_objective(objective_for(tuning));

    emit(TuneProgressEvent::stage(
        TuneStage::TakingBaseline,
        start.elapsed().as_secs_f64(),
        None,
    ));
    solver_timing::reset_all();
    let reports = compensator.rescale_radius(
        &mut model,
        request.from_radius,
        request.to_radius,
        &mut |event| {
            emit(TuneProgressEvent::from_compensation(
                event,
                start.elapsed().as_secs_f64(),
            ))
        },
    )?;
    solver_timing::log_summary();

    emit(TuneProgressEvent::stage(
        TuneStage::StoringGeometry,
        start.elapsed().as_secs_f64(),
        None,
    ));
    store_geometry(project, &model)?;

    let elapsed_s = start.elapsed().as_secs_f64();
    emit(TuneProgressEvent::stage(TuneStage::Completed, elapsed_s, None));
    info!(wires = reports.len(), elapsed_s, "compensation finished");
    Ok(CompensateResponse { reports, elapsed_s })
}

/// Re-target the project's geometry to `to_mhz`, scaling coordinates and radii.
pub fn rescale_frequency(project: &mut Project, to_mhz: f64) -> AppResult<()> {
    let mut model = build_model(project)?;
    let from_mhz = model.design_frequency().mhz();
    model.rescale_frequency(from_mhz, to_mhz)?;
    store_geometry(project, &model)?;
    info!(from_mhz, to_mhz, "geometry rescaled");
    Ok(())
}
