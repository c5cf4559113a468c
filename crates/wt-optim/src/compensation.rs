//! Radius compensation: restore baseline behavior after a wire gets thicker or thinner.

use nalgebra::DVector;
use serde::Serialize;
use tracing::{debug, info, warn};
use wt_core::{Real, Tolerances, ensure_positive, nearly_equal};
use wt_geometry::GeometryModel;
use wt_solver::ElectromagneticSolver;
use wt_sweep::{CharacteristicsComputer, SweepError, SweepOptions};

use crate::error::{OptimError, OptimResult};
use crate::nelder_mead::{NelderMeadConfig, minimize};
use crate::objective::{OperatingPoint, TuningObjective, WeightedDeviation};

/// One objective evaluation during a wire search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialProgress {
    pub wire_index: usize,
    /// 1-based evaluation counter within this wire's search
    pub evaluation: usize,
    pub scale: Real,
    /// `None` when the trial sample was degenerate or the scale non-positive
    pub point: Option<OperatingPoint>,
    pub objective: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CompensationProgress {
    WireStarted {
        wire_index: usize,
        tag: u32,
        from_radius: Real,
        to_radius: Real,
    },
    Trial(TrialProgress),
    WireFinished(CompensationReport),
}

/// Outcome of compensating one wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompensationReport {
    pub wire_index: usize,
    pub tag: u32,
    pub from_radius: Real,
    pub to_radius: Real,
    /// Length scale applied about the wire midpoint
    pub scale: Real,
    /// Objective at `scale`
    pub objective: Real,
    /// Objective of the unscaled wire at the new radius
    pub initial_objective: Real,
    pub evaluations: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// Searches per-wire length scales that undo a radius change.
pub struct RadiusCompensator<'s> {
    computer: CharacteristicsComputer<'s>,
    search: NelderMeadConfig,
    objective: Box<dyn TuningObjective + 's>,
}

impl<'s> RadiusCompensator<'s> {
    pub fn new(solver: &'s dyn ElectromagneticSolver) -> Self {
        Self {
            computer: CharacteristicsComputer::new(solver),
            search: NelderMeadConfig::default(),
            objective: Box::new(WeightedDeviation::default()),
        }
    }

    pub fn with_sweep_options(mut self, options: SweepOptions) -> Self {
        self.computer = self.computer.with_options(options);
        self
    }

    pub fn with_search(mut self, search: NelderMeadConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_objective(mut self, objective: impl TuningObjective + 's) -> Self {
        self.objective = Box::new(objective);
        self
    }

    pub fn search(&self) -> &NelderMeadConfig {
        &self.search
    }

    /// Operating point of `model` at its design frequency.
    pub fn baseline(&self, model: &GeometryModel) -> OptimResult<OperatingPoint> {
        let ch = self.computer.at_design_frequency(model)?;
        OperatingPoint::baseline(&ch)
    }

    /// Set wire `index` to `to_radius` and rescale its length to match `baseline`.
    ///
    /// The wire's current radius must equal `from_radius`. On success the wire
    /// is left at the new radius and the best scale found. Trials the solver
    /// refuses to build or query score like degenerate samples. On any other
    /// error the wire is restored to its original endpoints and radius.
    pub fn compensate_wire(
        &self,
        model: &mut GeometryModel,
        index: usize,
        from_radius: Real,
        to_radius: Real,
        baseline: &OperatingPoint,
        progress: &mut dyn FnMut(CompensationProgress),
    ) -> OptimResult<CompensationReport> {
        let to_radius = ensure_positive(to_radius, "target radius")?;
        let wire = model.wire_mut(index)?;
        if !nearly_equal(wire.radius, from_radius, Tolerances::default()) {
            return Err(OptimError::RadiusMismatch {
                index,
                expected: from_radius,
                actual: wire.radius,
            });
        }
        let tag = wire.tag.get();
        let snapshot = wire.snapshot();
        wire.radius = to_radius;

        info!(wire = index, tag, from_radius, to_radius, "compensating wire");
        progress(CompensationProgress::WireStarted {
            wire_index: index,
            tag,
            from_radius,
            to_radius,
        });

        let mut evaluation = 0usize;
        let mut initial_objective = None;
        let result = {
            let model = &mut *model;
            let progress = &mut *progress;
            let objective = |x: &DVector<f64>| -> OptimResult<f64> {
                let scale = x[0];
                evaluation += 1;
                let (point, value) = if scale > 0.0 {
                    model.wire_mut(index)?.apply_scale(&snapshot, scale);
                    match self.computer.at_design_frequency(model) {
                        Ok(ch) => match OperatingPoint::first_sample(&ch) {
                            Some(p) => (Some(p), self.objective.score(baseline, &p)),
                            None => (None, self.objective.degenerate_score()),
                        },
                        // the solver rejecting one trial geometry ranks it worst
                        Err(SweepError::Solver(e)) => {
                            warn!(wire = index, scale, error = %e, "trial rejected by solver");
                            (None, self.objective.degenerate_score())
                        }
                        Err(e) => return Err(e.into()),
                    }
                } else {
                    (None, Real::INFINITY)
                };
                debug!(wire = index, evaluation, scale, objective = value, "trial");
                initial_objective.get_or_insert(value);
                progress(CompensationProgress::Trial(TrialProgress {
                    wire_index: index,
                    evaluation,
                    scale,
                    point,
                    objective: value,
                }));
                Ok(value)
            };
            minimize(DVector::from_element(1, 1.0), objective, &self.search)
        };
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                // put the wire back as it was before the search
                let wire = model.wire_mut(index)?;
                wire.apply_scale(&snapshot, 1.0);
                wire.radius = from_radius;
                return Err(e);
            }
        };

        let scale = result.x[0];
        model.wire_mut(index)?.apply_scale(&snapshot, scale);
        if !result.converged {
            warn!(
                wire = index,
                evaluations = result.evaluations,
                "search stopped on budget before converging"
            );
        }

        let report = CompensationReport {
            wire_index: index,
            tag,
            from_radius,
            to_radius,
            scale,
            objective: result.f,
            initial_objective: initial_objective.unwrap_or(result.f),
            evaluations: result.evaluations,
            iterations: result.iterations,
            converged: result.converged,
        };
        info!(
            wire = index,
            scale,
            objective = report.objective,
            evaluations = report.evaluations,
            "wire compensated"
        );
        progress(CompensationProgress::WireFinished(report.clone()));
        Ok(report)
    }

    /// Compensate every wire whose radius equals `from_radius`.
    ///
    /// The baseline is taken once from the unmodified model. Wires are
    /// processed from the last declared to the first, each seeing the
    /// already-compensated state of those after it. Returns reports in
    /// processing order; empty when no wire matches. On error the whole
    /// model is restored to its state before the call.
    pub fn rescale_radius(
        &self,
        model: &mut GeometryModel,
        from_radius: Real,
        to_radius: Real,
        progress: &mut dyn FnMut(CompensationProgress),
    ) -> OptimResult<Vec<CompensationReport>> {
        ensure_positive(to_radius, "target radius")?;
        let indices = model.wires_with_radius(from_radius);
        if indices.is_empty() {
            warn!(from_radius, "no wire has the requested radius");
            return Ok(Vec::new());
        }

        let baseline = self.baseline(model)?;
        info!(
            wires = indices.len(),
            return_loss_db = baseline.return_loss_db,
            front_back_db = baseline.front_back_db,
            gain_db = baseline.gain_db,
            "baseline taken"
        );

        let original = model.clone();
        let mut reports = Vec::with_capacity(indices.len());
        for i in indices.into_iter().rev() {
            match self.compensate_wire(model, i, from_radius, to_radius, &baseline, &mut *progress) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(wire = i, error = %e, "compensation failed, model restored");
                    *model = original;
                    return Err(e);
                }
            }
        }
        Ok(reports)
    }
}
