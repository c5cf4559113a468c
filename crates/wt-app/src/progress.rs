use wt_optim::{CompensationProgress, TrialProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuneStage {
    BuildingModel,
    TakingBaseline,
    Compensating,
    StoringGeometry,
    Completed,
}

impl TuneStage {
    pub fn label(self) -> &'static str {
        match self {
            TuneStage::BuildingModel => "building model",
            TuneStage::TakingBaseline => "baseline",
            TuneStage::Compensating => "compensating",
            TuneStage::StoringGeometry => "storing geometry",
            TuneStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TuneProgressEvent {
    pub stage: TuneStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    /// Wire under compensation, by declaration index
    pub wire_index: Option<usize>,
    pub trial: Option<TrialProgress>,
}

impl TuneProgressEvent {
    pub fn stage(stage: TuneStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            wire_index: None,
            trial: None,
        }
    }

    pub(crate) fn from_compensation(event: CompensationProgress, elapsed_wall_s: f64) -> Self {
        match event {
            CompensationProgress::WireStarted {
                wire_index,
                tag,
                from_radius,
                to_radius,
            } => Self {
                wire_index: Some(wire_index),
                ..Self::stage(
                    TuneStage::Compensating,
                    elapsed_wall_s,
                    Some(format!(
                        "wire {wire_index} (tag {tag}): radius {from_radius} -> {to_radius}"
                    )),
                )
            },
            CompensationProgress::Trial(trial) => Self {
                wire_index: Some(trial.wire_index),
                trial: Some(trial),
                ..Self::stage(TuneStage::Compensating, elapsed_wall_s, None)
            },
            CompensationProgress::WireFinished(report) => Self {
                wire_index: Some(report.wire_index),
                ..Self::stage(
                    TuneStage::Compensating,
                    elapsed_wall_s,
                    Some(format!(
                        "wire {} scaled by {:.6} (objective {:.4})",
                        report.wire_index, report.scale, report.objective
                    )),
                )
            },
        }
    }
}
