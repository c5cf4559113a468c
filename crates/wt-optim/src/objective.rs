//! Tuning objectives: how far a trial drifted from the baseline.

use serde::{Deserialize, Serialize};
use wt_core::Real;
use wt_sweep::DerivedCharacteristics;

use crate::error::{OptimError, OptimResult};

/// The single-frequency metrics a tuning objective compares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingPoint {
    pub return_loss_db: Real,
    pub front_back_db: Real,
    pub gain_db: Real,
}

impl OperatingPoint {
    /// First sample of `ch`, `None` when that sample is degenerate.
    pub fn first_sample(ch: &DerivedCharacteristics) -> Option<Self> {
        let return_loss_db = (*ch.return_losses().first()?)?;
        Some(Self {
            return_loss_db,
            front_back_db: *ch.front_back_ratios().first()?,
            gain_db: *ch.gains().first()?,
        })
    }

    /// Like [`OperatingPoint::first_sample`] but an error for a degenerate baseline.
    pub fn baseline(ch: &DerivedCharacteristics) -> OptimResult<Self> {
        let point = Self::first_sample(ch).ok_or_else(|| OptimError::Baseline {
            what: "baseline sample is degenerate".to_string(),
        })?;
        if !point.return_loss_db.is_finite() {
            return Err(OptimError::Baseline {
                what: "baseline return loss is not finite (perfect match)".to_string(),
            });
        }
        Ok(point)
    }
}

/// Weights folding the three deviations into one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub return_loss: Real,
    pub front_back: Real,
    pub gain: Real,
}

impl Default for ObjectiveWeights {
    /// Gain deviation matters most, front/back least.
    fn default() -> Self {
        Self {
            return_loss: 0.5,
            front_back: 0.3,
            gain: 2.0,
        }
    }
}

/// How a single deviation `baseline - trial` is penalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    /// `|baseline - trial|`: any drift, up or down, costs
    #[default]
    Absolute,
    /// `baseline - trial`: improvements over the baseline are rewarded
    Signed,
}

impl Penalty {
    fn apply(self, baseline: Real, trial: Real) -> Real {
        match self {
            Penalty::Absolute => (baseline - trial).abs(),
            Penalty::Signed => baseline - trial,
        }
    }
}

/// Scalarization of a trial against the baseline. Lower is better.
pub trait TuningObjective: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, baseline: &OperatingPoint, trial: &OperatingPoint) -> Real;

    /// Score for a trial whose sample came back degenerate.
    fn degenerate_score(&self) -> Real {
        Real::INFINITY
    }
}

/// Weighted sum of per-metric deviations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightedDeviation {
    pub weights: ObjectiveWeights,
    pub penalty: Penalty,
}

impl WeightedDeviation {
    pub fn new(weights: ObjectiveWeights, penalty: Penalty) -> Self {
        Self { weights, penalty }
    }
}

impl TuningObjective for WeightedDeviation {
    fn name(&self) -> &str {
        match self.penalty {
            Penalty::Absolute => "weighted-absolute",
            Penalty::Signed => "weighted-signed",
        }
    }

    fn score(&self, baseline: &OperatingPoint, trial: &OperatingPoint) -> Real {
        let p = self.penalty;
        let w = &self.weights;
        w.return_loss * p.apply(baseline.return_loss_db, trial.return_loss_db)
            + w.front_back * p.apply(baseline.front_back_db, trial.front_back_db)
            + w.gain * p.apply(baseline.gain_db, trial.gain_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(rl: Real, fb: Real, g: Real) -> OperatingPoint {
        OperatingPoint {
            return_loss_db: rl,
            front_back_db: fb,
            gain_db: g,
        }
    }

    #[test]
    fn identical_points_score_zero() {
        let base = point(20.0, 15.0, 7.0);
        for penalty in [Penalty::Absolute, Penalty::Signed] {
            let obj = WeightedDeviation::new(ObjectiveWeights::default(), penalty);
            assert_eq!(obj.score(&base, &base), 0.0);
        }
    }

    #[test]
    fn signed_uses_fixed_weights() {
        let obj = WeightedDeviation::new(ObjectiveWeights::default(), Penalty::Signed);
        let base = point(20.0, 15.0, 7.0);
        let trial = point(18.0, 16.0, 6.5);
        // 0.5*2 + 0.3*(-1) + 2.0*0.5
        assert!((obj.score(&base, &trial) - 1.7).abs() < 1e-12);
    }

    #[test]
    fn signed_rewards_improvement_absolute_does_not() {
        let base = point(20.0, 15.0, 7.0);
        let better = point(22.0, 15.0, 7.0);
        let signed = WeightedDeviation::new(ObjectiveWeights::default(), Penalty::Signed);
        let absolute = WeightedDeviation::default();
        assert!(signed.score(&base, &better) < 0.0);
        assert!((absolute.score(&base, &better) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn default_weights() {
        let w = ObjectiveWeights::default();
        assert_eq!((w.return_loss, w.front_back, w.gain), (0.5, 0.3, 2.0));
        assert_eq!(WeightedDeviation::default().penalty, Penalty::Absolute);
    }
}
