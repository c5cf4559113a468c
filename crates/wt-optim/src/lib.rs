//! Geometry tuning for wiretune.
//!
//! After a wire's radius is forced to a new value, [`RadiusCompensator`]
//! searches a single length-scale factor for that wire (applied about its
//! midpoint) that restores the antenna's baseline behavior at the design
//! frequency. The search is a derivative-free Nelder–Mead minimization of a
//! [`TuningObjective`] that folds return loss, front/back ratio and gain
//! deviations into one scalar.

pub mod compensation;
pub mod error;
pub mod nelder_mead;
pub mod objective;

pub use compensation::{
    CompensationProgress, CompensationReport, RadiusCompensator, TrialProgress,
};
pub use error::{OptimError, OptimResult};
pub use nelder_mead::{NelderMeadConfig, NelderMeadResult, minimize};
pub use objective::{ObjectiveWeights, OperatingPoint, Penalty, TuningObjective, WeightedDeviation};
