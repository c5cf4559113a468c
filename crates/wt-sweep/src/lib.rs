//! wt-sweep: frequency sweeps and derived antenna characteristics.
//!
//! Provides:
//! - impedance metrics (reflection coefficient, return loss, VSWR, dB helpers)
//! - frequency list generation
//! - [`CharacteristicsComputer`], which rebuilds the solver per frequency and
//!   derives [`DerivedCharacteristics`]
//! - sub-sample resonance peak estimation
//! - horizontal and vertical pattern cuts

pub mod characteristics;
pub mod error;
pub mod frequencies;
pub mod metrics;
pub mod pattern;
pub mod resonance;

pub use characteristics::{
    CharacteristicsComputer, DerivedCharacteristics, RawSample, SampleQuality, SweepOptions,
};
pub use error::{SweepError, SweepResult};
pub use frequencies::list_frequencies;
pub use metrics::{
    ImpedanceMetrics, from_db_power, from_db_voltage, reflection_coefficient, return_loss_db,
    to_db_power, to_db_voltage, vswr,
};
pub use pattern::{CutKind, PatternCut, horizontal_cut, vertical_cut};
pub use resonance::{ResonancePeak, find_peak};
