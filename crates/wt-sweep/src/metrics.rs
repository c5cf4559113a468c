//! Impedance-derived match metrics against a 50 Ω reference.

use num_complex::Complex64;
use serde::Serialize;
use wt_core::Real;
use wt_core::constants::Z0_OHMS;

pub fn to_db_power(x: Real) -> Real {
    10.0 * x.log10()
}

pub fn to_db_voltage(x: Real) -> Real {
    20.0 * x.log10()
}

pub fn from_db_power(db: Real) -> Real {
    10.0_f64.powf(db / 10.0)
}

pub fn from_db_voltage(db: Real) -> Real {
    10.0_f64.powf(db / 20.0)
}

/// Γ = (Z - 50) / (Z + 50)
pub fn reflection_coefficient(z: Complex64) -> Complex64 {
    (z - Z0_OHMS) / (z + Z0_OHMS)
}

/// Return loss in dB for a reflection magnitude. Infinite for a perfect match.
pub fn return_loss_db(gamma_mag: Real) -> Real {
    -to_db_voltage(gamma_mag)
}

/// VSWR for a reflection magnitude below 1.
pub fn vswr(gamma_mag: Real) -> Real {
    (1.0 + gamma_mag) / (1.0 - gamma_mag)
}

/// Match metrics for one impedance sample.
///
/// A sample with Re(Z) ≤ 0 (|Γ| ≥ 1) is electrically degenerate: return loss
/// and VSWR are `None` instead of a negative or undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpedanceMetrics {
    pub impedance: Complex64,
    pub reflection_coeff: Complex64,
    pub return_loss_db: Option<Real>,
    pub vswr: Option<Real>,
}

impl ImpedanceMetrics {
    pub fn from_impedance(impedance: Complex64) -> Self {
        let gamma = reflection_coefficient(impedance);
        let mag = gamma.norm();
        let valid = impedance.re > 0.0 && impedance.im.is_finite() && mag < 1.0;
        Self {
            impedance,
            reflection_coeff: gamma,
            return_loss_db: valid.then(|| return_loss_db(mag)),
            vswr: valid.then(|| vswr(mag)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.return_loss_db.is_some()
    }
}
