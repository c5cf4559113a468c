//! Horizontal and vertical radiation pattern cuts.
//!
//! Both cuts sweep a full circle in 4° steps (91 points, first and last
//! coincide) on top of the solver's gain grid query.

use serde::Serialize;
use wt_core::Real;
use wt_geometry::GeometryModel;
use wt_solver::{AngleRange, ElectromagneticSolver};

use crate::error::SweepResult;

pub const CUT_STEP_DEG: Real = 4.0;
pub const CUT_POINTS: usize = 91;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CutKind {
    /// Constant elevation, azimuth 0..360°
    Horizontal,
    /// Constant azimuth, elevation 0..360° (through zenith and back)
    Vertical,
}

/// Gain along one great-circle cut at the design frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCut {
    pub kind: CutKind,
    pub frequency_mhz: Real,
    /// Azimuth (horizontal cut) or elevation (vertical cut), degrees
    pub angles_deg: Vec<Real>,
    /// Gain in dBi, parallel to `angles_deg`
    pub gains_db: Vec<Real>,
}

impl PatternCut {
    /// Largest gain and the angle it occurs at (first on ties).
    pub fn max_gain(&self) -> Option<(Real, Real)> {
        self.gains_db
            .iter()
            .zip(&self.angles_deg)
            .fold(None, |best, (&g, &a)| match best {
                Some((bg, _)) if bg >= g => best,
                _ => Some((g, a)),
            })
    }
}

/// Azimuth cut at `elevation_deg` above the horizon.
pub fn horizontal_cut(
    solver: &dyn ElectromagneticSolver,
    model: &GeometryModel,
    elevation_deg: Real,
) -> SweepResult<PatternCut> {
    let frequency = model.design_frequency();
    let theta = AngleRange::fixed(90.0 - elevation_deg);
    let phi = AngleRange::new(0.0, CUT_STEP_DEG, CUT_POINTS);

    let mut ctx = solver.build(model, frequency)?;
    let grid = ctx.gain_grid(theta, phi)?;

    Ok(PatternCut {
        kind: CutKind::Horizontal,
        frequency_mhz: frequency.mhz(),
        angles_deg: phi.angles().collect(),
        gains_db: grid.row(0).iter().copied().collect(),
    })
}

/// Elevation cut in the plane of `azimuth_deg`, starting at the horizon.
pub fn vertical_cut(
    solver: &dyn ElectromagneticSolver,
    model: &GeometryModel,
    azimuth_deg: Real,
) -> SweepResult<PatternCut> {
    let frequency = model.design_frequency();
    let theta = AngleRange::new(90.0, -CUT_STEP_DEG, CUT_POINTS);
    let phi = AngleRange::fixed(azimuth_deg);

    let mut ctx = solver.build(model, frequency)?;
    let grid = ctx.gain_grid(theta, phi)?;

    Ok(PatternCut {
        kind: CutKind::Vertical,
        frequency_mhz: frequency.mhz(),
        angles_deg: theta.angles().map(|t| 90.0 - t).collect(),
        gains_db: grid.column(0).iter().copied().collect(),
    })
}
