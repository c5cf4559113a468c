//! Sub-sample resonance peak estimation.

use serde::Serialize;
use wt_core::Real;

use crate::error::{SweepError, SweepResult};

/// Best-match point of a return-loss series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResonancePeak {
    /// Peak return loss in dB
    pub value: Real,
    /// Frequency of the peak in MHz
    pub frequency: Real,
    /// Index of the largest sample
    pub index: usize,
    /// Whether the peak was refined by parabolic interpolation
    pub interpolated: bool,
}

/// Locate the return-loss maximum with parabolic refinement.
///
/// The largest sample (first on ties) is refined by a parabola through it
/// and its two neighbours, using normalized abscissae -1, 0, +1 and the
/// spacing to the right neighbour as the frequency step. A maximum on
/// either end of the sweep, or next to a non-finite sample, is reported
/// as is. The parabola's curvature is not checked; the sweep must be dense
/// enough near the peak for the estimate to mean anything.
pub fn find_peak(return_losses: &[Real], frequencies: &[Real]) -> SweepResult<ResonancePeak> {
    if return_losses.len() != frequencies.len() {
        return Err(SweepError::LengthMismatch {
            what: "return losses vs frequencies",
            left: return_losses.len(),
            right: frequencies.len(),
        });
    }
    if return_losses.is_empty() {
        return Err(SweepError::Empty {
            what: "return loss series",
        });
    }

    let mut idx = 0;
    for (i, &v) in return_losses.iter().enumerate() {
        if v > return_losses[idx] || return_losses[idx].is_nan() {
            idx = i;
        }
    }

    let verbatim = ResonancePeak {
        value: return_losses[idx],
        frequency: frequencies[idx],
        index: idx,
        interpolated: false,
    };

    if idx == 0 || idx == return_losses.len() - 1 {
        return Ok(verbatim);
    }

    let yl = return_losses[idx - 1];
    let y0 = return_losses[idx];
    let yr = return_losses[idx + 1];
    if !(yl.is_finite() && y0.is_finite() && yr.is_finite()) {
        return Ok(verbatim);
    }

    let a = (yr + yl) / 2.0 - y0;
    let b = (yr - yl) / 2.0;
    let x = -b / (2.0 * a);
    if !x.is_finite() {
        return Ok(verbatim);
    }

    let step = frequencies[idx + 1] - frequencies[idx];
    Ok(ResonancePeak {
        value: a * x * x + b * x + y0,
        frequency: frequencies[idx] + x * step,
        index: idx,
        interpolated: true,
    })
}
