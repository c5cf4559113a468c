//! Frequency list generation.

use wt_core::{Real, WtError, WtResult, ensure_finite, ensure_positive};

/// Slack on the step count so that, e.g., 14.0..14.3 by 0.1 yields 4 points
/// despite (14.3 - 14.0) / 0.1 evaluating to 2.9999999999999893.
const COUNT_EPSILON: Real = 1e-9;

/// Evenly spaced frequencies from `start` to `end` inclusive.
///
/// `step == 0` means "exactly one frequency" and returns `[start]`. Otherwise
/// the point count is `floor((end - start) / step) + 1` and the points are
/// spread evenly over `[start, end]`, so `end` is always the last point.
pub fn list_frequencies(start: Real, end: Real, step: Real) -> WtResult<Vec<Real>> {
    let start = ensure_positive(start, "sweep start frequency")?;
    if step == 0.0 {
        return Ok(vec![start]);
    }
    let end = ensure_finite(end, "sweep end frequency")?;
    let step = ensure_positive(step, "sweep step")?;
    if end < start {
        return Err(WtError::InvalidArg {
            what: "sweep end frequency below start",
        });
    }

    let count = ((end - start) / step + COUNT_EPSILON).floor() as usize + 1;
    if count == 1 {
        return Ok(vec![start]);
    }

    let delta = (end - start) / (count - 1) as Real;
    let mut points: Vec<Real> = (0..count).map(|i| start + i as Real * delta).collect();
    // Ensure exact endpoint
    points[count - 1] = end;
    Ok(points)
}
