//! Nelder–Mead simplex search.

use crate::error::{OptimError, OptimResult};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Nelder–Mead configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NelderMeadConfig {
    /// Convergence: largest objective spread across the simplex
    pub f_tol: f64,
    /// Convergence: largest coordinate distance from the best vertex
    pub x_tol: f64,
    /// Relative offset of the initial simplex vertices from `x0`
    pub initial_step: f64,
    /// Absolute offset used for zero components of `x0`
    pub zero_step: f64,
    /// Objective evaluation budget
    pub max_evaluations: usize,
    /// Iteration budget
    pub max_iterations: usize,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            f_tol: 1e-4,
            x_tol: 1e-8,
            initial_step: 0.05,
            zero_step: 0.00025,
            max_evaluations: 6000,
            max_iterations: 6000,
        }
    }
}

impl NelderMeadConfig {
    pub fn validate(&self) -> OptimResult<()> {
        if !(self.f_tol.is_finite() && self.f_tol >= 0.0) {
            return Err(OptimError::Config { what: "f_tol" });
        }
        if !(self.x_tol.is_finite() && self.x_tol >= 0.0) {
            return Err(OptimError::Config { what: "x_tol" });
        }
        if !(self.initial_step.is_finite() && self.initial_step != 0.0) {
            return Err(OptimError::Config {
                what: "initial_step",
            });
        }
        if !(self.zero_step.is_finite() && self.zero_step != 0.0) {
            return Err(OptimError::Config { what: "zero_step" });
        }
        if self.max_evaluations == 0 {
            return Err(OptimError::Config {
                what: "max_evaluations",
            });
        }
        Ok(())
    }
}

/// Nelder–Mead search result.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// Best vertex found
    pub x: DVector<f64>,
    /// Objective at `x`
    pub f: f64,
    pub evaluations: usize,
    pub iterations: usize,
    /// Tolerances met (as opposed to a budget running out)
    pub converged: bool,
}

// Standard reflection / expansion / contraction / shrink coefficients
const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;

/// Minimize `objective` starting from `x0`.
///
/// Terminates when both the simplex diameter (`x_tol`) and the objective
/// spread (`f_tol`) are within tolerance, or when a budget is exhausted.
/// Budgets are checked before each iteration, so one iteration may overrun
/// the evaluation budget by at most `n + 1` calls. NaN objective values are
/// ranked as +∞. Objective errors abort the search.
pub fn minimize<F>(
    x0: DVector<f64>,
    mut objective: F,
    config: &NelderMeadConfig,
) -> OptimResult<NelderMeadResult>
where
    F: FnMut(&DVector<f64>) -> OptimResult<f64>,
{
    config.validate()?;
    let n = x0.len();
    if n == 0 {
        return Err(OptimError::Config {
            what: "empty parameter vector",
        });
    }

    let mut objective = Counted {
        f: &mut objective,
        evaluations: 0,
    };

    // Initial simplex: x0 plus one vertex offset along each axis
    let mut sim: Vec<DVector<f64>> = Vec::with_capacity(n + 1);
    sim.push(x0.clone());
    for k in 0..n {
        let mut y = x0.clone();
        if y[k] != 0.0 {
            y[k] *= 1.0 + config.initial_step;
        } else {
            y[k] = config.zero_step;
        }
        sim.push(y);
    }
    let mut fsim: Vec<f64> = Vec::with_capacity(n + 1);
    for v in &sim {
        fsim.push(objective.eval(v)?);
    }

    let mut iterations = 0;
    let mut converged = false;

    loop {
        sort_simplex(&mut sim, &mut fsim);

        let x_spread = sim[1..]
            .iter()
            .map(|v| (v - &sim[0]).amax())
            .fold(0.0, f64::max);
        let f_spread = fsim[1..]
            .iter()
            .map(|f| (f - fsim[0]).abs())
            .fold(0.0, f64::max);
        if x_spread <= config.x_tol && f_spread <= config.f_tol {
            converged = true;
            break;
        }
        if objective.evaluations >= config.max_evaluations || iterations >= config.max_iterations {
            break;
        }
        iterations += 1;
        trace!(iterations, best = fsim[0], x_spread, f_spread, "nelder-mead iteration");

        let centroid = sim[..n]
            .iter()
            .fold(DVector::zeros(n), |acc, v| acc + v)
            / n as f64;
        let worst = sim[n].clone();

        let xr = &centroid * (1.0 + RHO) - &worst * RHO;
        let fxr = objective.eval(&xr)?;

        let mut shrink = false;
        if fxr < fsim[0] {
            let xe = &centroid * (1.0 + RHO * CHI) - &worst * (RHO * CHI);
            let fxe = objective.eval(&xe)?;
            if fxe < fxr {
                sim[n] = xe;
                fsim[n] = fxe;
            } else {
                sim[n] = xr;
                fsim[n] = fxr;
            }
        } else if fxr < fsim[n - 1] {
            sim[n] = xr;
            fsim[n] = fxr;
        } else if fxr < fsim[n] {
            // outside contraction
            let xc = &centroid * (1.0 + PSI * RHO) - &worst * (PSI * RHO);
            let fxc = objective.eval(&xc)?;
            if fxc <= fxr {
                sim[n] = xc;
                fsim[n] = fxc;
            } else {
                shrink = true;
            }
        } else {
            // inside contraction
            let xcc = &centroid * (1.0 - PSI) + &worst * PSI;
            let fxcc = objective.eval(&xcc)?;
            if fxcc < fsim[n] {
                sim[n] = xcc;
                fsim[n] = fxcc;
            } else {
                shrink = true;
            }
        }

        if shrink {
            for j in 1..=n {
                sim[j] = &sim[0] + (&sim[j] - &sim[0]) * SIGMA;
                fsim[j] = objective.eval(&sim[j])?;
            }
        }
    }

    Ok(NelderMeadResult {
        x: sim[0].clone(),
        f: fsim[0],
        evaluations: objective.evaluations,
        iterations,
        converged,
    })
}

/// Objective wrapper that counts calls and ranks NaN as +∞.
struct Counted<'f, F> {
    f: &'f mut F,
    evaluations: usize,
}

impl<F> Counted<'_, F>
where
    F: FnMut(&DVector<f64>) -> OptimResult<f64>,
{
    fn eval(&mut self, x: &DVector<f64>) -> OptimResult<f64> {
        self.evaluations += 1;
        let f = (self.f)(x)?;
        Ok(if f.is_nan() { f64::INFINITY } else { f })
    }
}

/// Order vertices by ascending objective; stable, so earlier vertices win ties.
fn sort_simplex(sim: &mut Vec<DVector<f64>>, fsim: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..fsim.len()).collect();
    order.sort_by(|&a, &b| fsim[a].total_cmp(&fsim[b]));
    let sorted_sim: Vec<DVector<f64>> = order.iter().map(|&i| sim[i].clone()).collect();
    let sorted_f: Vec<f64> = order.iter().map(|&i| fsim[i]).collect();
    *sim = sorted_sim;
    *fsim = sorted_f;
}
