//! Solver contract.

use nalgebra::DMatrix;
use num_complex::Complex64;
use wt_core::Real;
use wt_geometry::{FrequencySetting, GeometryModel};

use crate::direction::{AngleRange, Direction};
use crate::error::SolverResult;

/// Factory for single-frequency solver contexts.
///
/// Implementations must be thread-safe (Send + Sync) so independent
/// frequencies may be evaluated in parallel. A context is built from the
/// geometry as it is at call time; later geometry mutations do not affect
/// an already-built context.
pub trait ElectromagneticSolver: Send + Sync {
    /// Solver name (for logging).
    fn name(&self) -> &str;

    /// Build a context for `model` at exactly one frequency.
    fn build<'a>(
        &'a self,
        model: &GeometryModel,
        frequency: FrequencySetting,
    ) -> SolverResult<Box<dyn SolverContext + 'a>>;
}

/// Solved state at one frequency. Released on drop.
pub trait SolverContext {
    fn frequency(&self) -> FrequencySetting;

    /// Input impedance at the excitation with index `port`, in ohms.
    fn input_impedance(&mut self, port: usize) -> SolverResult<Complex64>;

    /// Far-field power gain toward `direction`, in dBi.
    fn gain(&mut self, direction: Direction) -> SolverResult<Real>;

    /// Gain over a theta × phi grid, rows indexed by theta, columns by phi.
    ///
    /// The default implementation queries [`SolverContext::gain`] per point.
    fn gain_grid(&mut self, theta: AngleRange, phi: AngleRange) -> SolverResult<DMatrix<Real>> {
        let mut grid = DMatrix::zeros(theta.count, phi.count);
        for i in 0..theta.count {
            for j in 0..phi.count {
                grid[(i, j)] = self.gain(Direction::new(theta.angle(i), phi.angle(j)))?;
            }
        }
        Ok(grid)
    }
}
