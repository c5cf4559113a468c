//! Electromagnetic solver boundary for wiretune.
//!
//! The solver itself is an external collaborator. This crate defines the
//! contract the sweep and tuning code needs from it:
//!
//! - [`ElectromagneticSolver::build`] turns a [`GeometryModel`] at one
//!   frequency into an owned [`SolverContext`]
//! - the context answers input impedance and far-field gain queries
//! - dropping the context releases it; nothing carries over to the next build
//!
//! [`ThinWireSolver`] is a closed-form thin-wire approximation that honours
//! the same contract, so the pipeline can run without an external engine.
//!
//! [`GeometryModel`]: wt_geometry::GeometryModel

pub mod direction;
pub mod error;
pub mod thin_wire;
pub mod traits;

pub use direction::{AngleRange, Direction};
pub use error::{SolverError, SolverResult};
pub use thin_wire::{GAIN_FLOOR_DB, ThinWireSolver};
pub use traits::{ElectromagneticSolver, SolverContext};
