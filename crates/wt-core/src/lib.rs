//! wt-core: stable foundation for wiretune.
//!
//! Contains:
//! - units (uom SI types + constructors, wavelength helper)
//! - numeric (Real + tolerances + float helpers)
//! - ids (wire tags as used by geometry records)
//! - error (shared error types)
//! - timing (solver call counters)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WtError, WtResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
