//! wt-geometry: wire antenna geometry for wiretune.
//!
//! A [`GeometryModel`] owns the wires, loads, excitations, ground and design
//! frequency that a solver context is built from. The model is mutated in
//! place by the radius compensation search; [`WireSnapshot`] captures a
//! wire's endpoints before that happens and defines the frame (the wire
//! midpoint) that length scaling is applied about.

pub mod cards;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod validate;
pub mod wire;

pub use cards::{Excitation, FrequencySetting, Ground, Loading};
pub use error::{GeometryError, GeometryResult};
pub use model::GeometryModel;
pub use snapshot::WireSnapshot;
pub use wire::{Point3, Wire};
