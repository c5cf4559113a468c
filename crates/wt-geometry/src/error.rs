//! Geometry-specific error types.

use thiserror::Error;
use wt_core::{Tag, WtError};

/// Geometry construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Model has no wires")]
    NoWires,

    #[error("Model has no excitation")]
    NoExcitation,

    #[error("Duplicate wire tag {tag}")]
    DuplicateTag { tag: Tag },

    #[error("Wire {tag} has zero length")]
    ZeroLength { tag: Tag },

    #[error("Wire {tag} has invalid radius {radius}")]
    InvalidRadius { tag: Tag, radius: f64 },

    #[error("Wire {tag} has no segments")]
    NoSegments { tag: Tag },

    #[error("{what} refers to unknown wire tag {tag}")]
    UnknownTag { what: &'static str, tag: Tag },

    #[error("Excitation segment {segment} out of range for wire {tag} ({segments} segments)")]
    SegmentOutOfRange {
        tag: Tag,
        segment: u32,
        segments: u32,
    },

    #[error("Wire index {index} out of range ({len} wires)")]
    WireIndex { index: usize, len: usize },

    #[error(transparent)]
    Core(#[from] WtError),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
