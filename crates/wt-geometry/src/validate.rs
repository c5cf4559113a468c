//! Geometry validation logic.

use std::collections::HashSet;

use crate::error::{GeometryError, GeometryResult};
use crate::model::GeometryModel;

/// Validate the model: wires well formed, references resolve.
pub(crate) fn validate_model(model: &GeometryModel) -> GeometryResult<()> {
    if model.wires.is_empty() {
        return Err(GeometryError::NoWires);
    }

    let mut tags = HashSet::new();
    for wire in &model.wires {
        if !tags.insert(wire.tag) {
            return Err(GeometryError::DuplicateTag { tag: wire.tag });
        }
        if wire.segments == 0 {
            return Err(GeometryError::NoSegments { tag: wire.tag });
        }
        if !(wire.radius.is_finite() && wire.radius > 0.0) {
            return Err(GeometryError::InvalidRadius {
                tag: wire.tag,
                radius: wire.radius,
            });
        }
        if !(wire.length().is_finite() && wire.length() > 0.0) {
            return Err(GeometryError::ZeroLength { tag: wire.tag });
        }
    }

    if model.excitations.is_empty() {
        return Err(GeometryError::NoExcitation);
    }

    for ex in &model.excitations {
        let wire = model
            .wire_by_tag(ex.tag)
            .ok_or(GeometryError::UnknownTag {
                what: "excitation",
                tag: ex.tag,
            })?;
        if ex.segment == 0 || ex.segment > wire.segments {
            return Err(GeometryError::SegmentOutOfRange {
                tag: ex.tag,
                segment: ex.segment,
                segments: wire.segments,
            });
        }
    }

    for load in &model.loads {
        if model.wire_by_tag(load.tag).is_none() {
            return Err(GeometryError::UnknownTag {
                what: "load",
                tag: load.tag,
            });
        }
    }

    Ok(())
}
