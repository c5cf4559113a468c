//! Straight wire segments.

use nalgebra::Vector3;
use wt_core::{Real, Tag};

use crate::snapshot::WireSnapshot;

/// Cartesian point in meters.
pub type Point3 = Vector3<Real>;

/// One straight wire: tag, segment count, endpoints and radius (all in meters).
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub tag: Tag,
    pub segments: u32,
    pub p1: Point3,
    pub p2: Point3,
    pub radius: Real,
}

impl Wire {
    pub fn new(tag: Tag, segments: u32, p1: Point3, p2: Point3, radius: Real) -> Self {
        Self {
            tag,
            segments,
            p1,
            p2,
            radius,
        }
    }

    pub fn length(&self) -> Real {
        (self.p2 - self.p1).norm()
    }

    pub fn midpoint(&self) -> Point3 {
        (self.p1 + self.p2) * 0.5
    }

    /// Unit vector from `p1` to `p2`, `None` for a zero-length wire.
    pub fn direction(&self) -> Option<Point3> {
        let d = self.p2 - self.p1;
        let len = d.norm();
        if len > 0.0 { Some(d / len) } else { None }
    }

    /// Copy the current endpoints before they get perturbed.
    pub fn snapshot(&self) -> WireSnapshot {
        WireSnapshot::new(self.p1, self.p2)
    }

    /// Place the endpoints at `snapshot` scaled by `scale` about its midpoint.
    pub fn apply_scale(&mut self, snapshot: &WireSnapshot, scale: Real) {
        let (p1, p2) = snapshot.scaled_endpoints(scale);
        self.p1 = p1;
        self.p2 = p2;
    }

    /// Distance of the center of segment `segment` (1-based) from the wire midpoint,
    /// signed along the wire direction.
    pub fn segment_offset(&self, segment: u32) -> Real {
        let n = self.segments.max(1) as Real;
        let frac = (segment as Real - 0.5) / n;
        (frac - 0.5) * self.length()
    }
}
