//! Pre-perturbation wire endpoint snapshot.

use crate::wire::Point3;
use wt_core::Real;

/// Immutable copy of a wire's endpoints taken before any length scaling.
///
/// Every trial scale is applied relative to this snapshot, never to the
/// already-perturbed wire, so scales do not compound across trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireSnapshot {
    p1: Point3,
    p2: Point3,
}

impl WireSnapshot {
    pub fn new(p1: Point3, p2: Point3) -> Self {
        Self { p1, p2 }
    }

    pub fn p1(&self) -> Point3 {
        self.p1
    }

    pub fn p2(&self) -> Point3 {
        self.p2
    }

    pub fn midpoint(&self) -> Point3 {
        (self.p1 + self.p2) * 0.5
    }

    /// `midpoint + scale * (p - midpoint)` for both endpoints.
    pub fn scaled_endpoints(&self, scale: Real) -> (Point3, Point3) {
        let center = self.midpoint();
        (
            center + (self.p1 - center) * scale,
            center + (self.p2 - center) * scale,
        )
    }
}
