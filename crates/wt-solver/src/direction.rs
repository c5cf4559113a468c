//! Far-field directions and angle grids.
//!
//! Angles follow the usual NEC convention: `theta` is measured from the +z
//! axis (zenith), `phi` counter-clockwise from +x in the xy plane. Both are
//! in degrees.

use nalgebra::Vector3;
use wt_core::Real;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub theta_deg: Real,
    pub phi_deg: Real,
}

impl Direction {
    pub const fn new(theta_deg: Real, phi_deg: Real) -> Self {
        Self { theta_deg, phi_deg }
    }

    /// Horizon, along +x. The default forward direction for sweeps.
    pub const HORIZON_X: Self = Self::new(90.0, 0.0);

    /// Same elevation, azimuth + 180°.
    pub fn opposite_azimuth(self) -> Self {
        Self::new(self.theta_deg, self.phi_deg + 180.0)
    }

    pub fn unit_vector(self) -> Vector3<Real> {
        let (st, ct) = self.theta_deg.to_radians().sin_cos();
        let (sp, cp) = self.phi_deg.to_radians().sin_cos();
        Vector3::new(st * cp, st * sp, ct)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::HORIZON_X
    }
}

/// Evenly stepped angle range: `start + i * step` for `i in 0..count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub start_deg: Real,
    pub step_deg: Real,
    pub count: usize,
}

impl AngleRange {
    pub const fn new(start_deg: Real, step_deg: Real, count: usize) -> Self {
        Self {
            start_deg,
            step_deg,
            count,
        }
    }

    /// A single angle.
    pub const fn fixed(angle_deg: Real) -> Self {
        Self::new(angle_deg, 0.0, 1)
    }

    pub fn angle(&self, i: usize) -> Real {
        self.start_deg + i as Real * self.step_deg
    }

    pub fn angles(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.count).map(|i| self.angle(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_points_along_x() {
        let v = Direction::HORIZON_X.unit_vector();
        assert!((v - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        let back = Direction::HORIZON_X.opposite_azimuth().unit_vector();
        assert!((back - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn zenith_points_up() {
        let v = Direction::new(0.0, 123.0).unit_vector();
        assert!((v - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn angle_range_values() {
        let r = AngleRange::new(90.0, -4.0, 4);
        let angles: Vec<Real> = r.angles().collect();
        assert_eq!(angles, vec![90.0, 86.0, 82.0, 78.0]);
        assert_eq!(AngleRange::fixed(0.0).angles().count(), 1);
    }
}
