//! Closed-form thin-wire dipole approximation.
//!
//! Each excitation drives its own wire, modelled as a straight dipole with a
//! sinusoidal current distribution:
//!
//! - input impedance from the transmission-line approximation
//!   `Z = R(kh) + j(42.5 - Zc·cot(kh))` with `Zc = 120·(ln(L/a) - 1)`, which
//!   puts resonance slightly below the half-wave length and makes thicker
//!   wires resonate lower
//! - radiation resistance scaled from the half-wave value, 73.1 Ω at `kh = π/2`
//! - conductor loss from the wire's conductivity load (skin effect)
//! - off-center feeds transformed by `1 / cos²(k·z)`
//! - far field `F(ψ) = (cos(kh·cosψ) - cos(kh)) / sinψ` about the wire axis,
//!   normalized to directivity and multiplied by the radiation efficiency
//!
//! Only driven wires radiate and there is no mutual coupling, so parasitic
//! elements have no effect and a lone dipole has a 0 dB front/back ratio.
//! Ground is always free space.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector3;
use num_complex::Complex64;
use tracing::trace;
use wt_core::constants::MU0;
use wt_core::timing::{Timer, solver_timing};
use wt_core::units::{to_meters, wavelength};
use wt_core::{Real, Tag};
use wt_geometry::{Excitation, FrequencySetting, GeometryModel};

use crate::direction::Direction;
use crate::error::{SolverError, SolverResult};
use crate::traits::{ElectromagneticSolver, SolverContext};

/// Reported gain toward pattern nulls, in dBi.
pub const GAIN_FLOOR_DB: Real = -999.99;

const HALF_WAVE_RESISTANCE: Real = 73.1;
const HALF_WAVE_REACTANCE: Real = 42.5;
const MIN_FEED_FACTOR: Real = 1e-6;

/// Analytic stand-in for a method-of-moments engine.
#[derive(Debug, Clone)]
pub struct ThinWireSolver {
    /// Intervals used to integrate the pattern for directivity normalization
    pub pattern_samples: usize,
}

impl Default for ThinWireSolver {
    fn default() -> Self {
        Self {
            pattern_samples: 360,
        }
    }
}

impl ThinWireSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElectromagneticSolver for ThinWireSolver {
    fn name(&self) -> &str {
        "thin-wire"
    }

    fn build<'a>(
        &'a self,
        model: &GeometryModel,
        frequency: FrequencySetting,
    ) -> SolverResult<Box<dyn SolverContext + 'a>> {
        let timer = Timer::start("context build");
        model.validate()?;

        let lambda = to_meters(wavelength(frequency.frequency()));
        let k = 2.0 * PI / lambda;

        let ports = model
            .excitations
            .iter()
            .map(|ex| DrivenElement::solve(model, ex, k, frequency, self.pattern_samples))
            .collect::<SolverResult<Vec<_>>>()?;

        timer.stop_into(&solver_timing::CONTEXT_BUILDS);
        trace!(mhz = frequency.mhz(), ports = ports.len(), "thin-wire context built");
        Ok(Box::new(ThinWireContext { frequency, ports }))
    }
}

struct ThinWireContext {
    frequency: FrequencySetting,
    ports: Vec<DrivenElement>,
}

impl SolverContext for ThinWireContext {
    fn frequency(&self) -> FrequencySetting {
        self.frequency
    }

    fn input_impedance(&mut self, port: usize) -> SolverResult<Complex64> {
        let timer = Timer::start("impedance query");
        let result = self
            .ports
            .get(port)
            .map(|element| element.impedance)
            .ok_or(SolverError::Port {
                port,
                count: self.ports.len(),
            });
        // failed lookups are counted too
        timer.stop_into(&solver_timing::IMPEDANCE_QUERIES);
        result
    }

    fn gain(&mut self, direction: Direction) -> SolverResult<Real> {
        let timer = Timer::start("gain query");
        let result = self
            .ports
            .first()
            .map(|element| element.gain_db(direction))
            .ok_or(SolverError::Port { port: 0, count: 0 });
        timer.stop_into(&solver_timing::GAIN_QUERIES);
        result
    }
}

/// One excited wire, solved at one frequency.
struct DrivenElement {
    axis: Vector3<Real>,
    kh: Real,
    impedance: Complex64,
    efficiency: Real,
    /// ∫₀^π F(ψ)² sinψ dψ
    pattern_integral: Real,
}

impl DrivenElement {
    fn solve(
        model: &GeometryModel,
        ex: &Excitation,
        k: Real,
        frequency: FrequencySetting,
        pattern_samples: usize,
    ) -> SolverResult<Self> {
        let wire = model.wire_by_tag(ex.tag).ok_or_else(|| SolverError::Build {
            what: format!("excitation refers to missing wire {}", ex.tag),
        })?;
        let axis = wire.direction().ok_or_else(|| SolverError::Build {
            what: format!("wire {} has zero length", wire.tag),
        })?;

        let length = wire.length();
        let slenderness = (length / wire.radius).ln() - 1.0;
        if slenderness <= 0.0 {
            return Err(SolverError::Build {
                what: format!(
                    "wire {} too thick for thin-wire approximation (L/a = {:.3})",
                    wire.tag,
                    length / wire.radius
                ),
            });
        }
        let zc = 120.0 * slenderness;
        let kh = 0.5 * k * length;

        let r_rad = HALF_WAVE_RESISTANCE * (kh / FRAC_PI_2).powi(2);
        let x = HALF_WAVE_REACTANCE - zc * kh.cos() / kh.sin();
        let r_loss = conductor_loss(model, wire.tag, length, wire.radius, frequency);

        let feed = (k * wire.segment_offset(ex.segment)).cos().powi(2).max(MIN_FEED_FACTOR);
        let impedance = Complex64::new(r_rad + r_loss, x) / feed;
        if !(impedance.re.is_finite() && impedance.im.is_finite()) {
            return Err(SolverError::Build {
                what: format!(
                    "impedance of wire {} not finite at {} MHz",
                    wire.tag,
                    frequency.mhz()
                ),
            });
        }

        Ok(Self {
            axis,
            kh,
            impedance,
            efficiency: r_rad / (r_rad + r_loss),
            pattern_integral: pattern_integral(kh, pattern_samples.max(8)),
        })
    }

    fn gain_db(&self, direction: Direction) -> Real {
        let cos_psi = direction.unit_vector().dot(&self.axis).clamp(-1.0, 1.0);
        let sin_psi = (1.0 - cos_psi * cos_psi).sqrt();
        if sin_psi < 1e-12 || self.pattern_integral <= 0.0 {
            return GAIN_FLOOR_DB;
        }
        let f = ((self.kh * cos_psi).cos() - self.kh.cos()) / sin_psi;
        let g = self.efficiency * 2.0 * f * f / self.pattern_integral;
        if g > 0.0 {
            (10.0 * g.log10()).max(GAIN_FLOOR_DB)
        } else {
            GAIN_FLOOR_DB
        }
    }
}

/// Skin-effect loss referred to the feed point, zero for unloaded wires.
fn conductor_loss(
    model: &GeometryModel,
    tag: Tag,
    length: Real,
    radius: Real,
    frequency: FrequencySetting,
) -> Real {
    let Some(load) = model.load_for(tag) else {
        return 0.0;
    };
    let f_hz = frequency.mhz() * 1e6;
    let surface_resistance = (PI * f_hz * MU0 / load.conductivity).sqrt();
    // sinusoidal current: half the uniform-current loss
    0.5 * surface_resistance * length / (2.0 * PI * radius)
}

/// Midpoint rule over ψ ∈ (0, π).
fn pattern_integral(kh: Real, samples: usize) -> Real {
    let dpsi = PI / samples as Real;
    (0..samples)
        .map(|i| {
            let psi = (i as Real + 0.5) * dpsi;
            let (s, c) = psi.sin_cos();
            let num = (kh * c).cos() - kh.cos();
            num * num / s
        })
        .sum::<Real>()
        * dpsi
}

#[cfg(test)]
mod tests {
    use super::*;
    use wt_core::Tag;
    use wt_geometry::{Loading, Point3, Wire};

    const C_MHZ_M: Real = 299.792458;

    fn dipole_at(length: Real, radius: Real, mhz: Real) -> GeometryModel {
        let tag = Tag::new(1).unwrap();
        GeometryModel::new(FrequencySetting::new(mhz).unwrap())
            .with_wire(Wire::new(
                tag,
                21,
                Point3::new(0.0, -length / 2.0, 0.0),
                Point3::new(0.0, length / 2.0, 0.0),
                radius,
            ))
            .with_excitation(Excitation::voltage_source(tag, 11, Complex64::new(1.0, 0.0)))
    }

    fn half_wave_mhz(length: Real) -> Real {
        C_MHZ_M / (2.0 * length)
    }

    #[test]
    fn half_wave_impedance_is_classic_value() {
        let model = dipole_at(10.0, 0.001, half_wave_mhz(10.0));
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
        let z = ctx.input_impedance(0).unwrap();
        assert!((z.re - 73.1).abs() < 1e-6);
        assert!((z.im - 42.5).abs() < 1e-6);
    }

    #[test]
    fn broadside_gain_near_2_15_dbi() {
        let model = dipole_at(10.0, 0.001, half_wave_mhz(10.0));
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
        let g = ctx.gain(Direction::HORIZON_X).unwrap();
        assert!((g - 2.15).abs() < 0.02, "gain = {g}");
    }

    #[test]
    fn null_along_wire_axis() {
        let model = dipole_at(10.0, 0.001, 14.0);
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
        // wire lies along y
        assert_eq!(ctx.gain(Direction::new(90.0, 90.0)).unwrap(), GAIN_FLOOR_DB);
    }

    #[test]
    fn lone_dipole_front_back_is_zero() {
        let model = dipole_at(10.0, 0.001, 14.0);
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
        let fwd = ctx.gain(Direction::HORIZON_X).unwrap();
        let back = ctx.gain(Direction::HORIZON_X.opposite_azimuth()).unwrap();
        assert!((fwd - back).abs() < 1e-9);
    }

    #[test]
    fn thicker_wire_resonates_lower() {
        let solver = ThinWireSolver::new();
        let reactance = |radius: Real| {
            let model = dipole_at(10.0, radius, 14.0);
            let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
            ctx.input_impedance(0).unwrap().im
        };
        // below resonance the dipole is capacitive; a fatter wire is less so
        assert!(reactance(0.01) > reactance(0.001));
    }

    #[test]
    fn conductor_loss_lowers_gain_and_raises_resistance() {
        let solver = ThinWireSolver::new();
        let lossless = dipole_at(10.0, 0.0005, 14.0);
        let lossy = lossless
            .clone()
            .with_load(Loading::conductivity(Tag::new(1).unwrap(), 1.0e5).unwrap());

        let mut a = solver.build(&lossless, lossless.design_frequency()).unwrap();
        let mut b = solver.build(&lossy, lossy.design_frequency()).unwrap();
        assert!(b.input_impedance(0).unwrap().re > a.input_impedance(0).unwrap().re);
        assert!(b.gain(Direction::HORIZON_X).unwrap() < a.gain(Direction::HORIZON_X).unwrap());
    }

    #[test]
    fn unknown_port_is_an_error() {
        let model = dipole_at(10.0, 0.001, 14.0);
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
        assert_eq!(
            ctx.input_impedance(1).unwrap_err(),
            SolverError::Port { port: 1, count: 1 }
        );
    }

    #[test]
    fn failed_port_query_is_timed() {
        wt_core::timing::enable_timing();
        let model = dipole_at(10.0, 0.001, 14.0);
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();

        let before = solver_timing::IMPEDANCE_QUERIES.count();
        assert!(ctx.input_impedance(3).is_err());
        assert!(solver_timing::IMPEDANCE_QUERIES.count() > before);
    }

    #[test]
    fn gain_grid_matches_point_queries() {
        use crate::direction::AngleRange;

        let model = dipole_at(10.0, 0.001, 14.0);
        let solver = ThinWireSolver::new();
        let mut ctx = solver.build(&model, model.design_frequency()).unwrap();
        let grid = ctx
            .gain_grid(AngleRange::new(90.0, -30.0, 3), AngleRange::new(0.0, 45.0, 4))
            .unwrap();
        assert_eq!(grid.shape(), (3, 4));
        let g = ctx.gain(Direction::new(60.0, 45.0)).unwrap();
        assert_eq!(grid[(1, 1)], g);
    }

    #[test]
    fn stubby_wire_rejected() {
        let model = dipole_at(0.002, 0.001, 14.0);
        let solver = ThinWireSolver::new();
        assert!(matches!(
            solver.build(&model, model.design_frequency()),
            Err(SolverError::Build { .. })
        ));
    }
}
