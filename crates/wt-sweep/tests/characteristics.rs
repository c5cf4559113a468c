//! Sweep pipeline tests against scripted fake solvers.

use std::sync::Mutex;

use num_complex::Complex64;
use wt_core::{Real, Tag};
use wt_geometry::{Excitation, FrequencySetting, GeometryModel, Point3, Wire};
use wt_solver::{Direction, ElectromagneticSolver, SolverContext, SolverResult};
use wt_sweep::{CharacteristicsComputer, SampleQuality, SweepError, SweepOptions};

/// Impedance and gains are pure functions of frequency.
struct ScriptedSolver {
    impedance: fn(Real) -> Complex64,
    builds: Mutex<Vec<Real>>,
}

struct ScriptedContext {
    frequency: FrequencySetting,
    impedance: Complex64,
}

impl ScriptedSolver {
    fn new(impedance: fn(Real) -> Complex64) -> Self {
        Self {
            impedance,
            builds: Mutex::new(Vec::new()),
        }
    }

    fn builds(&self) -> Vec<Real> {
        self.builds.lock().unwrap().clone()
    }
}

impl ElectromagneticSolver for ScriptedSolver {
    fn name(&self) -> &str {
        "scripted"
    }

    fn build<'a>(
        &'a self,
        _model: &GeometryModel,
        frequency: FrequencySetting,
    ) -> SolverResult<Box<dyn SolverContext + 'a>> {
        self.builds.lock().unwrap().push(frequency.mhz());
        Ok(Box::new(ScriptedContext {
            frequency,
            impedance: (self.impedance)(frequency.mhz()),
        }))
    }
}

impl SolverContext for ScriptedContext {
    fn frequency(&self) -> FrequencySetting {
        self.frequency
    }

    fn input_impedance(&mut self, _port: usize) -> SolverResult<Complex64> {
        Ok(self.impedance)
    }

    fn gain(&mut self, direction: Direction) -> SolverResult<Real> {
        // 7 dBi forward, 7 - 20 dBi backward, drifting with frequency
        let f = self.frequency.mhz();
        if direction.phi_deg.rem_euclid(360.0) < 90.0 {
            Ok(7.0 + 0.1 * (f - 14.0))
        } else {
            Ok(-13.0)
        }
    }
}

fn model() -> GeometryModel {
    let tag = Tag::new(1).unwrap();
    GeometryModel::new(FrequencySetting::new(14.1).unwrap())
        .with_wire(Wire::new(
            tag,
            11,
            Point3::new(0.0, -5.0, 0.0),
            Point3::new(0.0, 5.0, 0.0),
            0.001,
        ))
        .with_excitation(Excitation::voltage_source(tag, 6, Complex64::new(1.0, 0.0)))
}

fn resonant(f: Real) -> Complex64 {
    Complex64::new(50.0, 400.0 * (f - 14.1))
}

#[test]
fn parallel_sequences_match_frequency_list() {
    let solver = ScriptedSolver::new(resonant);
    let computer = CharacteristicsComputer::new(&solver);
    let freqs = [14.0, 14.05, 14.1, 14.15, 14.2];
    let ch = computer.compute(&model(), &freqs).unwrap();

    assert_eq!(ch.len(), freqs.len());
    assert_eq!(ch.frequencies(), &freqs);
    assert_eq!(ch.impedances().len(), freqs.len());
    assert_eq!(ch.reflection_coeffs().len(), freqs.len());
    assert_eq!(ch.return_losses().len(), freqs.len());
    assert_eq!(ch.vswrs().len(), freqs.len());
    assert_eq!(ch.gains().len(), freqs.len());
    assert_eq!(ch.front_back_ratios().len(), freqs.len());
    assert_eq!(ch.quality().len(), freqs.len());
}

#[test]
fn one_build_per_frequency_in_order() {
    let solver = ScriptedSolver::new(resonant);
    let computer = CharacteristicsComputer::new(&solver);
    let freqs = [14.2, 14.0, 14.1];
    computer.compute(&model(), &freqs).unwrap();
    assert_eq!(solver.builds(), freqs.to_vec());
}

#[test]
fn front_back_is_forward_minus_backward() {
    let solver = ScriptedSolver::new(resonant);
    let ch = CharacteristicsComputer::new(&solver)
        .compute(&model(), &[14.0, 14.1])
        .unwrap();
    assert!((ch.gains()[0] - 7.0).abs() < 1e-12);
    assert!((ch.front_back_ratios()[0] - 20.0).abs() < 1e-12);
    assert!((ch.front_back_ratios()[1] - 20.01).abs() < 1e-9);
}

#[test]
fn peak_found_between_samples() {
    let solver = ScriptedSolver::new(|f| Complex64::new(50.0, 400.0 * (f - 14.12)));
    let ch = CharacteristicsComputer::new(&solver)
        .sweep(&model(), 14.0, 14.2, 0.05)
        .unwrap();
    let peak = ch.peak().unwrap();
    assert_eq!(peak.index, 2);
    assert!(peak.interpolated);
    assert!(peak.frequency > 14.1 && peak.frequency < 14.15);
}

#[test]
fn degenerate_sample_flagged_without_aborting() {
    let solver = ScriptedSolver::new(|f| {
        if (f - 14.05).abs() < 1e-9 {
            Complex64::new(-3.0, 10.0)
        } else {
            resonant(f)
        }
    });
    let ch = CharacteristicsComputer::new(&solver)
        .compute(&model(), &[14.0, 14.05, 14.1])
        .unwrap();

    assert_eq!(
        ch.quality(),
        &[
            SampleQuality::Valid,
            SampleQuality::Degenerate,
            SampleQuality::Valid
        ]
    );
    assert_eq!(ch.return_losses()[1], None);
    assert_eq!(ch.vswrs()[1], None);
    assert!(ch.vswrs()[0].unwrap() >= 1.0);
    assert_eq!(ch.valid_count(), 2);
    // matched sample at 14.1 is still the peak
    assert_eq!(ch.peak().unwrap().index, 2);
}

#[test]
fn all_degenerate_has_no_peak() {
    let solver = ScriptedSolver::new(|_| Complex64::new(0.0, 50.0));
    let ch = CharacteristicsComputer::new(&solver)
        .compute(&model(), &[14.0, 14.1])
        .unwrap();
    assert!(ch.peak().is_none());
    assert_eq!(ch.valid_count(), 0);
}

#[test]
fn design_frequency_is_single_sample() {
    let solver = ScriptedSolver::new(resonant);
    let ch = CharacteristicsComputer::new(&solver)
        .at_design_frequency(&model())
        .unwrap();
    assert_eq!(ch.frequencies(), &[14.1]);
    assert_eq!(ch.vswrs()[0], Some(1.0));
    let peak = ch.peak().unwrap();
    assert_eq!(peak.frequency, 14.1);
    assert!(!peak.interpolated);
}

#[test]
fn zero_step_sweep_evaluates_start_only() {
    let solver = ScriptedSolver::new(resonant);
    let ch = CharacteristicsComputer::new(&solver)
        .sweep(&model(), 14.0, 14.0, 0.0)
        .unwrap();
    assert_eq!(ch.frequencies(), &[14.0]);
}

#[test]
fn parallel_matches_serial() {
    let solver = ScriptedSolver::new(resonant);
    let freqs: Vec<Real> = (0..40).map(|i| 13.9 + 0.01 * i as Real).collect();

    let serial = CharacteristicsComputer::new(&solver)
        .compute(&model(), &freqs)
        .unwrap();
    let parallel = CharacteristicsComputer::new(&solver)
        .with_options(SweepOptions {
            parallel: true,
            ..SweepOptions::default()
        })
        .compute(&model(), &freqs)
        .unwrap();

    assert_eq!(serial, parallel);
}

#[test]
fn empty_frequency_list_rejected() {
    let solver = ScriptedSolver::new(resonant);
    let err = CharacteristicsComputer::new(&solver)
        .compute(&model(), &[])
        .unwrap_err();
    assert!(matches!(err, SweepError::Empty { .. }));
}
