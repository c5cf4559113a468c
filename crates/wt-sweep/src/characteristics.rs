//! Frequency sweep pipeline: solver samples → derived characteristics.

use num_complex::Complex64;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use wt_core::Real;
use wt_geometry::{FrequencySetting, GeometryModel};
use wt_solver::{Direction, ElectromagneticSolver};

use crate::error::{SweepError, SweepResult};
use crate::frequencies::list_frequencies;
use crate::metrics::ImpedanceMetrics;
use crate::resonance::{ResonancePeak, find_peak};

/// How samples are taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions {
    /// Direction of the forward gain; the back lobe is sampled at azimuth + 180°
    pub forward: Direction,
    /// Excitation index whose input impedance is reported
    pub port: usize,
    /// Evaluate frequencies on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            forward: Direction::HORIZON_X,
            port: 0,
            parallel: false,
        }
    }
}

/// Raw solver output at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub frequency: Real,
    pub impedance: Complex64,
    pub forward_gain_db: Real,
    pub backward_gain_db: Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleQuality {
    Valid,
    /// Re(Z) ≤ 0: return loss and VSWR are undefined
    Degenerate,
}

/// Per-frequency metrics of one sweep, as parallel sequences.
///
/// Every sequence has one entry per swept frequency, in sweep order.
/// Degenerate samples carry `None` return loss and VSWR and are excluded
/// from the peak search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedCharacteristics {
    frequencies: Vec<Real>,
    impedances: Vec<Complex64>,
    reflection_coeffs: Vec<Complex64>,
    return_losses: Vec<Option<Real>>,
    vswrs: Vec<Option<Real>>,
    gains: Vec<Real>,
    front_back_ratios: Vec<Real>,
    quality: Vec<SampleQuality>,
    peak: Option<ResonancePeak>,
}

impl DerivedCharacteristics {
    pub fn from_samples(samples: &[RawSample]) -> SweepResult<Self> {
        if samples.is_empty() {
            return Err(SweepError::Empty { what: "sweep" });
        }

        let n = samples.len();
        let mut out = Self {
            frequencies: Vec::with_capacity(n),
            impedances: Vec::with_capacity(n),
            reflection_coeffs: Vec::with_capacity(n),
            return_losses: Vec::with_capacity(n),
            vswrs: Vec::with_capacity(n),
            gains: Vec::with_capacity(n),
            front_back_ratios: Vec::with_capacity(n),
            quality: Vec::with_capacity(n),
            peak: None,
        };

        for s in samples {
            let m = ImpedanceMetrics::from_impedance(s.impedance);
            if !m.is_valid() {
                warn!(
                    mhz = s.frequency,
                    re = s.impedance.re,
                    im = s.impedance.im,
                    "degenerate impedance sample"
                );
            }
            out.frequencies.push(s.frequency);
            out.impedances.push(m.impedance);
            out.reflection_coeffs.push(m.reflection_coeff);
            out.return_losses.push(m.return_loss_db);
            out.vswrs.push(m.vswr);
            out.gains.push(s.forward_gain_db);
            out.front_back_ratios
                .push(s.forward_gain_db - s.backward_gain_db);
            out.quality.push(if m.is_valid() {
                SampleQuality::Valid
            } else {
                SampleQuality::Degenerate
            });
        }

        if out.valid_count() > 0 {
            let masked: Vec<Real> = out
                .return_losses
                .iter()
                .map(|rl| rl.unwrap_or(Real::NEG_INFINITY))
                .collect();
            out.peak = Some(find_peak(&masked, &out.frequencies)?);
        }

        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> &[Real] {
        &self.frequencies
    }

    pub fn impedances(&self) -> &[Complex64] {
        &self.impedances
    }

    pub fn reflection_coeffs(&self) -> &[Complex64] {
        &self.reflection_coeffs
    }

    pub fn return_losses(&self) -> &[Option<Real>] {
        &self.return_losses
    }

    pub fn vswrs(&self) -> &[Option<Real>] {
        &self.vswrs
    }

    pub fn gains(&self) -> &[Real] {
        &self.gains
    }

    pub fn front_back_ratios(&self) -> &[Real] {
        &self.front_back_ratios
    }

    pub fn quality(&self) -> &[SampleQuality] {
        &self.quality
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.quality.get(index) == Some(&SampleQuality::Valid)
    }

    pub fn valid_count(&self) -> usize {
        self.quality
            .iter()
            .filter(|q| **q == SampleQuality::Valid)
            .count()
    }

    /// Interpolated return-loss peak, `None` if every sample is degenerate.
    pub fn peak(&self) -> Option<&ResonancePeak> {
        self.peak.as_ref()
    }
}

/// Drives the solver across frequency and derives match and pattern metrics.
///
/// Each frequency gets its own freshly built solver context, dropped before
/// the next one is built. Results depend only on the geometry at call time
/// and the frequency list.
pub struct CharacteristicsComputer<'s> {
    solver: &'s dyn ElectromagneticSolver,
    options: SweepOptions,
}

impl<'s> CharacteristicsComputer<'s> {
    pub fn new(solver: &'s dyn ElectromagneticSolver) -> Self {
        Self {
            solver,
            options: SweepOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SweepOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    /// Characteristics at each of `frequencies` (MHz), in order.
    pub fn compute(
        &self,
        model: &GeometryModel,
        frequencies: &[Real],
    ) -> SweepResult<DerivedCharacteristics> {
        if frequencies.is_empty() {
            return Err(SweepError::Empty {
                what: "frequency list",
            });
        }
        debug!(
            solver = self.solver.name(),
            points = frequencies.len(),
            parallel = self.options.parallel,
            "computing characteristics"
        );

        let samples: Vec<RawSample> = if self.options.parallel {
            frequencies
                .par_iter()
                .map(|&f| self.sample(model, f))
                .collect::<SweepResult<_>>()?
        } else {
            frequencies
                .iter()
                .map(|&f| self.sample(model, f))
                .collect::<SweepResult<_>>()?
        };

        DerivedCharacteristics::from_samples(&samples)
    }

    /// Sweep `start..=end` in steps of `step`; a zero step evaluates `start` only.
    pub fn sweep(
        &self,
        model: &GeometryModel,
        start: Real,
        end: Real,
        step: Real,
    ) -> SweepResult<DerivedCharacteristics> {
        let frequencies = list_frequencies(start, end, step)?;
        self.compute(model, &frequencies)
    }

    /// Single-sample characteristics at the model's design frequency.
    pub fn at_design_frequency(&self, model: &GeometryModel) -> SweepResult<DerivedCharacteristics> {
        self.compute(model, &[model.design_frequency().mhz()])
    }

    fn sample(&self, model: &GeometryModel, frequency: Real) -> SweepResult<RawSample> {
        let setting = FrequencySetting::new(frequency)?;
        let mut ctx = self.solver.build(model, setting)?;
        let impedance = ctx.input_impedance(self.options.port)?;
        let forward_gain_db = ctx.gain(self.options.forward)?;
        let backward_gain_db = ctx.gain(self.options.forward.opposite_azimuth())?;
        Ok(RawSample {
            frequency,
            impedance,
            forward_gain_db,
            backward_gain_db,
        })
    }
}
