//! The antenna geometry model.

use crate::cards::{Excitation, FrequencySetting, Ground, Loading};
use crate::error::{GeometryError, GeometryResult};
use crate::validate::validate_model;
use crate::wire::Wire;
use wt_core::{Real, Tag, Tolerances, WtResult, ensure_positive, nearly_equal};

/// Wires, loads, excitations, ground and the design frequency.
///
/// This is the one logical geometry instance shared by reference between the
/// sweep pipeline and the compensation search. Wires are stored in
/// declaration order; indices into `wires` are the wire identity used by
/// the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryModel {
    pub wires: Vec<Wire>,
    pub loads: Vec<Loading>,
    pub excitations: Vec<Excitation>,
    pub ground: Ground,
    pub frequency: FrequencySetting,
}

impl GeometryModel {
    /// Empty model at the given design frequency.
    pub fn new(frequency: FrequencySetting) -> Self {
        Self {
            wires: Vec::new(),
            loads: Vec::new(),
            excitations: Vec::new(),
            ground: Ground::FreeSpace,
            frequency,
        }
    }

    pub fn with_wire(mut self, wire: Wire) -> Self {
        self.wires.push(wire);
        self
    }

    pub fn with_load(mut self, load: Loading) -> Self {
        self.loads.push(load);
        self
    }

    pub fn with_excitation(mut self, excitation: Excitation) -> Self {
        self.excitations.push(excitation);
        self
    }

    pub fn validate(&self) -> GeometryResult<()> {
        validate_model(self)
    }

    pub fn design_frequency(&self) -> FrequencySetting {
        self.frequency
    }

    pub fn wire(&self, index: usize) -> GeometryResult<&Wire> {
        let len = self.wires.len();
        self.wires
            .get(index)
            .ok_or(GeometryError::WireIndex { index, len })
    }

    pub fn wire_mut(&mut self, index: usize) -> GeometryResult<&mut Wire> {
        let len = self.wires.len();
        self.wires
            .get_mut(index)
            .ok_or(GeometryError::WireIndex { index, len })
    }

    pub fn wire_by_tag(&self, tag: Tag) -> Option<&Wire> {
        self.wires.iter().find(|w| w.tag == tag)
    }

    /// Conductivity loading on `tag`, if any. The last record wins.
    pub fn load_for(&self, tag: Tag) -> Option<&Loading> {
        self.loads.iter().rev().find(|l| l.tag == tag)
    }

    /// Indices (declaration order) of wires whose radius equals `radius`.
    pub fn wires_with_radius(&self, radius: Real) -> Vec<usize> {
        let tol = Tolerances::default();
        self.wires
            .iter()
            .enumerate()
            .filter(|(_, w)| nearly_equal(w.radius, radius, tol))
            .map(|(i, _)| i)
            .collect()
    }

    /// Re-target the design from `from_mhz` to `to_mhz`.
    ///
    /// All coordinates and radii are multiplied by `from / to`, which keeps the
    /// geometry's electrical size constant.
    pub fn rescale_frequency(&mut self, from_mhz: Real, to_mhz: Real) -> WtResult<()> {
        let from = ensure_positive(from_mhz, "rescale from frequency")?;
        let to = FrequencySetting::new(to_mhz)?;
        let scale = from / to.mhz();
        for wire in &mut self.wires {
            wire.p1 *= scale;
            wire.p2 *= scale;
            wire.radius *= scale;
        }
        self.frequency = to;
        Ok(())
    }
}
