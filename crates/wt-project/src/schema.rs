//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub design_frequency_mhz: f64,
    pub wires: Vec<WireDef>,
    #[serde(default)]
    pub loads: Vec<LoadDef>,
    pub excitations: Vec<ExcitationDef>,
    #[serde(default)]
    pub ground: GroundDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<TuningDef>,
}

/// Straight wire (GW card).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireDef {
    pub tag: u32,
    pub segments: u32,
    /// Endpoint coordinates in meters
    pub p1: [f64; 3],
    pub p2: [f64; 3],
    /// Meters
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadDef {
    /// Wire conductivity over the whole tagged wire (LD type 5)
    Conductivity { tag: u32, siemens_per_meter: f64 },
}

/// Applied voltage source (EX type 0).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExcitationDef {
    pub tag: u32,
    /// 1-based
    pub segment: u32,
    pub voltage_re: f64,
    #[serde(default)]
    pub voltage_im: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroundDef {
    #[default]
    FreeSpace,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub start_mhz: f64,
    pub end_mhz: f64,
    pub step_mhz: f64,
    #[serde(default)]
    pub parallel: bool,
}

/// Radius compensation settings. Omitted fields fall back to library defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TuningDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightsDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<PenaltyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_tol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_tol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_evaluations: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightsDef {
    pub return_loss: f64,
    pub front_back: f64,
    pub gain: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyDef {
    Signed,
    Absolute,
}
