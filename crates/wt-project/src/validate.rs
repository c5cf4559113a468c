//! Project validation logic.

use std::collections::{HashMap, HashSet};

use crate::schema::{ExcitationDef, LoadDef, Project, SweepDef, TuningDef, WireDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: impl Into<String>, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive and finite"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }
    positive("design_frequency_mhz", project.design_frequency_mhz)?;

    if project.wires.is_empty() {
        return Err(invalid("wires", "[]", "at least one wire is required"));
    }
    let mut segments_by_tag = HashMap::new();
    for wire in &project.wires {
        validate_wire(wire)?;
        if segments_by_tag.insert(wire.tag, wire.segments).is_some() {
            return Err(ValidationError::DuplicateId {
                id: wire.tag.to_string(),
                context: "wires".to_string(),
            });
        }
    }

    for load in &project.loads {
        validate_load(load, &segments_by_tag)?;
    }

    if project.excitations.is_empty() {
        return Err(invalid(
            "excitations",
            "[]",
            "at least one voltage source is required",
        ));
    }
    let mut fed = HashSet::new();
    for ex in &project.excitations {
        validate_excitation(ex, &segments_by_tag)?;
        if !fed.insert((ex.tag, ex.segment)) {
            return Err(ValidationError::DuplicateId {
                id: format!("{}/{}", ex.tag, ex.segment),
                context: "excitations".to_string(),
            });
        }
    }

    if let Some(sweep) = &project.sweep {
        validate_sweep(sweep)?;
    }
    if let Some(tuning) = &project.tuning {
        validate_tuning(tuning)?;
    }
    Ok(())
}

fn validate_wire(wire: &WireDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("wire {}.{}", wire.tag, name);
    if wire.tag == 0 {
        return Err(invalid("wire tag", 0, "tags start at 1"));
    }
    if wire.segments == 0 {
        return Err(invalid(field("segments"), 0, "at least one segment"));
    }
    positive(field("radius"), wire.radius)?;
    for (name, p) in [("p1", &wire.p1), ("p2", &wire.p2)] {
        if p.iter().any(|c| !c.is_finite()) {
            return Err(invalid(field(name), format!("{p:?}"), "non-finite coordinate"));
        }
    }
    if wire.p1 == wire.p2 {
        return Err(invalid(
            field("p2"),
            format!("{:?}", wire.p2),
            "wire has zero length",
        ));
    }
    Ok(())
}

fn validate_load(load: &LoadDef, segments_by_tag: &HashMap<u32, u32>) -> Result<(), ValidationError> {
    match load {
        LoadDef::Conductivity {
            tag,
            siemens_per_meter,
        } => {
            if !segments_by_tag.contains_key(tag) {
                return Err(ValidationError::MissingReference {
                    id: tag.to_string(),
                    context: "load tag".to_string(),
                });
            }
            positive(format!("load {tag}.siemens_per_meter"), *siemens_per_meter)
        }
    }
}

fn validate_excitation(
    ex: &ExcitationDef,
    segments_by_tag: &HashMap<u32, u32>,
) -> Result<(), ValidationError> {
    let Some(&segments) = segments_by_tag.get(&ex.tag) else {
        return Err(ValidationError::MissingReference {
            id: ex.tag.to_string(),
            context: "excitation tag".to_string(),
        });
    };
    if ex.segment == 0 || ex.segment > segments {
        return Err(invalid(
            format!("excitation {}.segment", ex.tag),
            ex.segment,
            "outside the wire's segments",
        ));
    }
    if !(ex.voltage_re.is_finite() && ex.voltage_im.is_finite()) {
        return Err(invalid(
            format!("excitation {}.voltage", ex.tag),
            format!("{}+j{}", ex.voltage_re, ex.voltage_im),
            "non-finite voltage",
        ));
    }
    Ok(())
}

fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    positive("sweep.start_mhz", sweep.start_mhz)?;
    positive("sweep.end_mhz", sweep.end_mhz)?;
    if sweep.end_mhz < sweep.start_mhz {
        return Err(invalid("sweep.end_mhz", sweep.end_mhz, "below start_mhz"));
    }
    if !(sweep.step_mhz.is_finite() && sweep.step_mhz >= 0.0) {
        return Err(invalid("sweep.step_mhz", sweep.step_mhz, "must be non-negative"));
    }
    Ok(())
}

fn validate_tuning(tuning: &TuningDef) -> Result<(), ValidationError> {
    if let Some(w) = &tuning.weights {
        for (name, v) in [
            ("return_loss", w.return_loss),
            ("front_back", w.front_back),
            ("gain", w.gain),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(invalid(format!("tuning.weights.{name}"), v, "must be non-negative"));
            }
        }
    }
    for (name, v) in [("f_tol", tuning.f_tol), ("x_tol", tuning.x_tol)] {
        match v {
            Some(v) if !(v.is_finite() && v >= 0.0) => {
                return Err(invalid(format!("tuning.{name}"), v, "must be non-negative"));
            }
            _ => {}
        }
    }
    if let Some(step) = tuning.initial_step {
        positive("tuning.initial_step", step)?;
    }
    if tuning.max_evaluations == Some(0) {
        return Err(invalid("tuning.max_evaluations", 0, "must be at least 1"));
    }
    Ok(())
}
