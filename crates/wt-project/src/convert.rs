//! Project definitions <-> solver-ready geometry.

use num_complex::Complex64;
use wt_core::Tag;
use wt_geometry::{Excitation, FrequencySetting, GeometryModel, Ground, Loading, Point3, Wire};

use crate::schema::{GroundDef, LoadDef, Project};
use crate::validate::{ValidationError, validate_project};
use crate::{ProjectError, ProjectResult};

fn tag(value: u32, context: &str) -> Result<Tag, ValidationError> {
    Tag::new(value).ok_or_else(|| ValidationError::InvalidValue {
        field: context.to_string(),
        value: value.to_string(),
        reason: "tags start at 1".to_string(),
    })
}

fn point(p: &[f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

/// Validate `project` and build the geometry model it describes.
pub fn to_geometry_model(project: &Project) -> ProjectResult<GeometryModel> {
    validate_project(project)?;

    let mut model = GeometryModel::new(FrequencySetting::new(project.design_frequency_mhz)?);
    model.ground = match project.ground {
        GroundDef::FreeSpace => Ground::FreeSpace,
    };
    for w in &project.wires {
        model.wires.push(Wire::new(
            tag(w.tag, "wire tag")?,
            w.segments,
            point(&w.p1),
            point(&w.p2),
            w.radius,
        ));
    }
    for load in &project.loads {
        match load {
            LoadDef::Conductivity {
                tag: t,
                siemens_per_meter,
            } => model
                .loads
                .push(Loading::conductivity(tag(*t, "load tag")?, *siemens_per_meter)?),
        }
    }
    for ex in &project.excitations {
        model.excitations.push(Excitation::voltage_source(
            tag(ex.tag, "excitation tag")?,
            ex.segment,
            Complex64::new(ex.voltage_re, ex.voltage_im),
        ));
    }

    model.validate()?;
    Ok(model)
}

/// Write wire endpoints, radii and the design frequency of `model` back into `project`.
///
/// Wires are matched by tag; `model` must hold the same wires as `project`.
pub fn store_geometry(project: &mut Project, model: &GeometryModel) -> ProjectResult<()> {
    if project.wires.len() != model.wires.len() {
        return Err(ProjectError::Validation(ValidationError::InvalidValue {
            field: "wires".to_string(),
            value: model.wires.len().to_string(),
            reason: format!("project has {} wires", project.wires.len()),
        }));
    }
    for def in &mut project.wires {
        let wire = tag(def.tag, "wire tag")
            .ok()
            .and_then(|t| model.wire_by_tag(t))
            .ok_or_else(|| ValidationError::MissingReference {
                id: def.tag.to_string(),
                context: "geometry model wires".to_string(),
            })?;
        def.p1 = [wire.p1.x, wire.p1.y, wire.p1.z];
        def.p2 = [wire.p2.x, wire.p2.y, wire.p2.z];
        def.radius = wire.radius;
    }
    project.design_frequency_mhz = model.frequency.mhz();
    validate_project(project)?;
    Ok(())
}
