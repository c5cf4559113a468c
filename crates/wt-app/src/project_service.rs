//! Project loading, saving, validation, and introspection.

use std::path::Path;

use serde::Serialize;
use wt_geometry::GeometryModel;
use wt_project::schema::Project;

use crate::error::{AppError, AppResult};

/// Summary of a project for listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub design_frequency_mhz: f64,
    pub wire_count: usize,
    pub load_count: usize,
    pub excitation_count: usize,
    /// Distinct wire radii in declaration order
    pub radii: Vec<f64>,
    pub has_sweep: bool,
    pub has_tuning: bool,
}

/// Load a project file (YAML, or JSON by extension) and validate it.
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(wt_project::load(path)?)
}

/// Validate and save a project file, format chosen by extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    wt_project::save(path, project).map_err(|e| match e {
        wt_project::ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Schema validation plus the structural checks of the geometry model.
pub fn validate_project(project: &Project) -> AppResult<()> {
    build_model(project).map(|_| ())
}

pub fn build_model(project: &Project) -> AppResult<GeometryModel> {
    Ok(wt_project::to_geometry_model(project)?)
}

pub fn summarize(project: &Project) -> ProjectSummary {
    let mut radii: Vec<f64> = Vec::new();
    for w in &project.wires {
        if !radii.contains(&w.radius) {
            radii.push(w.radius);
        }
    }
    ProjectSummary {
        name: project.name.clone(),
        design_frequency_mhz: project.design_frequency_mhz,
        wire_count: project.wires.len(),
        load_count: project.loads.len(),
        excitation_count: project.excitations.len(),
        radii,
        has_sweep: project.sweep.is_some(),
        has_tuning: project.tuning.is_some(),
    }
}
