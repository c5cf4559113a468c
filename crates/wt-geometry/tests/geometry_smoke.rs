//! Integration tests for wt-geometry.

use num_complex::Complex64;
use wt_core::Tag;
use wt_geometry::{Excitation, FrequencySetting, GeometryModel, Loading, Point3, Wire};

fn dipole(radius: f64) -> GeometryModel {
    let tag = Tag::new(1).unwrap();
    GeometryModel::new(FrequencySetting::new(14.2).unwrap())
        .with_wire(Wire::new(
            tag,
            21,
            Point3::new(0.0, -5.0, 0.0),
            Point3::new(0.0, 5.0, 0.0),
            radius,
        ))
        .with_load(Loading::conductivity(tag, 5.8e7).unwrap())
        .with_excitation(Excitation::voltage_source(tag, 11, Complex64::new(1.0, 0.0)))
}

#[test]
fn scale_cycle_returns_to_snapshot() {
    let mut model = dipole(0.001);
    let snap = model.wires[0].snapshot();

    for s in [1.05, 0.95, 1.2, 0.7] {
        model.wire_mut(0).unwrap().apply_scale(&snap, s);
        assert!((model.wires[0].length() - 10.0 * s).abs() < 1e-12);
        assert_eq!(model.wires[0].midpoint(), snap.midpoint());
    }

    model.wire_mut(0).unwrap().apply_scale(&snap, 1.0);
    assert_eq!(model.wires[0].p1, snap.p1());
    assert_eq!(model.wires[0].p2, snap.p2());
}

#[test]
fn load_lookup_by_tag() {
    let model = dipole(0.001);
    let load = model.load_for(Tag::new(1).unwrap()).unwrap();
    assert_eq!(load.conductivity, 5.8e7);
    assert!(model.load_for(Tag::new(2).unwrap()).is_none());
}

#[test]
fn invalid_radius_rejected() {
    let model = dipole(0.0);
    assert!(model.validate().is_err());
}
