// wt-core/src/units.rs

use uom::si::f64::{
    Frequency as UomFrequency, Length as UomLength, Ratio as UomRatio, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type Ratio = UomRatio;
pub type Velocity = UomVelocity;

#[inline]
pub fn mhz(v: f64) -> Frequency {
    use uom::si::frequency::megahertz;
    Frequency::new::<megahertz>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn to_mhz(f: Frequency) -> f64 {
    use uom::si::frequency::megahertz;
    f.get::<megahertz>()
}

#[inline]
pub fn to_meters(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

/// Free-space wavelength at `f`.
#[inline]
pub fn wavelength(f: Frequency) -> Length {
    constants::c0() / f
}

pub mod constants {
    use super::*;

    pub const C0_MPS: f64 = 299_792_458.0;

    /// Vacuum permeability in H/m.
    pub const MU0: f64 = 4.0e-7 * std::f64::consts::PI;

    /// Reference impedance for reflection metrics, in ohms.
    pub const Z0_OHMS: f64 = 50.0;

    #[inline]
    pub fn c0() -> Velocity {
        use uom::si::velocity::meter_per_second;
        Velocity::new::<meter_per_second>(C0_MPS)
    }
}
