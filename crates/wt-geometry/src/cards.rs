//! Loads, excitations, ground and frequency records.
//!
//! Each record carries exactly the fields the solver contract needs; how the
//! records were populated (project file, card deck) is decided elsewhere.

use num_complex::Complex64;
use wt_core::units::{Frequency, mhz};
use wt_core::{Real, Tag, WtResult, ensure_positive};

/// Wire conductivity loading applied to every segment of one tagged wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loading {
    pub tag: Tag,
    /// Conductivity in S/m
    pub conductivity: Real,
}

impl Loading {
    pub fn conductivity(tag: Tag, siemens_per_meter: Real) -> WtResult<Self> {
        Ok(Self {
            tag,
            conductivity: ensure_positive(siemens_per_meter, "load conductivity")?,
        })
    }
}

/// Applied voltage source on one segment of one tagged wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Excitation {
    pub tag: Tag,
    /// 1-based segment index
    pub segment: u32,
    pub voltage: Complex64,
}

impl Excitation {
    pub fn voltage_source(tag: Tag, segment: u32, voltage: Complex64) -> Self {
        Self {
            tag,
            segment,
            voltage,
        }
    }
}

/// Ground model. Only free space is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ground {
    #[default]
    FreeSpace,
}

/// Single active frequency, in MHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySetting {
    mhz: Real,
}

impl FrequencySetting {
    pub fn new(mhz: Real) -> WtResult<Self> {
        Ok(Self {
            mhz: ensure_positive(mhz, "frequency")?,
        })
    }

    pub fn mhz(&self) -> Real {
        self.mhz
    }

    pub fn frequency(&self) -> Frequency {
        mhz(self.mhz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_must_be_positive() {
        assert!(FrequencySetting::new(0.0).is_err());
        assert!(FrequencySetting::new(-14.0).is_err());
        assert!(FrequencySetting::new(Real::NAN).is_err());
        assert_eq!(FrequencySetting::new(14.15).unwrap().mhz(), 14.15);
    }

    #[test]
    fn conductivity_must_be_positive() {
        let tag = Tag::new(1).unwrap();
        assert!(Loading::conductivity(tag, 0.0).is_err());
        assert!(Loading::conductivity(tag, 5.8e7).is_ok());
    }
}
