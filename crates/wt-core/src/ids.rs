use core::fmt;
use core::num::NonZeroU32;

/// Wire tag number as carried by geometry records.
///
/// Tags are user-assigned and start at 1; excitations and loads address
/// wires through them. `NonZero` keeps `Option<Tag>` the same size as `Tag`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(NonZeroU32);

impl Tag {
    /// Tag 0 is reserved for "untagged" and is rejected.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.get())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip_value() {
        for v in [1_u32, 2, 42, 10_000] {
            let tag = Tag::new(v).unwrap();
            assert_eq!(tag.get(), v);
        }
    }

    #[test]
    fn zero_tag_rejected() {
        assert!(Tag::new(0).is_none());
    }

    #[test]
    fn option_tag_is_small() {
        assert_eq!(
            core::mem::size_of::<Tag>(),
            core::mem::size_of::<Option<Tag>>()
        );
    }
}
