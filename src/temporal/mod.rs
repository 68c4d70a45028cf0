//! In-memory temporal value model.
//!
//! A temporal value is one of three shapes:
//!
//! - [`TInstant`] - a single (timestamp, value) sample
//! - [`TSequence`] - an ordered list of instants with an interpolation
//! - [`TSequenceSet`] - an ordered list of disjoint sequences
//!
//! Every sample carries a [`Value`] of one [`BaseType`].

mod base_type;
mod flags;
mod instant;
mod sequence;
mod value;

pub use base_type::*;
pub use flags::*;
pub use instant::*;
pub use sequence::*;
pub use value::*;

use std::fmt;

use crate::util::{Error, Result};

/// Temporal shape; the discriminant is the wire tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Subtype {
    Instant = 1,
    Sequence = 2,
    SequenceSet = 3,
}

impl Subtype {
    /// Parse a wire tag. Sequence-set is a known tag even though the
    /// codec cannot carry it.
    pub fn from_u8(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Self::Instant),
            2 => Ok(Self::Sequence),
            3 => Ok(Self::SequenceSet),
            _ => Err(Error::UnsupportedShape(tag)),
        }
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Sequence => "sequence",
            Self::SequenceSet => "sequence set",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A temporal value of any shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Temporal {
    Instant(TInstant),
    Sequence(TSequence),
    SequenceSet(TSequenceSet),
}

impl Temporal {
    pub fn subtype(&self) -> Subtype {
        match self {
            Self::Instant(_) => Subtype::Instant,
            Self::Sequence(_) => Subtype::Sequence,
            Self::SequenceSet(_) => Subtype::SequenceSet,
        }
    }

    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Instant(inst) => inst.base_type(),
            Self::Sequence(seq) => seq.base_type(),
            Self::SequenceSet(set) => set.base_type(),
        }
    }

    pub fn flags(&self) -> Flags {
        match self {
            Self::Instant(inst) => inst.flags(),
            Self::Sequence(seq) => seq.flags(),
            Self::SequenceSet(set) => set.flags(),
        }
    }

    /// Number of samples.
    pub fn num_instants(&self) -> usize {
        match self {
            Self::Instant(_) => 1,
            Self::Sequence(seq) => seq.count(),
            Self::SequenceSet(set) => set.count(),
        }
    }

    /// The n-th sample in time order.
    pub fn instant_n(&self, n: usize) -> Option<&TInstant> {
        match self {
            Self::Instant(inst) => (n == 0).then_some(inst),
            Self::Sequence(seq) => seq.instant_n(n),
            Self::SequenceSet(set) => set.instant_n(n),
        }
    }
}

impl From<TInstant> for Temporal {
    fn from(inst: TInstant) -> Self {
        Self::Instant(inst)
    }
}

impl From<TSequence> for Temporal {
    fn from(seq: TSequence) -> Self {
        Self::Sequence(seq)
    }
}

impl From<TSequenceSet> for Temporal {
    fn from(set: TSequenceSet) -> Self {
        Self::SequenceSet(set)
    }
}
