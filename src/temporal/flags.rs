//! Temporal flag bits carried in the envelope.

use std::fmt;

/// Interpolation between consecutive samples of a sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Interpolation {
    /// Instants carry no interpolation.
    #[default]
    None = 0,
    Discrete = 1,
    Step = 2,
    Linear = 3,
}

impl Interpolation {
    #[inline]
    pub const fn from_u8(v: u8) -> Self {
        match v & 0x03 {
            1 => Self::Discrete,
            2 => Self::Step,
            3 => Self::Linear,
            _ => Self::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Discrete => "discrete",
            Self::Step => "step",
            Self::Linear => "linear",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "discrete" => Some(Self::Discrete),
            "step" => Some(Self::Step),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }
}

/// 16-bit flag field.
///
/// Unknown bits read from a buffer are preserved but never interpreted.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u16);

impl Flags {
    /// Two-bit interpolation field.
    pub const INTERP_MASK: u16 = 0x000C;
    const INTERP_SHIFT: u16 = 2;
    /// Point carries a third ordinate.
    pub const Z: u16 = 0x0020;
    /// Point uses spherical semantics.
    pub const GEODETIC: u16 = 0x0080;

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn contains(self, bit: u16) -> bool {
        self.0 & bit == bit
    }

    /// Copy with `bit` set.
    #[inline]
    pub const fn with(self, bit: u16) -> Self {
        Self(self.0 | bit)
    }

    /// Copy with `bit` set or cleared.
    #[inline]
    pub const fn set(self, bit: u16, on: bool) -> Self {
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    #[inline]
    pub const fn has_z(self) -> bool {
        self.contains(Self::Z)
    }

    #[inline]
    pub const fn is_geodetic(self) -> bool {
        self.contains(Self::GEODETIC)
    }

    #[inline]
    pub const fn interpolation(self) -> Interpolation {
        Interpolation::from_u8(((self.0 & Self::INTERP_MASK) >> Self::INTERP_SHIFT) as u8)
    }

    #[inline]
    pub const fn with_interpolation(self, interp: Interpolation) -> Self {
        Self((self.0 & !Self::INTERP_MASK) | ((interp as u16) << Self::INTERP_SHIFT))
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flags({:#06x}: z={}, geodetic={}, interp={})",
            self.0,
            self.has_z(),
            self.is_geodetic(),
            self.interpolation().name()
        )
    }
}
