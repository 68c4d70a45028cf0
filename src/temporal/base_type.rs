//! Base types - the value kinds a temporal sample can carry.

use std::fmt;

use super::Flags;
use crate::util::{ordinates_size, Error, Result};

/// Value kind carried by every sample of a temporal value.
///
/// The discriminant is the wire tag stored in the envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BaseType {
    /// Boolean (stored as u8: 0 = false, non-zero = true)
    Bool = 1,
    /// Signed 32-bit integer
    Int = 2,
    /// 64-bit floating point (IEEE 754 double precision)
    Float = 3,
    /// Text with its own 4-byte length word
    Text = 4,
    /// Planar point, persisted as raw ordinates only
    GeomPoint = 5,
    /// Geodetic point, persisted as the verbatim opaque geometry
    GeogPoint = 6,
}

/// Encoded width of one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    /// Every value occupies exactly this many bytes.
    Fixed(usize),
    /// Each value declares its own length in a leading length word.
    Variable,
}

/// How the width of a base type is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthRule {
    Const(usize),
    /// Two or three doubles depending on the has-Z flag.
    Ordinates,
    SelfDeclared,
}

/// Static metadata for one base type.
#[derive(Clone, Copy, Debug)]
pub struct BaseTypeInfo {
    pub base: BaseType,
    pub name: &'static str,
    pub width: WidthRule,
    /// Values go through the point codec (ordinates only).
    pub point_encoding: bool,
    /// Values are spatial (planar or geodetic points).
    pub spatial: bool,
    /// Linear interpolation is meaningful.
    pub continuous: bool,
}

/// Metadata table, indexed by `tag - 1`.
pub static BASE_TYPES: [BaseTypeInfo; BaseType::COUNT] = [
    BaseTypeInfo {
        base: BaseType::Bool,
        name: "tbool",
        width: WidthRule::Const(std::mem::size_of::<u8>()),
        point_encoding: false,
        spatial: false,
        continuous: false,
    },
    BaseTypeInfo {
        base: BaseType::Int,
        name: "tint",
        width: WidthRule::Const(std::mem::size_of::<i32>()),
        point_encoding: false,
        spatial: false,
        continuous: false,
    },
    BaseTypeInfo {
        base: BaseType::Float,
        name: "tfloat",
        width: WidthRule::Const(std::mem::size_of::<f64>()),
        point_encoding: false,
        spatial: false,
        continuous: true,
    },
    BaseTypeInfo {
        base: BaseType::Text,
        name: "ttext",
        width: WidthRule::SelfDeclared,
        point_encoding: false,
        spatial: false,
        continuous: false,
    },
    BaseTypeInfo {
        base: BaseType::GeomPoint,
        name: "tgeompoint",
        width: WidthRule::Ordinates,
        point_encoding: true,
        spatial: true,
        continuous: true,
    },
    BaseTypeInfo {
        base: BaseType::GeogPoint,
        name: "tgeogpoint",
        width: WidthRule::SelfDeclared,
        point_encoding: false,
        spatial: true,
        continuous: true,
    },
];

impl BaseType {
    /// Number of supported base types.
    pub const COUNT: usize = 6;

    /// All base types in tag order.
    pub const ALL: [BaseType; Self::COUNT] = [
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Text,
        Self::GeomPoint,
        Self::GeogPoint,
    ];

    /// Parse a wire tag.
    pub fn from_u8(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Self::Bool),
            2 => Ok(Self::Int),
            3 => Ok(Self::Float),
            4 => Ok(Self::Text),
            5 => Ok(Self::GeomPoint),
            6 => Ok(Self::GeogPoint),
            _ => Err(Error::UnsupportedBaseType(tag)),
        }
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn info(self) -> &'static BaseTypeInfo {
        &BASE_TYPES[self as usize - 1]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Parse a type name (`"tfloat"`, or the short form `"float"`).
    pub fn from_name(name: &str) -> Option<Self> {
        BASE_TYPES
            .iter()
            .find(|info| info.name == name || &info.name[1..] == name)
            .map(|info| info.base)
    }

    /// Encoded width of one value under the given flags.
    pub fn width(self, flags: Flags) -> Width {
        match self.info().width {
            WidthRule::Const(n) => Width::Fixed(n),
            WidthRule::Ordinates => Width::Fixed(ordinates_size(flags.has_z())),
            WidthRule::SelfDeclared => Width::Variable,
        }
    }

    #[inline]
    pub fn is_point_encoded(self) -> bool {
        self.info().point_encoding
    }

    #[inline]
    pub fn is_spatial(self) -> bool {
        self.info().spatial
    }

    #[inline]
    pub fn is_continuous(self) -> bool {
        self.info().continuous
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
