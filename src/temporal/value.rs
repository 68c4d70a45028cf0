//! Sample values and the primitives they are built from.

use std::fmt;

use super::{BaseType, Flags};
use crate::geo::{point_coords, GSerialized};
use crate::util::{check_varsize, with_varsize, Error, PointCoords, Result, VARHDRSZ};

/// Timestamp with time zone: microseconds since the epoch.
pub type TimestampTz = i64;

/// Text value with its own length word.
///
/// The payload is opaque bytes; it is not required to be UTF-8.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Text {
    varlena: Vec<u8>,
}

impl Text {
    /// Fails only if the text is too long for its 4-byte length word.
    pub fn new(s: &str) -> Result<Self> {
        Self::from_payload(s.as_bytes())
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        Ok(Self { varlena: with_varsize(payload)? })
    }

    /// Wrap bytes that start with their own length word.
    pub fn from_varlena(bytes: &[u8]) -> Result<Self> {
        check_varsize(bytes)?;
        Ok(Self { varlena: bytes.to_vec() })
    }

    /// Full form, length word included.
    #[inline]
    pub fn as_varlena(&self) -> &[u8] {
        &self.varlena
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.varlena[VARHDRSZ..]
    }

    #[inline]
    pub fn varsize(&self) -> usize {
        self.varlena.len()
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.payload()).ok()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "Text({:?})", s),
            None => write!(f, "Text({:?})", self.payload()),
        }
    }
}

impl TryFrom<&str> for Text {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// One sample value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f64),
    Text(Text),
    /// Planar point geometry.
    GeomPoint(GSerialized),
    /// Geodetic point geometry.
    GeogPoint(GSerialized),
}

impl Value {
    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Bool(_) => BaseType::Bool,
            Self::Int(_) => BaseType::Int,
            Self::Float(_) => BaseType::Float,
            Self::Text(_) => BaseType::Text,
            Self::GeomPoint(_) => BaseType::GeomPoint,
            Self::GeogPoint(_) => BaseType::GeogPoint,
        }
    }

    /// Has-Z and geodetic bits implied by this value.
    pub fn flags(&self) -> Flags {
        match self {
            Self::GeomPoint(gs) | Self::GeogPoint(gs) => Flags::empty()
                .set(Flags::Z, gs.has_z())
                .set(Flags::GEODETIC, gs.is_geodetic()),
            _ => Flags::empty(),
        }
    }

    /// Ordinates of a point value.
    pub fn point_coords(&self) -> Option<Result<PointCoords>> {
        match self {
            Self::GeomPoint(gs) | Self::GeogPoint(gs) => Some(point_coords(gs)),
            _ => None,
        }
    }

    /// SRID of a point value.
    pub fn srid(&self) -> Option<i32> {
        match self {
            Self::GeomPoint(gs) | Self::GeogPoint(gs) => Some(gs.srid()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Text> for Value {
    fn from(v: Text) -> Self {
        Self::Text(v)
    }
}
