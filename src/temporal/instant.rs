//! Temporal instant: one value at one timestamp.

use super::{BaseType, Flags, TimestampTz, Value};
use crate::geo::make_point;
use crate::util::PointCoords;

/// A single (timestamp, value) sample.
#[derive(Clone, Debug, PartialEq)]
pub struct TInstant {
    value: Value,
    t: TimestampTz,
}

impl TInstant {
    pub fn new(value: impl Into<Value>, t: TimestampTz) -> Self {
        Self { value: value.into(), t }
    }

    /// Planar point instant.
    pub fn geom_point(coords: PointCoords, srid: i32, t: TimestampTz) -> Self {
        Self::new(Value::GeomPoint(make_point(coords, false, srid)), t)
    }

    /// Geodetic point instant.
    pub fn geog_point(coords: PointCoords, srid: i32, t: TimestampTz) -> Self {
        Self::new(Value::GeogPoint(make_point(coords, true, srid)), t)
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn t(&self) -> TimestampTz {
        self.t
    }

    #[inline]
    pub fn base_type(&self) -> BaseType {
        self.value.base_type()
    }

    /// Flags of an instant never carry an interpolation.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.value.flags()
    }
}
