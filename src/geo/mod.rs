//! Geometry primitives used by spatial temporal values.
//!
//! [`GSerialized`] is the opaque variable-length point encoding; the point
//! codec converts between it and bare [`PointCoords`](crate::util::PointCoords).

mod gserialized;
mod point;

pub use gserialized::*;
pub use point::*;
