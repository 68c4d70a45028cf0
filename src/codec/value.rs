//! Per-sample value encoding.
//!
//! Fixed-width base types are copied byte for byte (native-endian).
//! Text and geodetic points are copied verbatim with their own length
//! word. Planar points are reduced to their raw ordinates.

use crate::geo::{make_point, point_coords, GSerialized};
use crate::temporal::{BaseType, Flags, Text, Value, Width};
use crate::util::{
    ordinates_size, read_varsize, Error, PointCoords, ReadCursor, Result, WriteCursor, VARHDRSZ,
};

fn type_mismatch(base: BaseType, value: &Value) -> Error {
    Error::malformed(format!(
        "{} value in a {} temporal",
        value.base_type(),
        base
    ))
}

/// Number of bytes `value` occupies in the body.
pub fn value_size(base: BaseType, flags: Flags, value: &Value) -> Result<usize> {
    if value.base_type() != base {
        return Err(type_mismatch(base, value));
    }
    match base.width(flags) {
        Width::Fixed(n) => Ok(n),
        Width::Variable => match value {
            Value::Text(text) => Ok(text.varsize()),
            Value::GeogPoint(gs) => Ok(gs.varsize()),
            _ => Err(type_mismatch(base, value)),
        },
    }
}

/// Write one value; returns the number of bytes written.
pub fn write_value(cur: &mut WriteCursor, base: BaseType, flags: Flags, value: &Value) -> Result<usize> {
    let start = cur.pos();
    match (base, value) {
        (BaseType::Bool, Value::Bool(b)) => cur.write_u8(*b as u8)?,
        (BaseType::Int, Value::Int(i)) => cur.write_i32(*i)?,
        (BaseType::Float, Value::Float(f)) => cur.write_f64(*f)?,
        (BaseType::Text, Value::Text(text)) => cur.write_bytes(text.as_varlena())?,
        (BaseType::GeomPoint, Value::GeomPoint(gs)) => {
            let coords = point_coords(gs)?;
            if coords.has_z() != flags.has_z() {
                return Err(Error::malformed(format!(
                    "point has_z={} but temporal has_z={}",
                    coords.has_z(),
                    flags.has_z()
                )));
            }
            cur.write_bytes(coords.as_bytes())?
        }
        (BaseType::GeogPoint, Value::GeogPoint(gs)) => cur.write_bytes(gs.as_bytes())?,
        (base, value) => return Err(type_mismatch(base, value)),
    }
    Ok(cur.pos() - start)
}

/// Read one value; returns it with the number of bytes consumed.
///
/// Planar points come back with SRID 0: the SRID is not stored.
pub fn read_value(cur: &mut ReadCursor<'_>, base: BaseType, flags: Flags) -> Result<(Value, usize)> {
    let start = cur.pos();
    let value = match base {
        BaseType::Bool => Value::Bool(cur.read_u8()? != 0),
        BaseType::Int => Value::Int(cur.read_i32()?),
        BaseType::Float => Value::Float(cur.read_f64()?),
        BaseType::Text => {
            let size = read_varsize(cur.peek_bytes(VARHDRSZ)?)?;
            Value::Text(Text::from_varlena(cur.read_bytes(size)?)?)
        }
        BaseType::GeomPoint => {
            let len = ordinates_size(flags.has_z());
            let coords = PointCoords::from_bytes(cur.read_bytes(len)?, flags.has_z())
                .ok_or_else(|| Error::malformed("point ordinates"))?;
            Value::GeomPoint(make_point(coords, flags.is_geodetic(), 0))
        }
        BaseType::GeogPoint => {
            let size = read_varsize(cur.peek_bytes(VARHDRSZ)?)?;
            Value::GeogPoint(GSerialized::from_bytes(cur.read_bytes(size)?.to_vec())?)
        }
    };
    Ok((value, cur.pos() - start))
}
