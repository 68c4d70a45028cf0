//! Point codec: single points to and from their opaque geometry form.

use super::gserialized::*;
use crate::util::{ordinates_size, set_varsize, Error, PointCoords, Result};

/// Offset of the point count after the type discriminator.
const NPOINTS_OFFSET: usize = 4;

/// Size of type + point count.
const POINT_PREFIX_SIZE: usize = 8;

/// Build the minimal opaque geometry for one point.
///
/// No bounding box is written. The SRID is stored as a 21-bit field;
/// validate untrusted values with [`checked_srid`] first.
pub fn make_point(coords: PointCoords, geodetic: bool, srid: i32) -> GSerialized {
    let size = GS_HEADER_SIZE + POINT_PREFIX_SIZE + coords.num_bytes();
    let mut bytes = vec![0u8; size];
    // at most 40 bytes
    set_varsize(&mut bytes, size as u32);
    write_srid(&mut bytes, srid);

    let mut gflags = GFLAG_VERSION;
    if coords.has_z() {
        gflags |= GFLAG_Z;
    }
    if geodetic {
        gflags |= GFLAG_GEODETIC;
    }
    bytes[GFLAGS_OFFSET] = gflags;

    let mut pos = GS_HEADER_SIZE;
    bytes[pos..pos + 4].copy_from_slice(&POINT_TYPE.to_ne_bytes());
    pos += NPOINTS_OFFSET;
    bytes[pos..pos + 4].copy_from_slice(&1u32.to_ne_bytes());
    pos += 4;
    bytes[pos..].copy_from_slice(coords.as_bytes());

    GSerialized::from_bytes_unchecked(bytes)
}

/// Extract the X, Y and (if present) Z ordinates of a point geometry.
///
/// An M ordinate is skipped. SRID, flags and bounding box are dropped.
pub fn point_coords(gs: &GSerialized) -> Result<PointCoords> {
    let gtype = gs.geometry_type()?;
    if gtype != POINT_TYPE {
        return Err(Error::malformed(format!("geometry type {} is not a point", gtype)));
    }

    let off = gs.type_offset() + NPOINTS_OFFSET;
    let bytes = gs.as_bytes();
    let npoints = bytes
        .get(off..off + 4)
        .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| Error::malformed("point truncated before its count"))?;
    if npoints != 1 {
        return Err(Error::malformed(format!("point geometry has {} points", npoints)));
    }

    let start = off + 4;
    let has_z = gs.has_z();
    let len = ordinates_size(has_z);
    bytes
        .get(start..start + len)
        .and_then(|raw| PointCoords::from_bytes(raw, has_z))
        .ok_or_else(|| Error::malformed("point truncated inside its ordinates"))
}
