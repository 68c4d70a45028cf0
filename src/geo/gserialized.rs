//! Opaque serialized geometry.
//!
//! ```text
//! +------------------+
//! | Length word      |  4 bytes (u32, total size)
//! +------------------+
//! | SRID             |  3 bytes (21-bit, big-endian order)
//! +------------------+
//! | Flags            |  1 byte
//! +------------------+
//! | [Extended flags] |  8 bytes, only if EXTENDED flag set
//! +------------------+
//! | [Bounding box]   |  only if BBOX flag set
//! +------------------+
//! | Type             |  4 bytes (u32)
//! +------------------+
//! | Point count      |  4 bytes (u32)
//! +------------------+
//! | Ordinates        |  2..4 doubles per point
//! +------------------+
//! ```
//!
//! Only the header fields are interpreted here; the body is handed to the
//! point codec.

use std::fmt;

use byteorder::{ByteOrder, NativeEndian};

use crate::util::{check_varsize, Error, Result, VARHDRSZ};

/// Size of length word + SRID + flags.
pub const GS_HEADER_SIZE: usize = 8;

/// Offset of the 3-byte SRID.
pub const SRID_OFFSET: usize = VARHDRSZ;

/// Offset of the flag byte.
pub const GFLAGS_OFFSET: usize = 7;

/// Geometry has a Z ordinate.
pub const GFLAG_Z: u8 = 0x01;
/// Geometry has an M ordinate.
pub const GFLAG_M: u8 = 0x02;
/// A bounding box follows the header.
pub const GFLAG_BBOX: u8 = 0x04;
/// Geometry is geodetic.
pub const GFLAG_GEODETIC: u8 = 0x08;
/// An 8-byte extended flag word follows the header.
pub const GFLAG_EXTENDED: u8 = 0x10;
/// Serialization version bit.
pub const GFLAG_VERSION: u8 = 0x40;

/// Type discriminator of a single point.
pub const POINT_TYPE: u32 = 1;

/// Size of the extended flag word.
pub const GS_EXTENDED_SIZE: usize = 8;

/// Smallest SRID the 21-bit field can hold.
pub const SRID_MIN: i32 = -(1 << 20);
/// Largest SRID the 21-bit field can hold.
pub const SRID_MAX: i32 = (1 << 20) - 1;

/// Owned opaque geometry bytes, length word included.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GSerialized {
    bytes: Vec<u8>,
}

impl GSerialized {
    /// Wrap raw bytes, checking the length word and header size.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        check_varsize(&bytes)?;
        if bytes.len() < GS_HEADER_SIZE {
            return Err(Error::malformed(format!(
                "geometry of {} bytes is shorter than its header",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Wrap bytes known to be well formed.
    pub(crate) fn from_bytes_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total size declared by the length word.
    #[inline]
    pub fn varsize(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn gflags(&self) -> u8 {
        self.bytes[GFLAGS_OFFSET]
    }

    #[inline]
    pub fn has_z(&self) -> bool {
        self.gflags() & GFLAG_Z != 0
    }

    #[inline]
    pub fn has_m(&self) -> bool {
        self.gflags() & GFLAG_M != 0
    }

    #[inline]
    pub fn has_bbox(&self) -> bool {
        self.gflags() & GFLAG_BBOX != 0
    }

    #[inline]
    pub fn is_geodetic(&self) -> bool {
        self.gflags() & GFLAG_GEODETIC != 0
    }

    #[inline]
    pub fn is_extended(&self) -> bool {
        self.gflags() & GFLAG_EXTENDED != 0
    }

    /// Spatial reference identifier (0 = unknown).
    pub fn srid(&self) -> i32 {
        let raw = ((self.bytes[SRID_OFFSET] as i32) << 16)
            | ((self.bytes[SRID_OFFSET + 1] as i32) << 8)
            | (self.bytes[SRID_OFFSET + 2] as i32);
        // sign-extend the 21-bit field
        (raw << 11) >> 11
    }

    /// Bytes taken by the optional bounding box (floats).
    pub fn bbox_size(&self) -> usize {
        if !self.has_bbox() {
            return 0;
        }
        let dims = if self.is_geodetic() {
            3
        } else {
            2 + self.has_z() as usize + self.has_m() as usize
        };
        2 * dims * std::mem::size_of::<f32>()
    }

    /// Offset of the type discriminator.
    #[inline]
    pub fn type_offset(&self) -> usize {
        let extended = if self.is_extended() { GS_EXTENDED_SIZE } else { 0 };
        GS_HEADER_SIZE + extended + self.bbox_size()
    }

    /// Type discriminator, if the geometry is long enough to carry one.
    pub fn geometry_type(&self) -> Result<u32> {
        let off = self.type_offset();
        self.bytes
            .get(off..off + 4)
            .map(NativeEndian::read_u32)
            .ok_or_else(|| Error::malformed("geometry truncated before its type"))
    }
}

impl fmt::Debug for GSerialized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GSerialized")
            .field("size", &self.varsize())
            .field("srid", &self.srid())
            .field("gflags", &format_args!("{:#04x}", self.gflags()))
            .finish()
    }
}

/// Check that `srid` fits the 21-bit field.
pub fn checked_srid(srid: i64) -> Result<i32> {
    i32::try_from(srid)
        .ok()
        .filter(|s| (SRID_MIN..=SRID_MAX).contains(s))
        .ok_or_else(|| {
            Error::malformed(format!(
                "SRID {} outside {}..={}",
                srid, SRID_MIN, SRID_MAX
            ))
        })
}

/// Store a 21-bit SRID into its 3-byte field; higher bits are dropped,
/// see [`checked_srid`].
pub(crate) fn write_srid(bytes: &mut [u8], srid: i32) {
    bytes[SRID_OFFSET] = ((srid & 0x001F_0000) >> 16) as u8;
    bytes[SRID_OFFSET + 1] = ((srid & 0x0000_FF00) >> 8) as u8;
    bytes[SRID_OFFSET + 2] = (srid & 0x0000_00FF) as u8;
}
