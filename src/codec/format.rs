//! Envelope layout and body constants.

use crate::temporal::{BaseType, Flags, Subtype};
use crate::util::{Error, ReadCursor, Result, WriteCursor};

/// Size of the envelope in bytes.
pub const HEADER_SIZE: usize = 8;

/// Offset of the total length word (u32).
pub const LENGTH_OFFSET: usize = 0;

/// Offset of the base type tag (u8).
pub const BASE_TYPE_OFFSET: usize = 4;

/// Offset of the shape tag (u8).
pub const SUBTYPE_OFFSET: usize = 5;

/// Offset of the flags (u16).
pub const FLAGS_OFFSET: usize = 6;

/// Size of one timestamp.
pub const TIMESTAMP_SIZE: usize = 8;

/// Size of the sequence sample count (i32).
pub const COUNT_SIZE: usize = 4;

/// Largest buffer the u32 length word can describe.
pub const MAX_ENCODED_SIZE: usize = u32::MAX as usize;

/// Start of the timestamps block of a sequence.
pub const SEQUENCE_TIMESTAMPS_OFFSET: usize = HEADER_SIZE + COUNT_SIZE;

/// Start of the values block of a sequence with `count` samples.
#[inline]
pub const fn sequence_values_offset(count: usize) -> usize {
    SEQUENCE_TIMESTAMPS_OFFSET + count * TIMESTAMP_SIZE
}

/// Parsed envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Envelope {
    /// Declared total length, envelope included.
    pub size: usize,
    pub base_type: BaseType,
    pub subtype: Subtype,
    pub flags: Flags,
}

impl Envelope {
    /// Parse the envelope at the start of `buf`.
    ///
    /// The declared length must equal `buf.len()`; only the declared range
    /// is ever read.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let size = read_declared_size(buf)?;
        if size != buf.len() {
            return Err(Error::LengthMismatch { declared: size, actual: buf.len() });
        }

        let mut cur = ReadCursor::at(buf, BASE_TYPE_OFFSET)?;
        let base_tag = cur.read_u8()?;
        let subtype_tag = cur.read_u8()?;
        let flags = Flags::from_bits(cur.read_u16()?);

        Ok(Self {
            size,
            base_type: BaseType::from_u8(base_tag)?,
            subtype: Subtype::from_u8(subtype_tag)?,
            flags,
        })
    }

    /// Write the envelope at the cursor (which must be at offset 0).
    pub fn write(&self, cur: &mut WriteCursor) -> Result<()> {
        if self.size > MAX_ENCODED_SIZE {
            return Err(Error::malformed(format!(
                "encoded size {} exceeds the length word",
                self.size
            )));
        }
        cur.write_u32(self.size as u32)?;
        cur.write_u8(self.base_type.tag())?;
        cur.write_u8(self.subtype.tag())?;
        cur.write_u16(self.flags.bits())
    }
}

/// Read only the length word.
pub fn read_declared_size(buf: &[u8]) -> Result<usize> {
    let mut cur = ReadCursor::at(buf, LENGTH_OFFSET)?;
    Ok(cur.read_u32()? as usize)
}
