//! Bounds-checked byte cursors.
//!
//! All numeric fields are native-endian: an encoded buffer is only portable
//! between processes sharing endianness and numeric representation.

use byteorder::{ByteOrder, NativeEndian};

use super::{Error, Result};

/// Read cursor over a byte slice.
///
/// The slice passed in is the full readable range; any read that would
/// cross its end fails with [`Error::TruncatedBuffer`] and leaves the
/// position untouched.
#[derive(Debug, Clone)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Cursor positioned at `pos` within `buf`.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self> {
        if pos > buf.len() {
            return Err(Error::TruncatedBuffer { pos: 0, needed: pos, remaining: buf.len() });
        }
        Ok(Self { buf, pos })
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    fn check(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::TruncatedBuffer {
                pos: self.pos,
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Borrow the next `len` bytes without advancing.
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        self.check(len)?;
        let buf: &'a [u8] = self.buf;
        Ok(&buf[self.pos..self.pos + len])
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(NativeEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(NativeEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(NativeEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(NativeEndian::read_i64(self.read_bytes(8)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(NativeEndian::read_f64(self.read_bytes(8)?))
    }
}

/// Write cursor over a pre-sized, zero-filled buffer.
///
/// The buffer never grows: writing past its end fails with
/// [`Error::TruncatedBuffer`].
#[derive(Debug)]
pub struct WriteCursor {
    buf: Vec<u8>,
    pos: usize,
}

impl WriteCursor {
    /// Allocate exactly `size` bytes.
    pub fn with_size(size: usize) -> Self {
        Self { buf: vec![0u8; size], pos: 0 }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn slot(&mut self, len: usize) -> Result<&mut [u8]> {
        if len > self.remaining() {
            return Err(Error::TruncatedBuffer {
                pos: self.pos,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&mut self.buf[start..start + len])
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.slot(data.len())?.copy_from_slice(data);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.slot(1)?[0] = value;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        NativeEndian::write_u16(self.slot(2)?, value);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        NativeEndian::write_u32(self.slot(4)?, value);
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        NativeEndian::write_i32(self.slot(4)?, value);
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        NativeEndian::write_i64(self.slot(8)?, value);
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        NativeEndian::write_f64(self.slot(8)?, value);
        Ok(())
    }

    /// Take the buffer, requiring that every byte was written up to the end.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.pos != self.buf.len() {
            return Err(Error::malformed(format!(
                "encoder wrote {} of {} bytes",
                self.pos,
                self.buf.len()
            )));
        }
        Ok(self.buf)
    }
}
