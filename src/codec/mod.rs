//! Dense, self-describing binary form of temporal values.
//!
//! ## Layout
//!
//! ```text
//! +------------------+
//! | Total length     |  4 bytes (u32)
//! +------------------+
//! | Base type tag    |  1 byte
//! +------------------+
//! | Shape tag        |  1 byte
//! +------------------+
//! | Flags            |  2 bytes (u16)
//! +------------------+
//! | Body             |
//! +------------------+
//! ```
//!
//! Instant body: `timestamp (i64) | value`.
//!
//! Sequence body: `count (i32) | count timestamps (i64) | count values`.
//! Values are packed back to back; the values block starts at
//! `HEADER_SIZE + 4 + count * 8`.
//!
//! All numbers are native-endian. Sequence sets cannot be encoded.

mod format;
mod reader;
mod value;
mod writer;

pub use format::*;
pub use reader::decode;
pub use value::{read_value, value_size, write_value};
pub use writer::{encode, encoded_size};

use rayon::prelude::*;

use crate::temporal::{BaseType, Flags, Subtype, Temporal};
use crate::util::{Error, Result};

/// An encoded temporal value. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TSerialized {
    buf: Vec<u8>,
    envelope: Envelope,
}

impl TSerialized {
    pub(crate) fn from_parts(buf: Vec<u8>, envelope: Envelope) -> Self {
        Self { buf, envelope }
    }

    /// Wrap stored bytes, validating the envelope (not the body).
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self> {
        let envelope = Envelope::parse(&buf)?;
        if envelope.subtype == Subtype::SequenceSet {
            return Err(Error::UnsupportedShape(envelope.subtype.tag()));
        }
        Ok(Self { buf, envelope })
    }

    pub fn encode(temp: &Temporal) -> Result<Self> {
        encode(temp)
    }

    /// Decode into a fresh temporal value.
    pub fn to_temporal(&self) -> Result<Temporal> {
        reader::decode_body(&self.buf, &self.envelope)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    #[inline]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    #[inline]
    pub fn base_type(&self) -> BaseType {
        self.envelope.base_type
    }

    #[inline]
    pub fn subtype(&self) -> Subtype {
        self.envelope.subtype
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.envelope.flags
    }

    /// Stored total length.
    #[inline]
    pub fn physical_size(&self) -> usize {
        self.envelope.size
    }

    /// Number of samples, read without decoding the body.
    pub fn sample_count(&self) -> Result<usize> {
        match self.envelope.subtype {
            Subtype::Instant => Ok(1),
            Subtype::Sequence => reader::read_sequence_count(&self.buf),
            Subtype::SequenceSet => Err(Error::UnsupportedShape(self.envelope.subtype.tag())),
        }
    }
}

impl AsRef<[u8]> for TSerialized {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl TryFrom<&Temporal> for TSerialized {
    type Error = Error;

    fn try_from(temp: &Temporal) -> Result<Self> {
        encode(temp)
    }
}

/// Number of samples in an encoded buffer: 1 for an instant, the stored
/// count for a sequence.
pub fn sample_count(buf: &[u8]) -> Result<usize> {
    let envelope = Envelope::parse(buf)?;
    match envelope.subtype {
        Subtype::Instant => Ok(1),
        Subtype::Sequence => reader::read_sequence_count(buf),
        Subtype::SequenceSet => Err(Error::UnsupportedShape(envelope.subtype.tag())),
    }
}

/// Stored total length of an encoded buffer (the length word only).
pub fn physical_size(buf: &[u8]) -> Result<usize> {
    read_declared_size(buf)
}

/// Encode independent values in parallel.
pub fn encode_batch(temps: &[Temporal]) -> Vec<Result<TSerialized>> {
    temps.par_iter().map(encode).collect()
}

/// Decode independent buffers in parallel.
pub fn decode_batch<B: AsRef<[u8]> + Sync>(bufs: &[B]) -> Vec<Result<Temporal>> {
    bufs.par_iter().map(|b| decode(b.as_ref())).collect()
}
