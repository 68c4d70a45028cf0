//! Temporal decoder.

use super::format::*;
use super::value::read_value;
use crate::temporal::{Subtype, TInstant, TSequence, Temporal};
use crate::util::{Error, ReadCursor, Result};

/// Decode a temporal value from its encoded form.
///
/// `buf` must be exactly one encoded value: its length must match the
/// envelope, and the body must consume every declared byte.
#[tracing::instrument(level = "trace", skip_all, fields(len = buf.len()))]
pub fn decode(buf: &[u8]) -> Result<Temporal> {
    let envelope = Envelope::parse(buf)?;
    decode_body(buf, &envelope)
}

/// Decode the body of a buffer whose envelope was already parsed.
pub(crate) fn decode_body(buf: &[u8], envelope: &Envelope) -> Result<Temporal> {
    let buf = &buf[..envelope.size];
    match envelope.subtype {
        Subtype::Instant => read_instant(buf, envelope).map(Temporal::Instant),
        Subtype::Sequence => read_sequence(buf, envelope).map(Temporal::Sequence),
        Subtype::SequenceSet => Err(Error::UnsupportedShape(Subtype::SequenceSet.tag())),
    }
}

fn read_instant(buf: &[u8], envelope: &Envelope) -> Result<TInstant> {
    let mut cur = ReadCursor::at(buf, HEADER_SIZE)?;
    let t = cur.read_i64()?;
    let (value, _) = read_value(&mut cur, envelope.base_type, envelope.flags)?;
    if !cur.is_at_end() {
        return Err(Error::TrailingBytes { count: cur.remaining() });
    }
    Ok(TInstant::new(value, t))
}

/// Read the sample count of a sequence body.
pub(crate) fn read_sequence_count(buf: &[u8]) -> Result<usize> {
    let mut cur = ReadCursor::at(buf, HEADER_SIZE)?;
    let count = cur.read_i32()?;
    if count <= 0 {
        return Err(Error::malformed(format!("sequence count {}", count)));
    }
    Ok(count as usize)
}

fn read_sequence(buf: &[u8], envelope: &Envelope) -> Result<TSequence> {
    let count = read_sequence_count(buf)?;
    let values_start = count
        .checked_mul(TIMESTAMP_SIZE)
        .and_then(|n| n.checked_add(SEQUENCE_TIMESTAMPS_OFFSET))
        .ok_or_else(|| Error::malformed(format!("sequence count {}", count)))?;

    // Both cursors are bounded by the declared length; the timestamps
    // cursor is additionally bounded by the start of the values block.
    let mut t_cur = ReadCursor::at(&buf[..values_start.min(buf.len())], SEQUENCE_TIMESTAMPS_OFFSET)?;
    let mut v_cur = ReadCursor::at(buf, values_start)?;
    tracing::trace!(count, values_start, "decoding sequence");

    let mut instants = Vec::with_capacity(count);
    for _ in 0..count {
        let t = t_cur.read_i64()?;
        let (value, _) = read_value(&mut v_cur, envelope.base_type, envelope.flags)?;
        instants.push(TInstant::new(value, t));
    }
    if !v_cur.is_at_end() {
        return Err(Error::TrailingBytes { count: v_cur.remaining() });
    }

    // Bounds are not stored; decoded sequences are inclusive on both ends.
    Ok(TSequence::from_instants_unchecked(
        instants,
        true,
        true,
        envelope.flags.interpolation(),
    ))
}
