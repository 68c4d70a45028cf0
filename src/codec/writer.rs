//! Temporal encoder.
//!
//! The output is sized exactly before anything is written; the write
//! cursor refuses to grow it and `finish` refuses to return it unless
//! every byte was produced. On any error the partial buffer is dropped.

use super::format::*;
use super::value::{value_size, write_value};
use super::TSerialized;
use crate::temporal::{Flags, TInstant, TSequence, Temporal};
use crate::util::{Error, Result, WriteCursor};

/// Exact size of the encoded form of `temp`, envelope included.
pub fn encoded_size(temp: &Temporal) -> Result<usize> {
    let base = temp.base_type();
    let flags = temp.flags();
    match temp {
        Temporal::Instant(inst) => {
            Ok(HEADER_SIZE + TIMESTAMP_SIZE + value_size(base, flags, inst.value())?)
        }
        Temporal::Sequence(seq) => {
            let mut size = sequence_values_offset(seq.count());
            for inst in seq.instants() {
                size += value_size(base, flags, inst.value())?;
            }
            Ok(size)
        }
        Temporal::SequenceSet(_) => Err(Error::UnsupportedShape(temp.subtype().tag())),
    }
}

/// Encode a temporal value.
#[tracing::instrument(level = "trace", skip_all, fields(subtype = %temp.subtype(), base = %temp.base_type()))]
pub fn encode(temp: &Temporal) -> Result<TSerialized> {
    let size = encoded_size(temp)?;
    let envelope = Envelope {
        size,
        base_type: temp.base_type(),
        subtype: temp.subtype(),
        flags: temp.flags(),
    };

    let mut cur = WriteCursor::with_size(size);
    envelope.write(&mut cur)?;
    match temp {
        Temporal::Instant(inst) => write_instant(&mut cur, inst, envelope.flags)?,
        Temporal::Sequence(seq) => write_sequence(&mut cur, seq, envelope.flags)?,
        Temporal::SequenceSet(_) => return Err(Error::UnsupportedShape(temp.subtype().tag())),
    }

    let buf = cur.finish()?;
    tracing::trace!(size, "encoded temporal");
    Ok(TSerialized::from_parts(buf, envelope))
}

fn write_instant(cur: &mut WriteCursor, inst: &TInstant, flags: Flags) -> Result<()> {
    cur.write_i64(inst.t())?;
    write_value(cur, inst.base_type(), flags, inst.value())?;
    Ok(())
}

/// Timestamps block first, then values block.
fn write_sequence(cur: &mut WriteCursor, seq: &TSequence, flags: Flags) -> Result<()> {
    let count = i32::try_from(seq.count())
        .map_err(|_| Error::malformed(format!("sequence of {} instants is too long", seq.count())))?;
    cur.write_i32(count)?;
    for inst in seq.instants() {
        cur.write_i64(inst.t())?;
    }

    debug_assert_eq!(cur.pos(), sequence_values_offset(seq.count()));
    let base = seq.base_type();
    for inst in seq.instants() {
        write_value(cur, base, flags, inst.value())?;
    }
    Ok(())
}
