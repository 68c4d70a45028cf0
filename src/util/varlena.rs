//! Self-declared length words of variable-length values.
//!
//! Text and opaque geometries start with a native-endian u32 holding their
//! total size in bytes, the word itself included.

use byteorder::{ByteOrder, NativeEndian};

use super::{Error, Result};

/// Size of the length word.
pub const VARHDRSZ: usize = 4;

/// Read the declared total size from the start of `bytes`.
pub fn read_varsize(bytes: &[u8]) -> Result<usize> {
    if bytes.len() < VARHDRSZ {
        return Err(Error::TruncatedBuffer {
            pos: 0,
            needed: VARHDRSZ,
            remaining: bytes.len(),
        });
    }
    let size = NativeEndian::read_u32(bytes) as usize;
    if size < VARHDRSZ {
        return Err(Error::malformed(format!("declared length {} is shorter than its own header", size)));
    }
    Ok(size)
}

/// Store `size` into the length word at the start of `bytes`.
#[inline]
pub fn set_varsize(bytes: &mut [u8], size: u32) {
    NativeEndian::write_u32(&mut bytes[..VARHDRSZ], size);
}

/// Total size of a value with `payload_len` payload bytes, if the length
/// word can hold it.
pub fn varsize_for(payload_len: usize) -> Result<u32> {
    VARHDRSZ
        .checked_add(payload_len)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(|| {
            Error::malformed(format!(
                "payload of {} bytes does not fit a 4-byte length word",
                payload_len
            ))
        })
}

/// Prefix `payload` with its length word.
pub fn with_varsize(payload: &[u8]) -> Result<Vec<u8>> {
    let size = varsize_for(payload.len())?;
    let mut buf = vec![0u8; VARHDRSZ + payload.len()];
    set_varsize(&mut buf, size);
    buf[VARHDRSZ..].copy_from_slice(payload);
    Ok(buf)
}

/// Check that `bytes` is exactly one value of its declared size.
pub fn check_varsize(bytes: &[u8]) -> Result<usize> {
    let size = read_varsize(bytes)?;
    if size != bytes.len() {
        return Err(Error::malformed(format!(
            "declared length {} does not match {} bytes",
            size,
            bytes.len()
        )));
    }
    Ok(size)
}
