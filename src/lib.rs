//! # tserialized
//!
//! Compact binary serialization for temporal values: a value of one base
//! type (boolean, integer, float, text, planar or geodetic point) sampled
//! at one or more timestamps.
//!
//! The encoded form is a single contiguous buffer: an 8-byte envelope
//! (total length, base type, shape, flags) followed by a body whose layout
//! is fully determined by the base type and the shape. See [`codec`]
//! for the layout.
//!
//! ## Modules
//!
//! - [`util`] - Errors, byte cursors, length words, point coordinates
//! - [`geo`] - Opaque point geometry and the point codec
//! - [`temporal`] - In-memory temporal value model
//! - [`codec`] - Encoder, decoder and introspection
//! - [`runtime`] - Process-wide initialization for embedding systems
//!
//! ## Example
//!
//! ```
//! use tserialized::prelude::*;
//!
//! let temp: Temporal = TInstant::new(3.5, 1_000_000).into();
//! let ts = encode(&temp)?;
//! assert_eq!(ts.physical_size(), 24);
//! assert_eq!(decode(ts.as_bytes())?, temp);
//! # Ok::<(), tserialized::Error>(())
//! ```
//!
//! ## Limitations
//!
//! - Planar points are stored as bare ordinates; their SRID decodes as 0.
//! - Sequence bounds are not stored; decoded sequences are inclusive.
//! - Sequence sets cannot be encoded or decoded.
//! - Buffers are native-endian and not portable across architectures.

pub mod util;
pub mod geo;
pub mod temporal;
pub mod codec;
pub mod runtime;

// Re-export commonly used types
pub use codec::{decode, encode, physical_size, sample_count, TSerialized};
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::temporal::{
        BaseType, Flags, Interpolation, Subtype, TInstant, TSequence, TSequenceSet, Temporal, Text,
        TimestampTz, Value,
    };
    pub use crate::codec::{decode, encode, physical_size, sample_count, TSerialized};
    pub use crate::util::{Error, PointCoords, Result};
}
