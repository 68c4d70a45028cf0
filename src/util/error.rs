//! Error types for the tserialized library.

use thiserror::Error;

/// Main error type for temporal serialization.
///
/// Every variant aborts the current call: temporal data is decoded
/// all-or-nothing, there is no partial result.
#[derive(Error, Debug)]
pub enum Error {
    /// Base type tag is not one of the supported kinds
    #[error("Unsupported base type tag: {0}")]
    UnsupportedBaseType(u8),

    /// Shape tag is sequence-set or unrecognized
    #[error("Unsupported temporal shape tag: {0}")]
    UnsupportedShape(u8),

    /// A read or write would cross the declared buffer boundary
    #[error("Truncated buffer at position {pos}: needed {needed} bytes, {remaining} remaining")]
    TruncatedBuffer {
        pos: usize,
        needed: usize,
        remaining: usize,
    },

    /// Declared envelope length differs from the physical buffer length
    #[error("Length mismatch: envelope declares {declared} bytes, buffer has {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Body decoded but bytes remain inside the declared length
    #[error("{count} trailing bytes after temporal body")]
    TrailingBytes { count: usize },

    /// Opaque value (text, geometry) or value/type pairing is malformed
    #[error("Malformed value: {0}")]
    MalformedValue(String),

    /// Temporal model constructor invariant violated
    #[error("Invalid temporal value: {0}")]
    InvalidTemporal(String),

    /// Runtime was used before `initialize`
    #[error("Runtime is not initialized")]
    NotInitialized,

    /// `initialize` called twice without `shutdown`
    #[error("Runtime is already initialized")]
    AlreadyInitialized,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed value error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedValue(msg.into())
    }

    /// Create an invalid temporal error.
    pub fn invalid_temporal(msg: impl Into<String>) -> Self {
        Self::InvalidTemporal(msg.into())
    }

    /// True for the errors a damaged or cut-short buffer produces.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            Self::TruncatedBuffer { .. } | Self::LengthMismatch { .. } | Self::TrailingBytes { .. }
        )
    }
}

/// Result type alias for tserialized operations.
pub type Result<T> = std::result::Result<T, Error>;
