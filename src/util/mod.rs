//! Utility types shared across the codec.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`ReadCursor`] / [`WriteCursor`] - Bounds-checked byte cursors
//! - Length words of variable-length values
//! - Math type re-exports from glam

mod cursor;
mod error;
mod math;
mod varlena;

pub use cursor::*;
pub use error::*;
pub use math::*;
pub use varlena::*;
