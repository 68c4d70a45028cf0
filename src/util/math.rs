//! Math type re-exports and point coordinate helpers.

pub use glam::{DVec2, DVec3};

use std::fmt;

/// Ordinates of a single 2D or 3D point.
#[derive(Clone, Copy, PartialEq)]
pub enum PointCoords {
    Xy(DVec2),
    Xyz(DVec3),
}

impl PointCoords {
    /// 2D point.
    #[inline]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::Xy(DVec2::new(x, y))
    }

    /// 3D point.
    #[inline]
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::Xyz(DVec3::new(x, y, z))
    }

    #[inline]
    pub const fn has_z(&self) -> bool {
        matches!(self, Self::Xyz(_))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        match self {
            Self::Xy(p) => p.x,
            Self::Xyz(p) => p.x,
        }
    }

    #[inline]
    pub fn y(&self) -> f64 {
        match self {
            Self::Xy(p) => p.y,
            Self::Xyz(p) => p.y,
        }
    }

    /// Z ordinate, if the point has one.
    #[inline]
    pub fn z(&self) -> Option<f64> {
        match self {
            Self::Xy(_) => None,
            Self::Xyz(p) => Some(p.z),
        }
    }

    /// Number of bytes the raw ordinate block occupies.
    #[inline]
    pub const fn num_bytes(&self) -> usize {
        ordinates_size(self.has_z())
    }

    /// Raw ordinate block (native-endian doubles, no padding).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Xy(p) => bytemuck::bytes_of(p),
            Self::Xyz(p) => bytemuck::bytes_of(p),
        }
    }

    /// Rebuild ordinates from a raw block of exactly `ordinates_size(has_z)` bytes.
    pub fn from_bytes(bytes: &[u8], has_z: bool) -> Option<Self> {
        if bytes.len() != ordinates_size(has_z) {
            return None;
        }
        Some(if has_z {
            Self::Xyz(bytemuck::pod_read_unaligned(bytes))
        } else {
            Self::Xy(bytemuck::pod_read_unaligned(bytes))
        })
    }
}

impl fmt::Debug for PointCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xy(p) => write!(f, "POINT({} {})", p.x, p.y),
            Self::Xyz(p) => write!(f, "POINT Z({} {} {})", p.x, p.y, p.z),
        }
    }
}

/// Size of a raw ordinate block: two or three doubles.
#[inline]
pub const fn ordinates_size(has_z: bool) -> usize {
    std::mem::size_of::<f64>() * (2 + has_z as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinates_size() {
        assert_eq!(ordinates_size(false), 16);
        assert_eq!(ordinates_size(true), 24);
    }

    #[test]
    fn test_raw_block() {
        let p = PointCoords::xyz(1.0, 2.0, 3.0);
        let bytes = p.as_bytes();
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[8..16], &2.0f64.to_ne_bytes());

        let back = PointCoords::from_bytes(bytes, true).unwrap();
        assert_eq!(back, p);
        assert!(PointCoords::from_bytes(bytes, false).is_none());
    }
}
