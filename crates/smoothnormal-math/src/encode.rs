//! Conversion between signed normals and color-channel range.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Value range a baked normal is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalRange {
    /// Components in `[-1, 1]`; used for tangent channels.
    Signed,
    /// Components remapped to `[0, 1]` via `n * 0.5 + 0.5`; used for colors.
    Color,
}

impl NormalRange {
    /// Expresses a signed normal in this range.
    #[inline]
    pub fn encode(self, n: Vec3) -> Vec3 {
        match self {
            Self::Signed => n,
            Self::Color => to_color_range(n),
        }
    }

    /// Inverse of [`encode`](Self::encode).
    #[inline]
    pub fn decode(self, v: Vec3) -> Vec3 {
        match self {
            Self::Signed => v,
            Self::Color => from_color_range(v),
        }
    }
}

/// `n * 0.5 + 0.5`: maps `[-1, 1]` onto `[0, 1]`.
#[inline]
pub fn to_color_range(n: Vec3) -> Vec3 {
    n * 0.5 + Vec3::splat(0.5)
}

/// `c * 2 - 1`: maps `[0, 1]` back onto `[-1, 1]`.
#[inline]
pub fn from_color_range(c: Vec3) -> Vec3 {
    c * 2.0 - Vec3::ONE
}
