//! Exact-equality keys for vertex positions.
//!
//! Vertices are merged for smoothing only when their positions compare
//! equal component-wise. There is deliberately no tolerance: two copies
//! of a corner that differ in the last bit stay separate, which is what
//! previously baked assets were produced with. Weld the mesh upstream if
//! near-duplicates should share a normal.

use glam::Vec3;

/// Hashable key for a position, equal iff the coordinates are equal.
///
/// `-0.0` and `0.0` map to the same key, as do all NaN payloads, so
/// the key agrees with float equality on everything except NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey([u32; 3]);

impl PositionKey {
    /// Builds the key for `p`.
    #[inline]
    pub fn new(p: Vec3) -> Self {
        Self([canonical_bits(p.x), canonical_bits(p.y), canonical_bits(p.z)])
    }

    /// Returns the raw canonicalized bit patterns.
    #[inline]
    pub fn bits(&self) -> [u32; 3] {
        self.0
    }
}

impl From<Vec3> for PositionKey {
    fn from(p: Vec3) -> Self {
        Self::new(p)
    }
}

#[inline]
fn canonical_bits(x: f32) -> u32 {
    if x.is_nan() {
        f32::NAN.to_bits()
    } else if x == 0.0 {
        0
    } else {
        x.to_bits()
    }
}
