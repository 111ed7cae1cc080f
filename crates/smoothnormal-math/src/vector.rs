//! Vector helpers with explicit degenerate-input behavior.
//!
//! Both smooth-normal engines must produce the same bits for the same
//! mesh, so every normalization and angle in the pipeline goes through
//! these two functions rather than `glam`'s `normalize_or_zero`, whose
//! zero threshold differs.

use glam::Vec3;
use smoothnormal_types::constants::{ANGLE_EPSILON_SQR, NORMALIZE_EPSILON};

/// Returns `v` scaled to unit length, or zero if `|v| <= 1e-5`.
///
/// ```
/// use smoothnormal_math::{vector::normalized, Vec3};
/// assert_eq!(normalized(Vec3::new(0.0, 3.0, 0.0)), Vec3::Y);
/// assert_eq!(normalized(Vec3::splat(1e-7)), Vec3::ZERO);
/// ```
#[inline]
pub fn normalized(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > NORMALIZE_EPSILON {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Unsigned angle between `a` and `b` in degrees, in `[0, 180]`.
///
/// Returns 0 when either vector has (near) zero length.
#[inline]
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < ANGLE_EPSILON_SQR {
        return 0.0;
    }
    let cos = (a.dot(b) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Returns true if every component is finite.
#[inline]
pub fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
