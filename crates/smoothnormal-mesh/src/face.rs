//! Per-triangle geometry shared by both smooth-normal engines.
//!
//! Edges are normalized *before* the cross product. The face normal is
//! normalized again afterwards, so for valid triangles it is a unit
//! vector either way, but the corner angles are measured between the
//! normalized edges and baked assets depend on this exact sequence of
//! float operations. Keep it as is.

use glam::Vec3;
use smoothnormal_math::vector::{angle_degrees, normalized};

/// Face normal and per-corner angle weights of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    /// Unit face normal, or zero for a degenerate triangle.
    pub normal: Vec3,
    /// Interior angle in degrees at corners 0, 1 and 2.
    pub weights: [f32; 3],
}

impl FaceGeometry {
    /// Computes the geometry of the triangle `(p0, p1, p2)`.
    ///
    /// Degenerate input (coincident corners, zero area) never fails:
    /// zero-length edges normalize to zero, which yields a zero face
    /// normal, so the triangle contributes nothing to its corners.
    pub fn from_positions(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let a = normalized(p1 - p0);
        let b = normalized(p2 - p0);
        let c = normalized(p2 - p1);

        let normal = normalized(a.cross(b));
        let weights = [angle_degrees(a, b), angle_degrees(-a, c), angle_degrees(b, c)];

        Self { normal, weights }
    }

    /// Weighted contribution of this face at corner `corner` (0..3).
    #[inline]
    pub fn contribution(&self, corner: usize) -> Vec3 {
        self.normal * self.weights[corner]
    }

    /// Returns true if the triangle contributes nothing to any vertex.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }
}
