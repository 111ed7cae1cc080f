//! Tangent, binormal, normal (TBN) frames.
//!
//! A vertex's frame is rebuilt from its stored normal and 4-component
//! tangent (xyz direction, w handedness). The binormal is derived, never
//! stored. The frame rotates object-space vectors into tangent space
//! (`to_tangent_space`) and back (`to_object_space`).

use glam::{Mat3, Vec3, Vec4};

use crate::vector::normalized;

/// Per-vertex tangent-space basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    /// Tangent direction as stored on the mesh (not re-normalized).
    pub tangent: Vec3,
    /// `normalize(cross(normal, tangent) * w)`.
    pub binormal: Vec3,
    /// Vertex normal as stored on the mesh.
    pub normal: Vec3,
}

impl TangentFrame {
    /// Builds the frame for a vertex from its normal and packed tangent.
    #[inline]
    pub fn new(normal: Vec3, tangent: Vec4) -> Self {
        let t = tangent.truncate();
        let binormal = normalized(normal.cross(t) * tangent.w);
        Self {
            tangent: t,
            binormal,
            normal,
        }
    }

    /// Matrix whose columns are tangent, binormal and normal.
    ///
    /// Multiplying a tangent-space vector by this matrix yields object space.
    pub fn to_object_matrix(&self) -> Mat3 {
        Mat3::from_cols(self.tangent, self.binormal, self.normal)
    }

    /// Rotates an object-space vector into tangent space and renormalizes.
    ///
    /// Equivalent to multiplying by the transpose of
    /// [`to_object_matrix`](Self::to_object_matrix).
    #[inline]
    pub fn to_tangent_space(&self, v: Vec3) -> Vec3 {
        normalized(Vec3::new(
            self.tangent.dot(v),
            self.binormal.dot(v),
            self.normal.dot(v),
        ))
    }

    /// Rotates a tangent-space vector back into object space and renormalizes.
    #[inline]
    pub fn to_object_space(&self, v: Vec3) -> Vec3 {
        normalized(self.to_object_matrix() * v)
    }
}
