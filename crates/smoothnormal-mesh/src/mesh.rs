//! Core mesh type.
//!
//! Attributes are stored as parallel per-vertex arrays (array of
//! structures per attribute), matching the layout asset pipelines hand
//! over and the layout the baked channels are written back in.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

/// A triangle mesh with the vertex attributes smooth-normal baking needs.
///
/// Invariants (checked by [`Mesh::validate`]):
/// - `normals`, `tangents` have one entry per position
/// - `colors` is either empty (no vertex colors) or one entry per position
/// - `indices.len()` is a multiple of 3 and every index is in range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Name of the mesh asset, used in logs and reports.
    pub name: String,

    /// Object-space vertex positions.
    pub positions: Vec<Vec3>,

    /// Object-space unit vertex normals.
    pub normals: Vec<Vec3>,

    /// Vertex tangents: xyz direction, w handedness (±1).
    pub tangents: Vec<Vec4>,

    /// RGBA vertex colors. Empty when the mesh carries none.
    pub colors: Vec<Vec4>,

    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty named mesh with pre-allocated capacity.
    pub fn with_capacity(name: impl Into<String>, vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            name: name.into(),
            positions: Vec::with_capacity(vertex_capacity),
            normals: Vec::with_capacity(vertex_capacity),
            tangents: Vec::with_capacity(vertex_capacity),
            colors: Vec::new(),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh carries per-vertex colors.
    #[inline]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Returns the three corner positions of triangle `t`.
    #[inline]
    pub fn triangle_positions(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, tangent: Vec4) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.tangents.push(tangent);
        index
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Attribute arrays have the same length as `positions`
    /// - Index count is a multiple of 3
    /// - Triangle indices are within bounds
    ///
    /// Degenerate triangles (repeated indices, zero area) are allowed:
    /// the bakers give them a defined fallback instead of rejecting the mesh.
    pub fn validate(&self) -> SmoothNormalResult<()> {
        let n = self.positions.len();

        if self.normals.len() != n {
            return Err(SmoothNormalError::InvalidMesh(format!(
                "'{}': normal count ({}) != vertex count ({})",
                self.name,
                self.normals.len(),
                n
            )));
        }
        if self.tangents.len() != n {
            return Err(SmoothNormalError::InvalidMesh(format!(
                "'{}': tangent count ({}) != vertex count ({})",
                self.name,
                self.tangents.len(),
                n
            )));
        }
        if !self.colors.is_empty() && self.colors.len() != n {
            return Err(SmoothNormalError::InvalidMesh(format!(
                "'{}': color count ({}) != vertex count ({})",
                self.name,
                self.colors.len(),
                n
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(SmoothNormalError::InvalidMesh(format!(
                "'{}': index count ({}) is not divisible by 3",
                self.name,
                self.indices.len()
            )));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(SmoothNormalError::InvalidMesh(format!(
                    "'{}': index {} at position {} is out of range (vertex count: {})",
                    self.name, idx, i, n
                )));
            }
        }

        Ok(())
    }
}
