//! Channel snapshots for diffing bakes.
//!
//! A snapshot captures the channels a bake writes (colors and tangents)
//! so two runs can be compared bit for bit, e.g. to confirm that
//! re-baking a model changes nothing.

use serde::{Deserialize, Serialize};
use smoothnormal_math::Vec4;
use smoothnormal_mesh::Mesh;
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

/// The bake-writable channels of one mesh.
///
/// Serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    /// Mesh name.
    pub mesh: String,
    /// Number of vertices.
    pub vertex_count: usize,
    /// RGBA vertex colors (empty if none).
    pub colors: Vec<Vec4>,
    /// Vertex tangents.
    pub tangents: Vec<Vec4>,
}

/// Differences between two snapshots of the same mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelDiff {
    /// Vertices whose color bits differ.
    pub changed_colors: usize,
    /// Vertices whose tangent bits differ.
    pub changed_tangents: usize,
    /// Largest absolute component difference across both channels.
    pub max_delta: f32,
}

impl ChannelDiff {
    /// Returns true if the snapshots are bit-identical.
    pub fn is_identical(&self) -> bool {
        self.changed_colors == 0 && self.changed_tangents == 0
    }
}

impl ChannelSnapshot {
    /// Captures `mesh`'s colors and tangents.
    pub fn capture(mesh: &Mesh) -> Self {
        Self {
            mesh: mesh.name.clone(),
            vertex_count: mesh.vertex_count(),
            colors: mesh.colors.clone(),
            tangents: mesh.tangents.clone(),
        }
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> SmoothNormalResult<String> {
        serde_json::to_string(self).map_err(|e| SmoothNormalError::Serialization(e.to_string()))
    }

    /// Deserializes from JSON.
    pub fn from_json(text: &str) -> SmoothNormalResult<Self> {
        serde_json::from_str(text).map_err(|e| SmoothNormalError::Serialization(e.to_string()))
    }

    /// Compares against a later snapshot of the same mesh.
    ///
    /// Fails if the vertex counts differ or only one side has colors.
    pub fn diff(&self, other: &ChannelSnapshot) -> SmoothNormalResult<ChannelDiff> {
        if self.vertex_count != other.vertex_count
            || self.colors.len() != other.colors.len()
            || self.tangents.len() != other.tangents.len()
        {
            return Err(SmoothNormalError::ChannelLengthMismatch {
                expected: self.vertex_count,
                actual: other.vertex_count,
            });
        }
        let mut diff = ChannelDiff::default();
        let mut compare = |a: &[Vec4], b: &[Vec4]| -> usize {
            let mut changed = 0;
            for (x, y) in a.iter().zip(b) {
                if x.to_array().map(f32::to_bits) != y.to_array().map(f32::to_bits) {
                    changed += 1;
                }
                diff.max_delta = diff.max_delta.max((*x - *y).abs().max_element());
            }
            changed
        };
        let changed_colors = compare(&self.colors, &other.colors);
        let changed_tangents = compare(&self.tangents, &other.tangents);
        diff.changed_colors = changed_colors;
        diff.changed_tangents = changed_tangents;
        Ok(diff)
    }
}
