//! Position-keyed adjacency.
//!
//! Groups vertices by exact position and records, for each group, every
//! triangle corner that touches it. Built once per mesh from the index
//! buffer and used by:
//! - the sequential engine, to accumulate into one slot per position
//! - the parallel engine's per-vertex gather, instead of scanning every
//!   triangle for each vertex
//!
//! Corners are stored in triangle order (and corner order within a
//! triangle), so summing a group's contributions front to back adds
//! them in exactly the order a single pass over the triangle list does.
//! Both engines therefore produce bit-identical sums.

use std::collections::HashMap;

use smoothnormal_types::{PositionId, TriangleId, VertexId};

use crate::mesh::Mesh;
use crate::position::PositionKey;

/// One corner of one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    /// Triangle the corner belongs to.
    pub triangle: TriangleId,
    /// Corner slot within the triangle (0, 1 or 2).
    pub slot: u8,
}

impl Corner {
    /// Position of this corner in the flat index buffer (`3 * triangle + slot`).
    #[inline]
    pub fn flat_index(self) -> u32 {
        self.triangle.0 * 3 + u32::from(self.slot)
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    #[inline]
    pub fn from_flat_index(index: u32) -> Self {
        Self {
            triangle: TriangleId(index / 3),
            slot: (index % 3) as u8,
        }
    }
}

/// Precomputed position groups and their incident corners.
///
/// Incident corners are stored in compressed-row form: the corners of
/// group `g` are `corners[offsets[g]..offsets[g + 1]]`.
#[derive(Debug, Clone)]
pub struct PositionAdjacency {
    /// Position group of each vertex.
    vertex_positions: Vec<PositionId>,
    /// Row offsets into `corners`, one more than the group count.
    offsets: Vec<u32>,
    /// Incident corners of all groups, grouped by position.
    corners: Vec<Corner>,
}

impl PositionAdjacency {
    /// Build adjacency from a mesh.
    ///
    /// The mesh must have passed [`Mesh::validate`]; indices are not
    /// re-checked here.
    pub fn build(mesh: &Mesh) -> Self {
        let vertex_count = mesh.vertex_count();

        // Assign position groups in first-seen vertex order
        let mut groups: HashMap<PositionKey, PositionId> = HashMap::with_capacity(vertex_count);
        let mut vertex_positions = Vec::with_capacity(vertex_count);
        for &p in &mesh.positions {
            let next = PositionId(groups.len() as u32);
            let id = *groups.entry(PositionKey::new(p)).or_insert(next);
            vertex_positions.push(id);
        }
        let group_count = groups.len();

        // Count corners per group
        let mut offsets = vec![0u32; group_count + 1];
        for &idx in &mesh.indices {
            let g = vertex_positions[idx as usize].index();
            offsets[g + 1] += 1;
        }
        for g in 0..group_count {
            offsets[g + 1] += offsets[g];
        }

        // Fill in triangle order so each row stays sorted by (triangle, slot)
        let mut cursor: Vec<u32> = offsets[..group_count].to_vec();
        let mut corners = vec![
            Corner {
                triangle: TriangleId(0),
                slot: 0,
            };
            mesh.indices.len()
        ];
        for t in 0..mesh.triangle_count() {
            for (slot, &idx) in mesh.triangle(t).iter().enumerate() {
                let g = vertex_positions[idx as usize].index();
                corners[cursor[g] as usize] = Corner {
                    triangle: TriangleId(t as u32),
                    slot: slot as u8,
                };
                cursor[g] += 1;
            }
        }

        Self {
            vertex_positions,
            offsets,
            corners,
        }
    }

    /// Returns the number of vertices the adjacency was built for.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_positions.len()
    }

    /// Returns the number of distinct positions.
    #[inline]
    pub fn position_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the position group of vertex `v`.
    #[inline]
    pub fn position_of(&self, v: VertexId) -> PositionId {
        self.vertex_positions[v.index()]
    }

    /// Returns the position group of every vertex, in vertex order.
    #[inline]
    pub fn vertex_positions(&self) -> &[PositionId] {
        &self.vertex_positions
    }

    /// Returns the row offsets: group `g` owns `corners()[offsets[g]..offsets[g + 1]]`.
    #[inline]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Returns the incident corners of all groups, grouped by position.
    #[inline]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Returns the triangle corners touching position group `p`.
    #[inline]
    pub fn incident(&self, p: PositionId) -> &[Corner] {
        let start = self.offsets[p.index()] as usize;
        let end = self.offsets[p.index() + 1] as usize;
        &self.corners[start..end]
    }

    /// Returns the triangle corners touching vertex `v`'s position.
    #[inline]
    pub fn incident_to_vertex(&self, v: VertexId) -> &[Corner] {
        self.incident(self.position_of(v))
    }

    /// Returns the vertices that share a position with some other vertex.
    ///
    /// These are the seam/hard-edge duplicates the smoothing merges.
    pub fn shared_vertices(&self) -> Vec<VertexId> {
        let mut counts = vec![0u32; self.position_count()];
        for p in &self.vertex_positions {
            counts[p.index()] += 1;
        }
        self.vertex_positions
            .iter()
            .enumerate()
            .filter(|(_, p)| counts[p.index()] > 1)
            .map(|(v, _)| VertexId(v as u32))
            .collect()
    }
}
