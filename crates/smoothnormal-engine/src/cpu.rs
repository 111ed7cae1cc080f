//! Sequential smooth-normal engine.
//!
//! One pass over the triangle list accumulates `face_normal × corner_angle`
//! into one slot per distinct position; each vertex then takes the
//! normalized sum of its position and rotates it into its own tangent
//! frame. Vertices duplicated for UV seams or hard edges therefore share
//! one object-space smooth normal.

use std::time::Instant;

use smoothnormal_math::vector::normalized;
use smoothnormal_math::{NormalRange, TangentFrame, Vec3};
use smoothnormal_mesh::{FaceGeometry, Mesh, PositionAdjacency};
use smoothnormal_types::{SmoothNormalResult, VertexId};

use crate::config::EngineKind;
use crate::strategy::{check_adjacency, SmoothNormalEngine};

/// Single-threaded reference engine.
///
/// Allocates its accumulation buffer per call and keeps no state, so one
/// instance may serve several threads working on different meshes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuEngine;

impl CpuEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

impl SmoothNormalEngine for CpuEngine {
    fn name(&self) -> &str {
        "cpu"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Cpu
    }

    fn compute_with_adjacency(
        &self,
        mesh: &Mesh,
        adjacency: &PositionAdjacency,
        range: NormalRange,
    ) -> SmoothNormalResult<Vec<Vec3>> {
        check_adjacency(mesh, adjacency)?;
        let start = Instant::now();

        let object = object_space_smooth_normals(mesh, adjacency);
        let result = to_tangent_space(mesh, &object, range);

        tracing::debug!(
            mesh = %mesh.name,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            positions = adjacency.position_count(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "cpu smooth normals computed"
        );
        Ok(result)
    }
}

/// Sums `face_normal × corner_angle` per position group, in triangle order.
///
/// Groups touched only by degenerate triangles, or by none, stay zero.
pub fn accumulate_position_normals(mesh: &Mesh, adjacency: &PositionAdjacency) -> Vec<Vec3> {
    let mut accumulated = vec![Vec3::ZERO; adjacency.position_count()];

    for t in 0..mesh.triangle_count() {
        let [p0, p1, p2] = mesh.triangle_positions(t);
        let face = FaceGeometry::from_positions(p0, p1, p2);

        for (slot, &idx) in mesh.triangle(t).iter().enumerate() {
            let group = adjacency.position_of(VertexId(idx));
            accumulated[group.index()] += face.contribution(slot);
        }
    }

    accumulated
}

/// Object-space smooth normal of every vertex.
///
/// A vertex whose position accumulated nothing gets `(0, 0, 0)`.
pub fn object_space_smooth_normals(mesh: &Mesh, adjacency: &PositionAdjacency) -> Vec<Vec3> {
    let accumulated = accumulate_position_normals(mesh, adjacency);
    adjacency
        .vertex_positions()
        .iter()
        .map(|group| normalized(accumulated[group.index()]))
        .collect()
}

/// Rotates per-vertex object-space normals into each vertex's tangent
/// frame and expresses them in `range`.
pub fn to_tangent_space(mesh: &Mesh, object_normals: &[Vec3], range: NormalRange) -> Vec<Vec3> {
    object_normals
        .iter()
        .zip(mesh.normals.iter().zip(&mesh.tangents))
        .map(|(&n, (&normal, &tangent))| {
            let frame = TangentFrame::new(normal, tangent);
            range.encode(frame.to_tangent_space(n))
        })
        .collect()
}

/// Computes color-range (`[0, 1]`) tangent-space smooth normals on the CPU.
///
/// One entry per vertex. Fails only if the mesh is malformed.
pub fn compute_smooth_normals_cpu(mesh: &Mesh) -> SmoothNormalResult<Vec<Vec3>> {
    CpuEngine::new().compute(mesh, NormalRange::Color)
}
