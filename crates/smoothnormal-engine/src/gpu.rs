//! Two-stage parallel smooth-normal engine.
//!
//! Uploads the mesh into compute buffers, dispatches the per-triangle
//! kernel, then the per-vertex kernel, and reads the result back. The
//! calling thread blocks until read-back completes.
//!
//! All buffers are locals of one [`GpuEngine::compute_with_adjacency`]
//! call: the triangle records survive from stage A into stage B and
//! every buffer is released when the call returns, on success or error.

use std::time::Instant;

use smoothnormal_gpu::{GpuBackend, ThreadPoolBackend};
use smoothnormal_math::{NormalRange, Vec3};
use smoothnormal_mesh::{Mesh, PositionAdjacency};
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

use crate::config::EngineKind;
use crate::kernels::{pack_positions, TriangleKernel, VertexKernel, TRIANGLE_RECORD_STRIDE, VEC4_STRIDE};
use crate::strategy::{check_adjacency, SmoothNormalEngine};

/// Parallel engine dispatching through a [`GpuBackend`].
pub struct GpuEngine {
    backend: Box<dyn GpuBackend>,
}

impl GpuEngine {
    /// Initializes `backend` and wraps it.
    pub fn new(mut backend: Box<dyn GpuBackend>) -> SmoothNormalResult<Self> {
        backend.init()?;
        Ok(Self { backend })
    }

    /// Returns the backend.
    pub fn backend(&self) -> &dyn GpuBackend {
        self.backend.as_ref()
    }
}

impl SmoothNormalEngine for GpuEngine {
    fn name(&self) -> &str {
        "gpu"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Gpu
    }

    fn compute_with_adjacency(
        &self,
        mesh: &Mesh,
        adjacency: &PositionAdjacency,
        range: NormalRange,
    ) -> SmoothNormalResult<Vec<Vec3>> {
        check_adjacency(mesh, adjacency)?;
        if u32::try_from(mesh.indices.len()).is_err() {
            return Err(SmoothNormalError::InvalidMesh(format!(
                "'{}': {} indices exceed the 32-bit buffer range",
                mesh.name,
                mesh.indices.len()
            )));
        }

        let vertex_count = mesh.vertex_count();
        if vertex_count == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let backend = self.backend.as_ref();

        // Upload
        let positions = pack_positions(&mesh.positions);
        let normals: Vec<f32> = mesh
            .normals
            .iter()
            .flat_map(|n| [n.x, n.y, n.z, 0.0])
            .collect();
        let tangents: Vec<f32> = mesh.tangents.iter().flat_map(|t| t.to_array()).collect();
        let vertex_positions: Vec<u32> = adjacency.vertex_positions().iter().map(|p| p.0).collect();
        let corners: Vec<u32> = adjacency.corners().iter().map(|c| c.flat_index()).collect();

        let positions_buf = backend.upload_f32("vert_positions", &positions, VEC4_STRIDE)?;
        let normals_buf = backend.upload_f32("vert_normals", &normals, VEC4_STRIDE)?;
        let tangents_buf = backend.upload_f32("vert_tangents", &tangents, VEC4_STRIDE)?;
        let triangles_buf = backend.upload_u32("triangles", &mesh.indices, 1)?;
        let vertex_positions_buf = backend.upload_u32("vertex_positions", &vertex_positions, 1)?;
        let offsets_buf = backend.upload_u32("position_offsets", adjacency.offsets(), 1)?;
        let corners_buf = backend.upload_u32("incident_corners", &corners, 1)?;

        // Stage A: per triangle
        let mut triangle_data =
            backend.create_buffer("triangle_data", mesh.triangle_count(), TRIANGLE_RECORD_STRIDE)?;
        backend.dispatch(
            &TriangleKernel {
                positions: positions_buf.as_slice(),
                triangles: triangles_buf.as_slice(),
            },
            &mut triangle_data,
        )?;

        // Stage B: per vertex
        let mut smooth_normals = backend.create_buffer("smooth_normals", vertex_count, VEC4_STRIDE)?;
        backend.dispatch(
            &VertexKernel {
                normals: normals_buf.as_slice(),
                tangents: tangents_buf.as_slice(),
                triangle_data: triangle_data.as_slice(),
                vertex_positions: vertex_positions_buf.as_slice(),
                position_offsets: offsets_buf.as_slice(),
                incident_corners: corners_buf.as_slice(),
                range,
            },
            &mut smooth_normals,
        )?;

        let words = backend.read_back(&smooth_normals)?;
        let peak_bytes = backend.memory_stats().peak_bytes;
        let result: Vec<Vec3> = words
            .chunks_exact(VEC4_STRIDE)
            .map(|w| Vec3::new(w[0], w[1], w[2]))
            .collect();

        tracing::debug!(
            mesh = %mesh.name,
            backend = backend.name(),
            vertices = vertex_count,
            triangles = mesh.triangle_count(),
            peak_bytes,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "gpu smooth normals computed"
        );
        Ok(result)
    }
}

/// Computes color-range (`[0, 1]`) tangent-space smooth normals with the
/// parallel engine on a default thread-pool backend.
pub fn compute_smooth_normals_gpu(mesh: &Mesh) -> SmoothNormalResult<Vec<Vec3>> {
    GpuEngine::new(Box::new(ThreadPoolBackend::new()))?.compute(mesh, NormalRange::Color)
}
