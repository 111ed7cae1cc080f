//! Engine strategy trait — the seam between the bake pipeline and the
//! smooth-normal algorithms.
//!
//! Every engine implements this trait, so the pipeline can swap between
//! the sequential and parallel implementations at runtime and fall back
//! from one to the other.

use smoothnormal_gpu::{CpuFallback, GpuBackend, ThreadPoolBackend};
use smoothnormal_math::{NormalRange, Vec3};
use smoothnormal_mesh::{Mesh, PositionAdjacency};
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

use crate::config::{BackendKind, EngineConfig, EngineKind};
use crate::cpu::CpuEngine;
use crate::gpu::GpuEngine;

/// Trait for smooth-normal engines.
///
/// ```text
/// let normals = engine.compute(&mesh, NormalRange::Color)?;
/// assert_eq!(normals.len(), mesh.vertex_count());
/// ```
///
/// Engines are pure with respect to the mesh: they read it and return
/// one tangent-space normal per vertex, expressed in `range`.
///
/// # Implementations
///
/// - [`CpuEngine`] — single-threaded reference
/// - [`GpuEngine`] — two-stage dispatch through a [`GpuBackend`]
pub trait SmoothNormalEngine: Send + Sync {
    /// Returns the engine's name.
    fn name(&self) -> &str;

    /// Returns which kind of engine this is.
    fn kind(&self) -> EngineKind;

    /// Computes smooth normals using a prebuilt adjacency.
    ///
    /// `adjacency` must have been built from `mesh`.
    fn compute_with_adjacency(
        &self,
        mesh: &Mesh,
        adjacency: &PositionAdjacency,
        range: NormalRange,
    ) -> SmoothNormalResult<Vec<Vec3>>;

    /// Validates `mesh`, builds its adjacency and computes smooth normals.
    fn compute(&self, mesh: &Mesh, range: NormalRange) -> SmoothNormalResult<Vec<Vec3>> {
        mesh.validate()?;
        let adjacency = PositionAdjacency::build(mesh);
        self.compute_with_adjacency(mesh, &adjacency, range)
    }
}

/// Checks that `adjacency` belongs to `mesh`.
pub(crate) fn check_adjacency(mesh: &Mesh, adjacency: &PositionAdjacency) -> SmoothNormalResult<()> {
    if adjacency.vertex_count() != mesh.vertex_count()
        || adjacency.corners().len() != mesh.indices.len()
    {
        return Err(SmoothNormalError::InvalidMesh(format!(
            "'{}': adjacency built for {} vertices / {} corners, mesh has {} / {}",
            mesh.name,
            adjacency.vertex_count(),
            adjacency.corners().len(),
            mesh.vertex_count(),
            mesh.indices.len()
        )));
    }
    Ok(())
}

/// Builds the engine described by `config`.
pub fn create_engine(config: &EngineConfig) -> SmoothNormalResult<Box<dyn SmoothNormalEngine>> {
    match config.kind {
        EngineKind::Cpu => Ok(Box::new(CpuEngine::new())),
        EngineKind::Gpu => {
            let backend: Box<dyn GpuBackend> = match (config.backend, config.max_buffer_bytes) {
                (BackendKind::Sequential, Some(limit)) => Box::new(CpuFallback::with_memory_limit(limit)),
                (BackendKind::Sequential, None) => Box::new(CpuFallback::new()),
                (BackendKind::ThreadPool, limit) => {
                    let mut backend = ThreadPoolBackend::new();
                    if let Some(threads) = config.threads {
                        backend = backend.with_threads(threads);
                    }
                    if let Some(limit) = limit {
                        backend = backend.with_memory_limit(limit);
                    }
                    Box::new(backend)
                }
            };
            Ok(Box::new(GpuEngine::new(backend)?))
        }
    }
}
