//! Import-batch post-processing.
//!
//! For each imported model: match it against the config, collect its
//! distinct meshes, compute smooth normals with the preferred engine
//! (retrying on the CPU engine after a device error when allowed) and
//! pack them into the configured channels. Meshes are processed one at
//! a time; a failure affects only the mesh it happened on, and a mesh is
//! written either completely or not at all.

use std::sync::PoisonError;
use std::time::Instant;

use smoothnormal_engine::{create_engine, CpuEngine, EngineKind, SmoothNormalEngine};
use smoothnormal_io::validator::{validate_mesh, validate_normals};
use smoothnormal_io::{apply_to_mesh, pack, ChannelState};
use smoothnormal_math::Vec3;
use smoothnormal_mesh::{Mesh, PositionAdjacency};
use smoothnormal_telemetry::{BakeEvent, EventBus, EventKind};
use smoothnormal_types::SmoothNormalResult;

use crate::config::BakeConfig;
use crate::report::{BakeReport, MeshOutcome, MeshReport};
use crate::scene::{MeshHandle, SceneNode};

/// Bakes smooth normals into imported models.
///
/// Owns its engines, so one `Baker` can process many batches without
/// rebuilding the compute backend.
pub struct Baker {
    config: BakeConfig,
    engine: Box<dyn SmoothNormalEngine>,
    fallback: Option<CpuEngine>,
    batches: u32,
}

impl Baker {
    /// Validates `config` and builds its preferred engine.
    ///
    /// If the parallel engine cannot be created and `fallback_to_cpu` is
    /// set, the baker runs on the CPU engine alone.
    pub fn new(config: BakeConfig) -> SmoothNormalResult<Self> {
        config.validate()?;
        let engine = match create_engine(&config.engine_config()) {
            Ok(engine) => engine,
            Err(e) if config.fallback_to_cpu && e.is_device_error() => {
                tracing::warn!(error = %e, "parallel engine unavailable, using cpu engine");
                Box::new(CpuEngine::new())
            }
            Err(e) => return Err(e),
        };
        Self::with_engine(config, engine)
    }

    /// Uses `engine` as the preferred engine instead of building one from `config`.
    pub fn with_engine(config: BakeConfig, engine: Box<dyn SmoothNormalEngine>) -> SmoothNormalResult<Self> {
        config.validate()?;
        let fallback = (config.fallback_to_cpu && engine.kind() != EngineKind::Cpu).then(CpuEngine::new);
        Ok(Self {
            config,
            engine,
            fallback,
            batches: 0,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    /// Returns the preferred engine.
    pub fn engine(&self) -> &dyn SmoothNormalEngine {
        self.engine.as_ref()
    }

    /// Processes one imported model.
    ///
    /// Never fails as a whole: per-mesh failures are recorded in the report
    /// and leave that mesh untouched. Events are flushed to `bus` before
    /// returning.
    ///
    /// Running the same model through twice leaves color targets
    /// byte-identical. Tangent targets are not: the bake overwrites the
    /// tangents that define each vertex's frame, so a second pass over the
    /// same meshes rotates into the already-written frame. Re-bake tangent
    /// targets from freshly imported meshes.
    pub fn process(&mut self, asset_path: &str, root: &SceneNode, bus: &mut EventBus) -> BakeReport {
        let batch = self.batches;
        self.batches = self.batches.wrapping_add(1);
        let start = Instant::now();

        let meshes = root.collect_meshes();
        bus.emit(BakeEvent::new(
            batch,
            EventKind::BatchBegin {
                asset_path: asset_path.to_string(),
                mesh_count: meshes.len(),
            },
        ));

        let matched = self.config.matches(&root.name, asset_path);
        if !matched {
            tracing::debug!(
                root = %root.name,
                asset_path,
                matching = ?self.config.matching,
                "model does not match, skipping"
            );
        }

        let mut report = BakeReport {
            asset_path: asset_path.to_string(),
            root: root.name.clone(),
            meshes: Vec::with_capacity(meshes.len()),
            wall_time: 0.0,
        };
        for handle in &meshes {
            let entry = if matched {
                self.bake_handle(batch, handle, bus)
            } else {
                skip_handle(batch, handle, bus)
            };
            report.meshes.push(entry);
        }
        report.wall_time = start.elapsed().as_secs_f64();

        bus.emit(BakeEvent::new(
            batch,
            EventKind::BatchEnd {
                baked: report.baked(),
                skipped: report.skipped(),
                failed: report.failed(),
                wall_time: report.wall_time,
            },
        ));
        bus.flush();

        if matched {
            tracing::info!(
                root = %root.name,
                meshes = report.meshes.len(),
                baked = report.baked(),
                failed = report.failed(),
                elapsed_s = report.wall_time,
                "generated smooth normals"
            );
        }
        report
    }

    fn bake_handle(&self, batch: u32, handle: &MeshHandle, bus: &EventBus) -> MeshReport {
        let start = Instant::now();
        let mut mesh = handle.lock().unwrap_or_else(PoisonError::into_inner);
        let name = mesh.name.clone();
        let vertices = mesh.vertex_count();

        let outcome = match self.bake_mesh(batch, &mut mesh, bus) {
            Ok(engine) => MeshOutcome::Baked {
                engine,
                encoding: self.config.write_target,
            },
            Err(e) => {
                tracing::warn!(mesh = %name, error = %e, "smooth normal bake failed, mesh left untouched");
                bus.emit(BakeEvent::new(
                    batch,
                    EventKind::MeshFailed {
                        mesh: name.clone(),
                        error: e.to_string(),
                    },
                ));
                MeshOutcome::Failed(e.to_string())
            }
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if let MeshOutcome::Baked { engine, encoding } = &outcome {
            tracing::debug!(mesh = %name, vertices, engine = engine.name(), %encoding, elapsed_ms, "mesh baked");
            bus.emit(BakeEvent::new(
                batch,
                EventKind::MeshBaked {
                    mesh: name.clone(),
                    engine: engine.name().to_string(),
                    encoding: encoding.to_string(),
                    vertices,
                    elapsed_ms,
                },
            ));
        }

        MeshReport {
            mesh: name,
            vertices,
            outcome,
            elapsed_ms,
        }
    }

    /// Computes and writes one mesh. Returns the engine that produced the normals.
    fn bake_mesh(&self, batch: u32, mesh: &mut Mesh, bus: &EventBus) -> SmoothNormalResult<EngineKind> {
        validate_mesh(mesh)?;
        let adjacency = PositionAdjacency::build(mesh);
        let (normals, engine) = self.compute(batch, mesh, &adjacency, bus)?;
        validate_normals(mesh, &normals)?;

        let packed = pack(&ChannelState::from_mesh(mesh), &normals, self.config.write_target)?;
        apply_to_mesh(mesh, packed)?;
        Ok(engine)
    }

    fn compute(
        &self,
        batch: u32,
        mesh: &Mesh,
        adjacency: &PositionAdjacency,
        bus: &EventBus,
    ) -> SmoothNormalResult<(Vec<Vec3>, EngineKind)> {
        let range = self.config.write_target.normal_range();
        match self.engine.compute_with_adjacency(mesh, adjacency, range) {
            Ok(normals) => Ok((normals, self.engine.kind())),
            Err(e) => match &self.fallback {
                Some(cpu) if e.is_device_error() => {
                    tracing::warn!(
                        mesh = %mesh.name,
                        error = %e,
                        "{} engine failed, retrying on cpu",
                        self.engine.name()
                    );
                    bus.emit(BakeEvent::new(
                        batch,
                        EventKind::EngineFallback {
                            mesh: mesh.name.clone(),
                            from: self.engine.name().to_string(),
                            to: cpu.name().to_string(),
                            reason: e.to_string(),
                        },
                    ));
                    let normals = cpu.compute_with_adjacency(mesh, adjacency, range)?;
                    Ok((normals, cpu.kind()))
                }
                _ => Err(e),
            },
        }
    }
}

fn skip_handle(batch: u32, handle: &MeshHandle, bus: &EventBus) -> MeshReport {
    let mesh = handle.lock().unwrap_or_else(PoisonError::into_inner);
    bus.emit(BakeEvent::new(
        batch,
        EventKind::MeshSkipped {
            mesh: mesh.name.clone(),
        },
    ));
    MeshReport {
        mesh: mesh.name.clone(),
        vertices: mesh.vertex_count(),
        outcome: MeshOutcome::Skipped,
        elapsed_ms: 0.0,
    }
}

/// Processes one imported model with a one-off [`Baker`].
///
/// Fails only if `config` is invalid or no engine can be built.
pub fn process(
    asset_path: &str,
    root: &SceneNode,
    config: &BakeConfig,
    bus: &mut EventBus,
) -> SmoothNormalResult<BakeReport> {
    let mut baker = Baker::new(config.clone())?;
    Ok(baker.process(asset_path, root, bus))
}

