//! Batch report.

use std::fmt;

use serde::{Deserialize, Serialize};
use smoothnormal_engine::EngineKind;
use smoothnormal_io::OutputEncoding;

/// What happened to one mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshOutcome {
    /// Smooth normals were written.
    Baked {
        /// Engine that produced them.
        engine: EngineKind,
        /// Channels they were written to.
        encoding: OutputEncoding,
    },
    /// The model did not match the configured filter; the mesh is untouched.
    Skipped,
    /// Baking failed; the mesh is untouched.
    Failed(String),
}

/// Outcome for one mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshReport {
    /// Mesh name.
    pub mesh: String,
    /// Vertex count.
    pub vertices: usize,
    /// Outcome.
    pub outcome: MeshOutcome,
    /// Compute and write-back time (milliseconds). Zero for skipped meshes.
    pub elapsed_ms: f64,
}

/// Outcome of a whole import batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BakeReport {
    /// Asset path of the model.
    pub asset_path: String,
    /// Root object name.
    pub root: String,
    /// One entry per distinct mesh, in discovery order.
    pub meshes: Vec<MeshReport>,
    /// Wall-clock time for the batch (seconds).
    pub wall_time: f64,
}

impl BakeReport {
    /// Meshes whose channels were written.
    pub fn baked(&self) -> usize {
        self.count(|o| matches!(o, MeshOutcome::Baked { .. }))
    }

    /// Meshes left untouched because the model did not match.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, MeshOutcome::Skipped))
    }

    /// Meshes that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, MeshOutcome::Failed(_)))
    }

    /// Returns true if no mesh failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&MeshOutcome) -> bool) -> usize {
        self.meshes.iter().filter(|m| pred(&m.outcome)).count()
    }
}

impl fmt::Display for BakeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}): {} baked, {} skipped, {} failed in {:.3}s",
            self.root,
            self.asset_path,
            self.baked(),
            self.skipped(),
            self.failed(),
            self.wall_time
        )?;
        for m in &self.meshes {
            match &m.outcome {
                MeshOutcome::Baked { engine, encoding } => writeln!(
                    f,
                    "  {:<24} {:>8} verts  {} -> {}  {:.3}ms",
                    m.mesh,
                    m.vertices,
                    engine.name(),
                    encoding,
                    m.elapsed_ms
                )?,
                MeshOutcome::Skipped => writeln!(f, "  {:<24} {:>8} verts  skipped", m.mesh, m.vertices)?,
                MeshOutcome::Failed(e) => writeln!(f, "  {:<24} {:>8} verts  FAILED: {e}", m.mesh, m.vertices)?,
            }
        }
        Ok(())
    }
}
