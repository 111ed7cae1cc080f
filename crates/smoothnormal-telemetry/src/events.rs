//! Bake event types.
//!
//! Structured events emitted by the bake pipeline as it works through an
//! import batch. Events are lightweight value types that carry just
//! enough data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A bake event emitted by the pipeline.
///
/// Events are tagged with the sequence number of the batch they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeEvent {
    /// Batch number (0-indexed, per bus).
    pub batch: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A batch started.
    BatchBegin {
        /// Asset path of the imported model.
        asset_path: String,
        /// Distinct meshes reachable from the root.
        mesh_count: usize,
    },

    /// Smooth normals were computed and written to a mesh.
    MeshBaked {
        /// Mesh name.
        mesh: String,
        /// Engine that produced the result.
        engine: String,
        /// Output encoding written.
        encoding: String,
        /// Vertex count.
        vertices: usize,
        /// Wall-clock time for compute and write-back (milliseconds).
        elapsed_ms: f64,
    },

    /// A mesh did not match the configured filter.
    MeshSkipped {
        /// Mesh name.
        mesh: String,
    },

    /// A mesh failed; its channels were left untouched.
    MeshFailed {
        /// Mesh name.
        mesh: String,
        /// Error description.
        error: String,
    },

    /// The preferred engine failed on a device error and another engine was used.
    EngineFallback {
        /// Mesh name.
        mesh: String,
        /// Engine that failed.
        from: String,
        /// Engine used instead.
        to: String,
        /// Device error description.
        reason: String,
    },

    /// A batch completed.
    BatchEnd {
        /// Meshes written.
        baked: usize,
        /// Meshes filtered out.
        skipped: usize,
        /// Meshes that failed.
        failed: usize,
        /// Wall-clock time for the whole batch (seconds).
        wall_time: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl BakeEvent {
    /// Creates a new event for the given batch.
    pub fn new(batch: u32, kind: EventKind) -> Self {
        Self { batch, kind }
    }
}
