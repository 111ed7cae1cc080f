//! Engine configuration.
//!
//! Selects which engine computes smooth normals and how the parallel
//! engine's compute backend is set up.

use serde::{Deserialize, Serialize};

/// Which smooth-normal engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Single pass over the triangle list on the calling thread.
    Cpu,
    /// Two-stage kernel dispatch through a compute backend.
    Gpu,
}

impl EngineKind {
    /// Returns the engine's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
        }
    }
}

/// Compute backend for the parallel engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Invocations run in order on the calling thread.
    Sequential,
    /// Workgroups run on a rayon thread pool.
    ThreadPool,
}

/// Configuration for engine construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine to run.
    pub kind: EngineKind,

    /// Backend used when `kind` is [`EngineKind::Gpu`].
    pub backend: BackendKind,

    /// Worker count for the thread-pool backend. `None` uses the global pool.
    pub threads: Option<usize>,

    /// Total device buffer budget in bytes. `None` means unlimited.
    pub max_buffer_bytes: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::Gpu,
            backend: BackendKind::ThreadPool,
            threads: None,
            max_buffer_bytes: None,
        }
    }
}

impl EngineConfig {
    /// Config for the sequential CPU engine.
    pub fn cpu() -> Self {
        Self {
            kind: EngineKind::Cpu,
            ..Default::default()
        }
    }

    /// Config for the parallel engine on the sequential reference backend.
    pub fn gpu_reference() -> Self {
        Self {
            kind: EngineKind::Gpu,
            backend: BackendKind::Sequential,
            ..Default::default()
        }
    }
}
