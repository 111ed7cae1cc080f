//! Error types for the smoothnormal workspace.
//!
//! All crates return `SmoothNormalResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for smooth-normal baking.
#[derive(Debug, Error)]
pub enum SmoothNormalError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A per-vertex array handed to the packer has the wrong length.
    #[error("Channel length mismatch: expected {expected} values, got {actual}")]
    ChannelLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Compute backend error (not initialized, dispatch failure).
    #[error("GPU error: {0}")]
    Gpu(String),

    /// A device buffer could not be allocated.
    #[error("Buffer allocation failed for '{label}': {requested} bytes requested, {available} bytes available")]
    BufferAllocation {
        label: String,
        requested: usize,
        available: usize,
    },
}

impl SmoothNormalError {
    /// Returns true for failures of the compute device rather than the input.
    ///
    /// Callers use this to decide whether retrying on the CPU engine makes sense.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::Gpu(_) | Self::BufferAllocation { .. })
    }
}

/// Convenience alias for `Result<T, SmoothNormalError>`.
pub type SmoothNormalResult<T> = Result<T, SmoothNormalError>;
