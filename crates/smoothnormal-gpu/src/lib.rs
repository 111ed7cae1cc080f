//! # smoothnormal-gpu
//!
//! Compute abstraction layer for the parallel smooth-normal engine.
//!
//! Provides a [`GpuBackend`] trait with two implementations:
//! - [`CpuFallback`] — Sequential reference implementation (always available)
//! - [`ThreadPoolBackend`] — Workgroups dispatched across a rayon thread pool
//!
//! Work is expressed as [`Kernel`]s: one invocation per output element,
//! each writing only its own slot of the output [`ComputeBuffer`]. Buffers
//! are allocated from the backend's [`MemoryPool`] and released when dropped,
//! so every early return frees device memory.

pub mod backend;
pub mod buffers;

pub use backend::{div_round_up, CpuFallback, GpuBackend, Kernel, ThreadPoolBackend};
pub use buffers::{ComputeBuffer, MemoryPool, MemoryStats};
