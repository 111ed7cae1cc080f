//! # smoothnormal-engine
//!
//! Smooth-normal computation: angle-weighted averaging of face normals
//! over every vertex sharing a position, rotated into each vertex's
//! tangent space.
//!
//! Two engines implement the same [`SmoothNormalEngine`] contract and
//! produce identical bits for the same mesh:
//! - [`CpuEngine`] — single pass over the triangle list, accumulating per position
//! - [`GpuEngine`] — per-triangle kernel, then per-vertex gather kernel,
//!   dispatched through a [`smoothnormal_gpu::GpuBackend`]

pub mod config;
pub mod cpu;
pub mod gpu;
pub mod kernels;
pub mod strategy;

pub use config::{EngineConfig, EngineKind};
pub use cpu::{compute_smooth_normals_cpu, CpuEngine};
pub use gpu::{compute_smooth_normals_gpu, GpuEngine};
pub use strategy::{create_engine, SmoothNormalEngine};
