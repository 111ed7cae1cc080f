//! # smoothnormal-math
//!
//! Linear algebra helpers for smooth-normal baking.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Vec4`, `Mat3`, etc.)
//! - Vector normalization and angle measurement with the exact
//!   zero-length conventions the baked data depends on
//! - Per-vertex tangent frames (TBN) for object ↔ tangent space rotation
//! - Remapping between signed unit range and `[0, 1]` color range

pub mod encode;
pub mod tbn;
pub mod vector;

// Re-export glam types as the canonical math types for smoothnormal.
pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

pub use encode::NormalRange;
pub use tbn::TangentFrame;
