//! # smoothnormal-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the smoothnormal baking workspace.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other smoothnormal crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{SmoothNormalError, SmoothNormalResult};
pub use ids::{PositionId, TriangleId, VertexId};
