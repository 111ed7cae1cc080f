//! # smoothnormal-mesh
//!
//! Mesh representation consumed and mutated by the smooth-normal bakers.
//!
//! ## Key Types
//!
//! - [`Mesh`] — Positions, normals, tangents, optional colors and the
//!   flat triangle index list.
//! - [`PositionKey`] — Exact-equality key for a vertex position.
//! - [`PositionAdjacency`] — Position groups and their incident triangle
//!   corners, built once per mesh and shared by both engines.
//! - [`FaceGeometry`] — Per-triangle face normal and corner angle weights.
//! - Procedural generators for tests and benchmarks (quads, cubes, spheres).

pub mod adjacency;
pub mod face;
pub mod generators;
pub mod mesh;
pub mod position;

pub use adjacency::{Corner, PositionAdjacency};
pub use face::FaceGeometry;
pub use mesh::Mesh;
pub use position::PositionKey;
