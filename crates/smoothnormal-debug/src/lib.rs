//! # smoothnormal-debug
//!
//! Tools for checking a bake after the fact:
//! - [`normal_lines`] decodes each vertex's normal (original or baked)
//!   back to world space as a line segment
//! - [`ChannelSnapshot`] captures a mesh's writable channels as JSON for
//!   diffing two runs

pub mod lines;
pub mod snapshot;

pub use lines::{decode_baked_normals, normal_lines, NormalLine, NormalSource};
pub use snapshot::{ChannelDiff, ChannelSnapshot};
