//! # smoothnormal-io
//!
//! Output contract of the bake: which vertex channels a smooth normal is
//! written into, and how.
//!
//! Defines the boundary types the pipeline uses to hand computed normals
//! back to the mesh: [`OutputEncoding`], [`ChannelState`] and the
//! [`pack`] function that merges new normals into existing channels.

pub mod contract;
pub mod packer;
pub mod validator;

pub use contract::{ChannelState, OutputEncoding};
pub use packer::{apply_to_mesh, pack};
