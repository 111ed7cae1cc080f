//! # smoothnormal-pipeline
//!
//! Bakes smooth normals into the meshes of an imported model.
//!
//! Given the model's [`SceneNode`] graph and a [`BakeConfig`], the
//! [`Baker`] decides whether the model matches, computes smooth normals
//! for every distinct mesh under it and writes them into the configured
//! vertex channels, producing a [`BakeReport`].

pub mod config;
pub mod postprocess;
pub mod report;
pub mod scene;

pub use config::{BakeConfig, MatchingMethod};
pub use postprocess::{process, Baker};
pub use report::{BakeReport, MeshOutcome, MeshReport};
pub use scene::{mesh_handle, MeshHandle, SceneNode};
