//! Normal-line inspection.
//!
//! Turns per-vertex normals into world-space line segments so a bake can
//! be checked visually or numerically. Baked normals are read back from
//! the vertex colors (`rgb * 2 - 1`) and rotated out of each vertex's
//! tangent frame into object space.

use serde::{Deserialize, Serialize};
use smoothnormal_math::encode::from_color_range;
use smoothnormal_math::{Mat4, TangentFrame, Vec3};
use smoothnormal_mesh::Mesh;
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

/// Where a vertex's displayed normal comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSource {
    /// The mesh's own vertex normal.
    VertexNormal,
    /// The smooth normal baked into the vertex color RGB.
    #[default]
    VertexColor,
}

/// One world-space normal line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalLine {
    /// World-space vertex position.
    pub start: Vec3,
    /// `start + normal * length`.
    pub end: Vec3,
}

impl NormalLine {
    /// Line direction (not normalized; scaled by the transform).
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }
}

/// Object-space normals decoded from baked vertex colors.
///
/// Fails if the mesh has no colors or is malformed.
pub fn decode_baked_normals(mesh: &Mesh) -> SmoothNormalResult<Vec<Vec3>> {
    mesh.validate()?;
    if !mesh.has_colors() {
        return Err(SmoothNormalError::InvalidMesh(format!(
            "'{}' has no vertex colors to decode",
            mesh.name
        )));
    }
    Ok(mesh
        .colors
        .iter()
        .zip(mesh.normals.iter().zip(&mesh.tangents))
        .map(|(color, (&normal, &tangent))| {
            let tangent_space = from_color_range(color.truncate());
            TangentFrame::new(normal, tangent).to_object_space(tangent_space)
        })
        .collect())
}

/// One line per vertex, from the transformed position along the
/// transformed normal, `length` long in object units.
pub fn normal_lines(
    mesh: &Mesh,
    source: NormalSource,
    transform: Mat4,
    length: f32,
) -> SmoothNormalResult<Vec<NormalLine>> {
    let normals = match source {
        NormalSource::VertexNormal => {
            mesh.validate()?;
            mesh.normals.clone()
        }
        NormalSource::VertexColor => decode_baked_normals(mesh)?,
    };
    Ok(mesh
        .positions
        .iter()
        .zip(&normals)
        .map(|(&p, &n)| {
            let start = transform.transform_point3(p);
            NormalLine {
                start,
                end: start + transform.transform_vector3(n) * length,
            }
        })
        .collect())
}
