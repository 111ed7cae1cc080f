//! Bake input validation.
//!
//! Validates a mesh and its computed normals before anything is written
//! back, catching data-level errors early with clear diagnostics.

use smoothnormal_math::{vector, Vec3};
use smoothnormal_mesh::Mesh;
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

/// Validates a mesh before baking.
///
/// Checks:
/// - Attribute array lengths and index range ([`Mesh::validate`])
/// - Positions, normals and tangents are finite
pub fn validate_mesh(mesh: &Mesh) -> SmoothNormalResult<()> {
    mesh.validate()
        .map_err(|e| SmoothNormalError::InvalidMesh(format!("'{}': {e}", mesh.name)))?;

    let non_finite = |what: &str, index: usize| {
        SmoothNormalError::InvalidMesh(format!("'{}': {what} {index} is not finite", mesh.name))
    };
    if let Some(i) = mesh.positions.iter().position(|p| !vector::is_finite(*p)) {
        return Err(non_finite("position", i));
    }
    if let Some(i) = mesh.normals.iter().position(|n| !vector::is_finite(*n)) {
        return Err(non_finite("normal", i));
    }
    if let Some(i) = mesh.tangents.iter().position(|t| !t.is_finite()) {
        return Err(non_finite("tangent", i));
    }
    Ok(())
}

/// Validates engine output against the mesh it was computed for.
pub fn validate_normals(mesh: &Mesh, normals: &[Vec3]) -> SmoothNormalResult<()> {
    if normals.len() != mesh.vertex_count() {
        return Err(SmoothNormalError::ChannelLengthMismatch {
            expected: mesh.vertex_count(),
            actual: normals.len(),
        });
    }
    if let Some(i) = normals.iter().position(|n| !vector::is_finite(*n)) {
        return Err(SmoothNormalError::InvalidMesh(format!(
            "'{}': smooth normal {i} is not finite",
            mesh.name
        )));
    }
    Ok(())
}
