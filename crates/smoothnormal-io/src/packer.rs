//! Channel packer.
//!
//! Merges per-vertex smooth normals into a mesh's existing color or
//! tangent channels according to an [`OutputEncoding`]. Components the
//! encoding does not write keep their prior values; colors created from
//! nothing default the unwritten components to 1.
//!
//! | encoding | written | kept |
//! |---|---|---|
//! | `VertexColorRgb` | r, g, b | a (1 if no prior colors) |
//! | `VertexColorRg` | r, g | b, a (1, 1 if no prior colors) |
//! | `TangentXyz` | x, y, z | w |
//! | `TangentXy` | x, y | z, w |

use smoothnormal_math::{Vec3, Vec4};
use smoothnormal_mesh::Mesh;
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

use crate::contract::{ChannelState, OutputEncoding};

/// Encodes `normals` into a copy of `existing`.
///
/// `normals` must hold one entry per vertex, already in the range
/// [`OutputEncoding::normal_range`] asks for. A length mismatch is a
/// contract violation and nothing is produced.
///
/// ```
/// use smoothnormal_io::{pack, ChannelState, OutputEncoding};
/// use smoothnormal_math::{Vec3, Vec4};
///
/// let existing = ChannelState { colors: None, tangents: vec![Vec4::X; 1] };
/// let packed = pack(&existing, &[Vec3::new(0.5, 0.5, 1.0)], OutputEncoding::VertexColorRgb).unwrap();
/// assert_eq!(packed.colors.unwrap()[0], Vec4::new(0.5, 0.5, 1.0, 1.0));
/// ```
pub fn pack(
    existing: &ChannelState,
    normals: &[Vec3],
    encoding: OutputEncoding,
) -> SmoothNormalResult<ChannelState> {
    let vertex_count = existing.vertex_count();
    if normals.len() != vertex_count {
        return Err(SmoothNormalError::ChannelLengthMismatch {
            expected: vertex_count,
            actual: normals.len(),
        });
    }
    if let Some(colors) = &existing.colors {
        if colors.len() != vertex_count {
            return Err(SmoothNormalError::ChannelLengthMismatch {
                expected: vertex_count,
                actual: colors.len(),
            });
        }
    }

    let mut packed = existing.clone();
    match encoding {
        OutputEncoding::VertexColorRgb => {
            packed.colors = Some(pack_colors(existing.colors.as_deref(), normals, |prior, n| {
                n.extend(prior.w)
            }));
        }
        OutputEncoding::VertexColorRg => {
            packed.colors = Some(pack_colors(existing.colors.as_deref(), normals, |prior, n| {
                Vec4::new(n.x, n.y, prior.z, prior.w)
            }));
        }
        OutputEncoding::TangentXyz => {
            for (t, n) in packed.tangents.iter_mut().zip(normals) {
                *t = n.extend(t.w);
            }
        }
        OutputEncoding::TangentXy => {
            for (t, n) in packed.tangents.iter_mut().zip(normals) {
                t.x = n.x;
                t.y = n.y;
            }
        }
    }
    Ok(packed)
}

/// Applies `prior × normal → color` per vertex; missing colors read as white.
fn pack_colors(prior: Option<&[Vec4]>, normals: &[Vec3], write: impl Fn(Vec4, Vec3) -> Vec4) -> Vec<Vec4> {
    match prior {
        Some(colors) => colors.iter().zip(normals).map(|(&c, &n)| write(c, n)).collect(),
        None => normals.iter().map(|&n| write(Vec4::ONE, n)).collect(),
    }
}

/// Replaces `mesh`'s color and tangent channels with `state`.
///
/// Fails without touching the mesh if `state` does not match the vertex count.
pub fn apply_to_mesh(mesh: &mut Mesh, state: ChannelState) -> SmoothNormalResult<()> {
    let vertex_count = mesh.vertex_count();
    let color_len = state.colors.as_ref().map_or(vertex_count, Vec::len);
    for actual in [state.tangents.len(), color_len] {
        if actual != vertex_count {
            return Err(SmoothNormalError::ChannelLengthMismatch {
                expected: vertex_count,
                actual,
            });
        }
    }
    mesh.tangents = state.tangents;
    mesh.colors = state.colors.unwrap_or_default();
    Ok(())
}
