//! Bake output contract types.
//!
//! These types define the write side of the bake: the channel layout a
//! smooth normal is encoded into and the vertex channels it lands in.
//! They are serializable for configuration files and reports.

use std::fmt;

use serde::{Deserialize, Serialize};
use smoothnormal_math::{NormalRange, Vec4};
use smoothnormal_mesh::Mesh;

/// Vertex channel layout a baked smooth normal is written into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    /// `color.rgb = n.xyz`; alpha kept.
    #[default]
    VertexColorRgb,
    /// `color.rg = n.xy`; blue and alpha kept.
    VertexColorRg,
    /// `tangent.xyz = n.xyz`; handedness kept.
    TangentXyz,
    /// `tangent.xy = n.xy`; z and handedness kept.
    TangentXy,
}

impl OutputEncoding {
    /// All encodings, in declaration order.
    pub const ALL: [OutputEncoding; 4] = [
        Self::VertexColorRgb,
        Self::VertexColorRg,
        Self::TangentXyz,
        Self::TangentXy,
    ];

    /// Returns true if the encoding writes vertex colors.
    pub fn writes_colors(self) -> bool {
        matches!(self, Self::VertexColorRgb | Self::VertexColorRg)
    }

    /// Returns true if the encoding writes tangents.
    pub fn writes_tangents(self) -> bool {
        !self.writes_colors()
    }

    /// Range the engine must produce normals in for this encoding.
    ///
    /// Color channels store `[0, 1]`; tangent channels store the signed
    /// vector unchanged.
    pub fn normal_range(self) -> NormalRange {
        if self.writes_colors() {
            NormalRange::Color
        } else {
            NormalRange::Signed
        }
    }

    /// Number of normal components written per vertex.
    pub fn components(self) -> usize {
        match self {
            Self::VertexColorRgb | Self::TangentXyz => 3,
            Self::VertexColorRg | Self::TangentXy => 2,
        }
    }

    /// Returns the encoding's name as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::VertexColorRgb => "vertex_color_rgb",
            Self::VertexColorRg => "vertex_color_rg",
            Self::TangentXyz => "tangent_xyz",
            Self::TangentXy => "tangent_xy",
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The vertex channels a bake may write.
///
/// `colors` is `None` when the mesh carries no vertex colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelState {
    /// RGBA vertex colors, if present.
    pub colors: Option<Vec<Vec4>>,
    /// Vertex tangents (xyz direction, w handedness).
    pub tangents: Vec<Vec4>,
}

impl ChannelState {
    /// Captures the writable channels of `mesh`.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            colors: mesh.has_colors().then(|| mesh.colors.clone()),
            tangents: mesh.tangents.clone(),
        }
    }

    /// Number of vertices the channels describe.
    pub fn vertex_count(&self) -> usize {
        self.tangents.len()
    }
}
