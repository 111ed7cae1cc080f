//! Kernels of the two-stage parallel engine.
//!
//! Stage A ([`TriangleKernel`]) runs once per triangle and writes a
//! [`TriangleRecord`]. Stage B ([`VertexKernel`]) runs once per vertex,
//! gathers the records of every corner at the vertex's position,
//! normalizes, rotates into the vertex's tangent frame and encodes.
//!
//! Buffer layouts (32-bit words):
//!
//! | buffer | stride | contents |
//! |---|---|---|
//! | positions | 4 | x, y, z, original vertex index (u32 bits) |
//! | normals | 4 | x, y, z, 0 |
//! | tangents | 4 | x, y, z, w |
//! | triangles | 1 | vertex index (u32 bits) |
//! | triangle data | 12 | normal xyz, 0, weights ×3, 0, indices ×3 (u32 bits), 0 |
//! | vertex positions | 1 | position group (u32 bits) |
//! | position offsets | 1 | row start per group (u32 bits) |
//! | incident corners | 1 | `3 * triangle + slot` (u32 bits) |
//! | smooth normals | 4 | x, y, z, 1 |

use smoothnormal_gpu::Kernel;
use smoothnormal_math::vector::normalized;
use smoothnormal_math::{NormalRange, TangentFrame, Vec3, Vec4};
use smoothnormal_mesh::{Corner, FaceGeometry};

/// Words per vec4 element.
pub const VEC4_STRIDE: usize = 4;

/// Words per [`TriangleRecord`].
pub const TRIANGLE_RECORD_STRIDE: usize = 12;

/// Stage A output for one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleRecord {
    /// Face normal (zero for degenerate triangles).
    pub normal: Vec3,
    /// Corner angles in degrees.
    pub weights: [f32; 3],
    /// Vertex indices of the corners.
    pub indices: [u32; 3],
}

impl TriangleRecord {
    /// Serializes into `TRIANGLE_RECORD_STRIDE` words.
    pub fn write(&self, out: &mut [f32]) {
        out[0] = self.normal.x;
        out[1] = self.normal.y;
        out[2] = self.normal.z;
        out[3] = 0.0;
        out[4..7].copy_from_slice(&self.weights);
        out[7] = 0.0;
        for (dst, &idx) in out[8..11].iter_mut().zip(&self.indices) {
            *dst = f32::from_bits(idx);
        }
        out[11] = 0.0;
    }

    /// Deserializes from `TRIANGLE_RECORD_STRIDE` words.
    pub fn read(words: &[f32]) -> Self {
        Self {
            normal: Vec3::new(words[0], words[1], words[2]),
            weights: [words[4], words[5], words[6]],
            indices: [words[8].to_bits(), words[9].to_bits(), words[10].to_bits()],
        }
    }

    /// Weighted contribution at corner `slot`.
    #[inline]
    pub fn contribution(&self, slot: usize) -> Vec3 {
        self.normal * self.weights[slot]
    }
}

/// Flattens positions into the stride-4 upload layout, with each
/// vertex's own index in the fourth word.
pub fn pack_positions(positions: &[Vec3]) -> Vec<f32> {
    positions
        .iter()
        .enumerate()
        .flat_map(|(i, p)| [p.x, p.y, p.z, f32::from_bits(i as u32)])
        .collect()
}

#[inline]
fn vec3_at(buffer: &[f32], element: usize) -> Vec3 {
    let base = element * VEC4_STRIDE;
    Vec3::new(buffer[base], buffer[base + 1], buffer[base + 2])
}

#[inline]
fn vec4_at(buffer: &[f32], element: usize) -> Vec4 {
    let base = element * VEC4_STRIDE;
    Vec4::new(buffer[base], buffer[base + 1], buffer[base + 2], buffer[base + 3])
}

/// Stage A: per-triangle face normal and corner weights.
pub struct TriangleKernel<'a> {
    /// Positions, stride 4.
    pub positions: &'a [f32],
    /// Flat triangle indices, stride 1.
    pub triangles: &'a [f32],
}

impl Kernel for TriangleKernel<'_> {
    fn label(&self) -> &str {
        "triangle_data"
    }

    fn output_stride(&self) -> usize {
        TRIANGLE_RECORD_STRIDE
    }

    fn execute(&self, invocation: usize, out: &mut [f32]) {
        let base = invocation * 3;
        let indices = [
            self.triangles[base].to_bits(),
            self.triangles[base + 1].to_bits(),
            self.triangles[base + 2].to_bits(),
        ];
        let face = FaceGeometry::from_positions(
            vec3_at(self.positions, indices[0] as usize),
            vec3_at(self.positions, indices[1] as usize),
            vec3_at(self.positions, indices[2] as usize),
        );
        TriangleRecord {
            normal: face.normal,
            weights: face.weights,
            indices,
        }
        .write(out);
    }
}

/// Stage B: per-vertex gather, normalize, tangent-space rotation, encode.
pub struct VertexKernel<'a> {
    /// Vertex normals, stride 4.
    pub normals: &'a [f32],
    /// Vertex tangents, stride 4.
    pub tangents: &'a [f32],
    /// Stage A output, stride 12.
    pub triangle_data: &'a [f32],
    /// Position group of each vertex.
    pub vertex_positions: &'a [f32],
    /// Row offsets into `incident_corners`, one per group plus one.
    pub position_offsets: &'a [f32],
    /// Flat corner indices, grouped by position in triangle order.
    pub incident_corners: &'a [f32],
    /// Output range.
    pub range: NormalRange,
}

impl VertexKernel<'_> {
    fn record(&self, triangle: usize) -> TriangleRecord {
        let base = triangle * TRIANGLE_RECORD_STRIDE;
        TriangleRecord::read(&self.triangle_data[base..base + TRIANGLE_RECORD_STRIDE])
    }
}

impl Kernel for VertexKernel<'_> {
    fn label(&self) -> &str {
        "smooth_normals"
    }

    fn output_stride(&self) -> usize {
        VEC4_STRIDE
    }

    fn execute(&self, invocation: usize, out: &mut [f32]) {
        let group = self.vertex_positions[invocation].to_bits() as usize;
        let start = self.position_offsets[group].to_bits() as usize;
        let end = self.position_offsets[group + 1].to_bits() as usize;

        let mut sum = Vec3::ZERO;
        for word in &self.incident_corners[start..end] {
            let corner = Corner::from_flat_index(word.to_bits());
            let record = self.record(corner.triangle.index());
            sum += record.contribution(corner.slot as usize);
        }

        let frame = TangentFrame::new(
            vec3_at(self.normals, invocation),
            vec4_at(self.tangents, invocation),
        );
        let n = self.range.encode(frame.to_tangent_space(normalized(sum)));

        out[0] = n.x;
        out[1] = n.y;
        out[2] = n.z;
        out[3] = 1.0;
    }
}
