//! Procedural mesh generators for benchmarks and testing.
//!
//! These generators produce deterministic meshes with counter-clockwise
//! winding (face normal = `cross(v1 - v0, v2 - v0)`), unit normals and
//! tangents orthogonal to them with `w = +1`.

use glam::{Vec3, Vec4};
use smoothnormal_math::vector::normalized;

use crate::mesh::Mesh;

/// Axis-aligned cube faces as (normal, tangent). Binormal is `normal × tangent`.
const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X),
    (Vec3::NEG_Z, Vec3::NEG_X),
    (Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_X, Vec3::Z),
    (Vec3::Y, Vec3::X),
    (Vec3::NEG_Y, Vec3::X),
];

/// Corner offsets (along tangent, along binormal), counter-clockwise.
const QUAD_CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Generates a single square in the XY plane facing +Z.
///
/// Two coplanar triangles sharing the diagonal `0–2`.
///
/// ```
/// use smoothnormal_mesh::generators::flat_quad;
/// let mesh = flat_quad(1.0);
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn flat_quad(size: f32) -> Mesh {
    let mut mesh = Mesh::with_capacity("flat_quad", 4, 2);
    let tangent = Vec4::new(1.0, 0.0, 0.0, 1.0);
    for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
        mesh.push_vertex(Vec3::new(u * size, v * size, 0.0), Vec3::Z, tangent);
    }
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(0, 2, 3);
    mesh
}

/// Generates a flat rectangular grid in the XY plane facing +Z.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Y (vertex count = rows + 1).
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> Mesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = Mesh::with_capacity("quad_grid", verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let tangent = Vec4::new(1.0, 0.0, 0.0, 1.0);

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            let p = Vec3::new(-half_w + u * width, half_h - v * height, 0.0);
            mesh.push_vertex(p, Vec3::Z, tangent);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.push_triangle(top_left, bot_left, top_right);
            mesh.push_triangle(top_right, bot_left, bot_right);
        }
    }

    mesh
}

/// Generates a hard-edged cube: 24 vertices (4 per face), 12 triangles.
///
/// Each corner position appears three times, once per adjacent face,
/// each copy carrying that face's normal and tangent. This is the
/// layout importers produce for flat-shaded models and the case smooth
/// normals exist for.
pub fn hard_cube(size: f32) -> Mesh {
    let h = size / 2.0;
    let mut mesh = Mesh::with_capacity("hard_cube", 24, 12);

    for (normal, tangent) in CUBE_FACES {
        let binormal = normal.cross(tangent);
        let base = mesh.vertex_count() as u32;
        for (s, u) in QUAD_CORNERS {
            let p = normal * h + tangent * (s * h) + binormal * (u * h);
            mesh.push_vertex(p, normal, tangent.extend(1.0));
        }
        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base, base + 2, base + 3);
    }

    mesh
}

/// Generates a cube with one vertex per corner: 8 vertices, 12 triangles.
///
/// Vertex normals point along the corner diagonals; tangents are
/// `normalize(Y × normal)`. Vertex `i` sits at
/// `(±h, ±h, ±h)` with bit 0/1/2 of `i` selecting +X/+Y/+Z.
pub fn shared_cube(size: f32) -> Mesh {
    let h = size / 2.0;
    let mut mesh = Mesh::with_capacity("shared_cube", 8, 12);

    for i in 0..8u32 {
        let sign = |bit: u32| if i & (1 << bit) != 0 { 1.0 } else { -1.0 };
        let p = Vec3::new(sign(0) * h, sign(1) * h, sign(2) * h);
        let normal = normalized(p);
        let tangent = normalized(Vec3::Y.cross(normal));
        mesh.push_vertex(p, normal, tangent.extend(1.0));
    }

    let corner_index = |p: Vec3| -> u32 {
        u32::from(p.x > 0.0) | (u32::from(p.y > 0.0) << 1) | (u32::from(p.z > 0.0) << 2)
    };
    for (normal, tangent) in CUBE_FACES {
        let binormal = normal.cross(tangent);
        let quad: Vec<u32> = QUAD_CORNERS
            .iter()
            .map(|&(s, u)| corner_index(normal + tangent * s + binormal * u))
            .collect();
        mesh.push_triangle(quad[0], quad[1], quad[2]);
        mesh.push_triangle(quad[0], quad[2], quad[3]);
    }

    mesh
}

/// Generates a UV sphere centered at the origin.
///
/// The seam column reuses the first column's coordinates and the pole
/// rows collapse onto exact pole positions, so seam and pole duplicates
/// are bit-identical and merge during smoothing.
///
/// # Arguments
/// - `radius` — Sphere radius.
/// - `stacks` — Number of horizontal slices (latitude divisions).
/// - `slices` — Number of vertical slices (longitude divisions).
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> Mesh {
    let vertex_count = (stacks + 1) * (slices + 1);
    let mut mesh = Mesh::with_capacity("uv_sphere", vertex_count, stacks * slices * 2);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32;
        let (sin_phi, cos_phi) = if i == 0 {
            (0.0, 1.0)
        } else if i == stacks {
            (0.0, -1.0)
        } else {
            phi.sin_cos()
        };

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * (j % slices) as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let normal = Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
            let tangent = Vec3::new(-sin_theta, 0.0, cos_theta);
            mesh.push_vertex(normal * radius, normal, tangent.extend(1.0));
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Skip degenerate triangles at poles
            if i != 0 {
                mesh.push_triangle(a, a + 1, b);
            }
            if i != stacks - 1 {
                mesh.push_triangle(a + 1, b + 1, b);
            }
        }
    }

    mesh
}
