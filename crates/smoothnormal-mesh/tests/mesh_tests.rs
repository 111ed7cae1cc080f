//! Integration tests for smoothnormal-mesh.

use smoothnormal_math::{Vec3, Vec4};
use smoothnormal_mesh::generators::{flat_quad, hard_cube, quad_grid, shared_cube, uv_sphere};
use smoothnormal_mesh::{FaceGeometry, Mesh, PositionAdjacency, PositionKey};
use smoothnormal_types::{PositionId, TriangleId, VertexId};

// ─── Mesh Tests ───────────────────────────────────────────────

fn make_single_triangle() -> Mesh {
    let mut mesh = Mesh::with_capacity("triangle", 3, 1);
    let t = Vec4::new(1.0, 0.0, 0.0, 1.0);
    mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::Z, t);
    mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, t);
    mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, t);
    mesh.push_triangle(0, 1, 2);
    mesh
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert!(!mesh.has_colors());
}

#[test]
fn triangle_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.triangle_positions(0)[1], Vec3::X);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_normal_length() {
    let mut mesh = make_single_triangle();
    mesh.normals.pop();
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_tangent_length() {
    let mut mesh = make_single_triangle();
    mesh.tangents.push(Vec4::ONE);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_partial_colors() {
    let mut mesh = make_single_triangle();
    mesh.colors = vec![Vec4::ONE; 2];
    assert!(mesh.validate().is_err());
    mesh.colors = vec![Vec4::ONE; 3];
    assert!(mesh.validate().is_ok());
}

#[test]
fn validate_catches_ragged_indices() {
    let mut mesh = make_single_triangle();
    mesh.indices.push(0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    let err = mesh.validate().unwrap_err();
    assert!(err.to_string().contains("99"));
}

#[test]
fn validate_allows_degenerate_triangles() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_ok());
}

#[test]
fn mesh_serializes() {
    let mesh = make_single_triangle();
    let json = serde_json::to_string(&mesh).unwrap();
    let back: Mesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mesh);
}

// ─── Position Key Tests ───────────────────────────────────────

#[test]
fn equal_positions_share_key() {
    assert_eq!(
        PositionKey::new(Vec3::new(1.0, 2.0, 3.0)),
        PositionKey::new(Vec3::new(1.0, 2.0, 3.0))
    );
}

#[test]
fn signed_zero_shares_key() {
    assert_eq!(
        PositionKey::new(Vec3::new(0.0, 1.0, 0.0)),
        PositionKey::new(Vec3::new(-0.0, 1.0, -0.0))
    );
}

#[test]
fn near_positions_do_not_merge() {
    let a = Vec3::new(1.0, 0.0, 0.0);
    let b = Vec3::new(f32::from_bits(1.0f32.to_bits() + 1), 0.0, 0.0);
    assert_ne!(PositionKey::new(a), PositionKey::new(b));
}

// ─── Face Geometry Tests ──────────────────────────────────────

#[test]
fn right_triangle_geometry() {
    let face = FaceGeometry::from_positions(Vec3::ZERO, Vec3::X, Vec3::Y);
    assert!((face.normal - Vec3::Z).length() < 1e-6);
    assert!((face.weights[0] - 90.0).abs() < 1e-3);
    assert!((face.weights[1] - 45.0).abs() < 1e-3);
    assert!((face.weights[2] - 45.0).abs() < 1e-3);
}

#[test]
fn angles_sum_to_180() {
    let face = FaceGeometry::from_positions(
        Vec3::new(0.3, -1.2, 0.5),
        Vec3::new(2.0, 0.4, -0.7),
        Vec3::new(-1.1, 0.9, 1.6),
    );
    let sum: f32 = face.weights.iter().sum();
    assert!((sum - 180.0).abs() < 1e-2);
    assert!((face.normal.length() - 1.0).abs() < 1e-5);
}

#[test]
fn coincident_vertices_contribute_nothing() {
    let face = FaceGeometry::from_positions(Vec3::ZERO, Vec3::ZERO, Vec3::Y);
    assert!(face.is_degenerate());
    for corner in 0..3 {
        assert_eq!(face.contribution(corner), Vec3::ZERO);
    }
}

#[test]
fn collinear_vertices_contribute_nothing() {
    let face = FaceGeometry::from_positions(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
    assert!(face.is_degenerate());
}

// ─── Adjacency Tests ──────────────────────────────────────────

#[test]
fn quad_adjacency() {
    let mesh = flat_quad(1.0);
    let adj = PositionAdjacency::build(&mesh);
    assert_eq!(adj.vertex_count(), 4);
    assert_eq!(adj.position_count(), 4);
    // Vertices 0 and 2 are on the shared diagonal.
    assert_eq!(adj.incident_to_vertex(VertexId(0)).len(), 2);
    assert_eq!(adj.incident_to_vertex(VertexId(1)).len(), 1);
    assert_eq!(adj.incident_to_vertex(VertexId(2)).len(), 2);
    assert!(adj.shared_vertices().is_empty());
}

#[test]
fn hard_cube_groups_by_position() {
    let mesh = hard_cube(1.0);
    let adj = PositionAdjacency::build(&mesh);
    assert_eq!(adj.position_count(), 8);
    assert_eq!(adj.shared_vertices().len(), 24);
    for g in 0..8 {
        // Three faces meet at every corner; each face has 1 or 2 corners there.
        let n = adj.incident(PositionId(g)).len();
        assert!((3..=6).contains(&n), "group {g} has {n} corners");
    }
}

#[test]
fn incident_corners_are_in_triangle_order() {
    let mesh = hard_cube(2.0);
    let adj = PositionAdjacency::build(&mesh);
    for g in 0..adj.position_count() {
        let corners = adj.incident(PositionId(g as u32));
        for pair in corners.windows(2) {
            assert!((pair[0].triangle, pair[0].slot) < (pair[1].triangle, pair[1].slot));
        }
    }
}

#[test]
fn incident_corners_reference_the_group() {
    let mesh = uv_sphere(1.0, 6, 8);
    let adj = PositionAdjacency::build(&mesh);
    for v in 0..mesh.vertex_count() {
        let vid = VertexId(v as u32);
        let key = PositionKey::new(mesh.positions[v]);
        for corner in adj.incident_to_vertex(vid) {
            let idx = mesh.triangle(corner.triangle.index())[corner.slot as usize];
            assert_eq!(PositionKey::new(mesh.positions[idx as usize]), key);
        }
    }
}

#[test]
fn degenerate_triangle_lists_both_corners() {
    let mut mesh = flat_quad(1.0);
    mesh.indices = vec![0, 0, 1];
    let adj = PositionAdjacency::build(&mesh);
    let corners = adj.incident_to_vertex(VertexId(0));
    assert_eq!(corners.len(), 2);
    assert_eq!(corners[0].triangle, TriangleId(0));
    assert_eq!((corners[0].slot, corners[1].slot), (0, 1));
}

#[test]
fn unreferenced_vertex_has_no_corners() {
    let mut mesh = flat_quad(1.0);
    mesh.indices.truncate(3);
    let adj = PositionAdjacency::build(&mesh);
    assert!(adj.incident_to_vertex(VertexId(3)).is_empty());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn generators_validate() {
    for mesh in [
        flat_quad(1.0),
        quad_grid(4, 3, 2.0, 1.0),
        hard_cube(1.0),
        shared_cube(1.0),
        uv_sphere(1.0, 8, 16),
    ] {
        assert!(mesh.validate().is_ok(), "{} failed validation", mesh.name);
    }
}

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
}

#[test]
fn cube_counts() {
    let hard = hard_cube(1.0);
    assert_eq!(hard.vertex_count(), 24);
    assert_eq!(hard.triangle_count(), 12);
    let shared = shared_cube(1.0);
    assert_eq!(shared.vertex_count(), 8);
    assert_eq!(shared.triangle_count(), 12);
}

#[test]
fn generated_winding_matches_normals() {
    for mesh in [flat_quad(1.0), quad_grid(3, 3, 1.0, 1.0), hard_cube(1.0)] {
        for t in 0..mesh.triangle_count() {
            let [p0, p1, p2] = mesh.triangle_positions(t);
            let face = FaceGeometry::from_positions(p0, p1, p2);
            let v = mesh.triangle(t)[0] as usize;
            assert!(face.normal.dot(mesh.normals[v]) > 0.99, "{} triangle {t}", mesh.name);
        }
    }
}

#[test]
fn shared_cube_faces_point_outward() {
    let mesh = shared_cube(1.0);
    for t in 0..mesh.triangle_count() {
        let [p0, p1, p2] = mesh.triangle_positions(t);
        let face = FaceGeometry::from_positions(p0, p1, p2);
        let centroid = (p0 + p1 + p2) / 3.0;
        assert!(face.normal.dot(centroid) > 0.0);
    }
}

#[test]
fn sphere_radius_and_frames() {
    let mesh = uv_sphere(2.5, 8, 16);
    for i in 0..mesh.vertex_count() {
        assert!((mesh.positions[i].length() - 2.5).abs() < 1e-4);
        assert!(mesh.tangents[i].truncate().dot(mesh.normals[i]).abs() < 1e-5);
    }
}

#[test]
fn sphere_seam_is_bit_identical() {
    let slices = 16;
    let mesh = uv_sphere(1.0, 8, slices);
    let adj = PositionAdjacency::build(&mesh);
    // Two poles plus (stacks - 1) rings of `slices` distinct positions.
    assert_eq!(adj.position_count(), 2 + 7 * slices);
}
