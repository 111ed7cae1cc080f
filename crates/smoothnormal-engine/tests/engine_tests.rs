//! Integration tests for smoothnormal-engine.

use smoothnormal_engine::config::BackendKind;
use smoothnormal_engine::cpu::object_space_smooth_normals;
use smoothnormal_engine::kernels::{pack_positions, TriangleRecord, TRIANGLE_RECORD_STRIDE, VEC4_STRIDE};
use smoothnormal_engine::{
    compute_smooth_normals_cpu, compute_smooth_normals_gpu, create_engine, CpuEngine, EngineConfig,
    EngineKind, GpuEngine, SmoothNormalEngine,
};
use smoothnormal_gpu::{CpuFallback, ThreadPoolBackend};
use smoothnormal_math::{NormalRange, Vec3, Vec4};
use smoothnormal_mesh::generators::{flat_quad, hard_cube, quad_grid, shared_cube, uv_sphere};
use smoothnormal_mesh::{Mesh, PositionAdjacency};
use smoothnormal_types::constants::PARITY_TOLERANCE;

fn gpu_sequential() -> GpuEngine {
    GpuEngine::new(Box::new(CpuFallback::new())).unwrap()
}

fn gpu_parallel() -> GpuEngine {
    GpuEngine::new(Box::new(ThreadPoolBackend::new().with_threads(4))).unwrap()
}

fn assert_close(a: Vec3, b: Vec3, tol: f32) {
    assert!((a - b).abs().max_element() <= tol, "{a:?} != {b:?}");
}

/// A sphere with its vertices jittered so position groups are irregular.
fn lumpy_sphere() -> Mesh {
    let mut mesh = uv_sphere(1.0, 12, 24);
    for (i, p) in mesh.positions.iter_mut().enumerate() {
        let bump = 1.0 + 0.1 * ((i * 7919) % 13) as f32 / 13.0;
        *p *= bump;
    }
    // Re-merge the seam so groups still span multiple vertices.
    let slices = 24;
    for row in 0..=12 {
        let first = row * (slices + 1);
        mesh.positions[first + slices] = mesh.positions[first];
    }
    mesh
}

// ─── CPU Engine Tests ─────────────────────────────────────────

#[test]
fn output_has_one_normal_per_vertex() {
    for mesh in [flat_quad(1.0), hard_cube(1.0), uv_sphere(1.0, 6, 8)] {
        let normals = compute_smooth_normals_cpu(&mesh).unwrap();
        assert_eq!(normals.len(), mesh.vertex_count());
    }
}

#[test]
fn flat_quad_encodes_straight_up() {
    let normals = compute_smooth_normals_cpu(&flat_quad(1.0)).unwrap();
    for n in normals {
        assert_close(n, Vec3::new(0.5, 0.5, 1.0), 1e-6);
    }
}

#[test]
fn hard_cube_corners_average_three_faces() {
    let mesh = hard_cube(2.0);
    let adj = PositionAdjacency::build(&mesh);
    let object = object_space_smooth_normals(&mesh, &adj);
    let k = 1.0 / 3.0f32.sqrt();
    for (v, n) in object.iter().enumerate() {
        let expected = mesh.positions[v].signum() * k;
        assert_close(*n, expected, 1e-5);
    }
}

#[test]
fn hard_cube_duplicates_share_object_normal() {
    let mesh = hard_cube(1.0);
    let adj = PositionAdjacency::build(&mesh);
    let object = object_space_smooth_normals(&mesh, &adj);
    for a in 0..mesh.vertex_count() {
        for b in 0..mesh.vertex_count() {
            if mesh.positions[a] == mesh.positions[b] {
                assert_eq!(object[a], object[b]);
            }
        }
    }
}

#[test]
fn hard_cube_tangent_space_tilts_off_face() {
    let mesh = hard_cube(1.0);
    let normals = CpuEngine::new().compute(&mesh, NormalRange::Signed).unwrap();
    let k = 1.0 / 3.0f32.sqrt();
    for n in normals {
        // The face normal component of a corner diagonal.
        assert!((n.z - k).abs() < 1e-5, "{n:?}");
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn shared_cube_is_already_smooth() {
    let mesh = shared_cube(1.0);
    let normals = CpuEngine::new().compute(&mesh, NormalRange::Signed).unwrap();
    for n in normals {
        assert_close(n, Vec3::Z, 1e-5);
    }
}

#[test]
fn sphere_matches_its_own_normals() {
    let mesh = uv_sphere(1.0, 16, 32);
    let normals = CpuEngine::new().compute(&mesh, NormalRange::Signed).unwrap();
    for n in normals {
        assert!(n.z > 0.99, "{n:?}");
    }
}

#[test]
fn negative_handedness_flips_binormal() {
    let mut mesh = flat_quad(1.0);
    for t in &mut mesh.tangents {
        *t = Vec4::new(1.0, 0.0, 0.0, -1.0);
    }
    // Tilt one vertex so the smooth normal has a binormal component.
    mesh.positions[2].z = 0.5;
    let normals = CpuEngine::new().compute(&mesh, NormalRange::Signed).unwrap();
    let mut flipped = mesh.clone();
    for t in &mut flipped.tangents {
        t.w = 1.0;
    }
    let reference = CpuEngine::new().compute(&flipped, NormalRange::Signed).unwrap();
    for (a, b) in normals.iter().zip(&reference) {
        assert_close(*a, Vec3::new(b.x, -b.y, b.z), 1e-6);
    }
}

#[test]
fn degenerate_triangle_stays_finite() {
    let mut mesh = flat_quad(1.0);
    // Vertex 3 appears only in a zero-area triangle.
    mesh.indices = vec![0, 1, 2, 3, 3, 3];
    let normals = compute_smooth_normals_cpu(&mesh).unwrap();
    assert!(normals.iter().all(|n| n.is_finite()));
    assert_eq!(normals[3], Vec3::splat(0.5));
}

#[test]
fn unreferenced_vertex_is_mid_gray() {
    let mut mesh = flat_quad(1.0);
    mesh.indices.truncate(3);
    let normals = compute_smooth_normals_cpu(&mesh).unwrap();
    assert_eq!(normals[3], Vec3::splat(0.5));
    assert_close(normals[0], Vec3::new(0.5, 0.5, 1.0), 1e-6);
}

#[test]
fn empty_mesh_yields_empty_output() {
    let mesh = Mesh::default();
    assert!(compute_smooth_normals_cpu(&mesh).unwrap().is_empty());
    assert!(gpu_parallel().compute(&mesh, NormalRange::Color).unwrap().is_empty());
}

#[test]
fn malformed_mesh_is_rejected() {
    let mut mesh = flat_quad(1.0);
    mesh.tangents.pop();
    assert!(compute_smooth_normals_cpu(&mesh).is_err());
    assert!(gpu_sequential().compute(&mesh, NormalRange::Color).is_err());
}

#[test]
fn foreign_adjacency_is_rejected() {
    let mesh = flat_quad(1.0);
    let other = hard_cube(1.0);
    let adj = PositionAdjacency::build(&other);
    let err = CpuEngine::new()
        .compute_with_adjacency(&mesh, &adj, NormalRange::Color)
        .unwrap_err();
    assert!(err.to_string().contains("adjacency"));
    assert!(gpu_sequential()
        .compute_with_adjacency(&mesh, &adj, NormalRange::Color)
        .is_err());
}

#[test]
fn compute_does_not_mutate_mesh() {
    let mesh = hard_cube(1.0);
    let before = mesh.clone();
    compute_smooth_normals_cpu(&mesh).unwrap();
    compute_smooth_normals_gpu(&mesh).unwrap();
    assert_eq!(mesh, before);
}

// ─── GPU Engine Tests ─────────────────────────────────────────

#[test]
fn triangle_record_layout() {
    let record = TriangleRecord {
        normal: Vec3::new(0.0, 0.0, 1.0),
        weights: [90.0, 45.0, 45.0],
        indices: [3, 7, u32::MAX],
    };
    let mut words = [0.0f32; TRIANGLE_RECORD_STRIDE];
    record.write(&mut words);
    assert_eq!(words[2], 1.0);
    assert_eq!(words[5], 45.0);
    assert_eq!(words[9].to_bits(), 7);
    assert_eq!(TriangleRecord::read(&words), record);
    assert_eq!(record.contribution(0), Vec3::new(0.0, 0.0, 90.0));
}

#[test]
fn position_upload_carries_index_bits() {
    let positions = [Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::new(-4.0, 5.0, 0.5)];
    let words = pack_positions(&positions);
    assert_eq!(words.len(), positions.len() * VEC4_STRIDE);
    for (i, p) in positions.iter().enumerate() {
        let element = &words[i * VEC4_STRIDE..(i + 1) * VEC4_STRIDE];
        assert_eq!(Vec3::new(element[0], element[1], element[2]), *p);
        assert_eq!(element[3].to_bits(), i as u32);
    }
}

#[test]
fn gpu_flat_quad() {
    let normals = compute_smooth_normals_gpu(&flat_quad(2.0)).unwrap();
    assert_eq!(normals.len(), 4);
    for n in normals {
        assert_close(n, Vec3::new(0.5, 0.5, 1.0), 1e-6);
    }
}

#[test]
fn gpu_unreferenced_vertex_is_mid_gray() {
    let mut mesh = quad_grid(3, 3, 1.0, 1.0);
    mesh.indices.truncate(6);
    let normals = gpu_parallel().compute(&mesh, NormalRange::Color).unwrap();
    assert_eq!(normals[15], Vec3::splat(0.5));
}

#[test]
fn gpu_releases_buffers_after_compute() {
    let engine = gpu_parallel();
    engine.compute(&hard_cube(1.0), NormalRange::Color).unwrap();
    let stats = engine.backend().memory_stats();
    assert_eq!(stats.live_buffers, 0);
    assert_eq!(stats.bytes_in_use, 0);
    assert!(stats.peak_bytes > 0);
}

#[test]
fn gpu_allocation_failure_releases_buffers() {
    let mesh = uv_sphere(1.0, 16, 32);
    let engine = GpuEngine::new(Box::new(CpuFallback::with_memory_limit(4096))).unwrap();
    let err = engine.compute(&mesh, NormalRange::Color).unwrap_err();
    assert!(err.is_device_error());
    assert_eq!(engine.backend().memory_stats().live_buffers, 0);
    assert_eq!(engine.backend().memory_stats().bytes_in_use, 0);
}

// ─── Parity Tests ─────────────────────────────────────────────

#[test]
fn engines_agree_bit_for_bit() {
    let cpu = CpuEngine::new();
    let sequential = gpu_sequential();
    let parallel = gpu_parallel();
    for mesh in [
        flat_quad(1.0),
        quad_grid(10, 7, 3.0, 2.0),
        hard_cube(1.5),
        shared_cube(1.0),
        uv_sphere(1.0, 12, 24),
        lumpy_sphere(),
    ] {
        for range in [NormalRange::Color, NormalRange::Signed] {
            let reference = cpu.compute(&mesh, range).unwrap();
            assert_eq!(sequential.compute(&mesh, range).unwrap(), reference, "{}", mesh.name);
            assert_eq!(parallel.compute(&mesh, range).unwrap(), reference, "{}", mesh.name);
        }
    }
}

#[test]
fn engines_agree_within_tolerance() {
    let mesh = lumpy_sphere();
    let cpu = compute_smooth_normals_cpu(&mesh).unwrap();
    let gpu = compute_smooth_normals_gpu(&mesh).unwrap();
    for (a, b) in cpu.iter().zip(&gpu) {
        assert_close(*a, *b, PARITY_TOLERANCE);
    }
}

#[test]
fn shared_adjacency_gives_same_result() {
    let mesh = lumpy_sphere();
    let adj = PositionAdjacency::build(&mesh);
    let a = CpuEngine::new()
        .compute_with_adjacency(&mesh, &adj, NormalRange::Color)
        .unwrap();
    let b = gpu_parallel()
        .compute_with_adjacency(&mesh, &adj, NormalRange::Color)
        .unwrap();
    assert_eq!(a, b);
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_parallel() {
    let config = EngineConfig::default();
    assert_eq!(config.kind, EngineKind::Gpu);
    assert_eq!(config.backend, BackendKind::ThreadPool);
}

#[test]
fn create_engine_honors_kind() {
    let cpu = create_engine(&EngineConfig::cpu()).unwrap();
    assert_eq!(cpu.kind(), EngineKind::Cpu);
    assert_eq!(cpu.name(), "cpu");
    let gpu = create_engine(&EngineConfig::gpu_reference()).unwrap();
    assert_eq!(gpu.kind(), EngineKind::Gpu);
    assert_eq!(gpu.name(), "gpu");
}

#[test]
fn create_engine_applies_memory_limit() {
    let config = EngineConfig {
        max_buffer_bytes: Some(64),
        ..EngineConfig::default()
    };
    let engine = create_engine(&config).unwrap();
    assert!(engine.compute(&hard_cube(1.0), NormalRange::Color).is_err());
}

#[test]
fn config_from_toml() {
    let config: EngineConfig = toml::from_str(
        r#"
        kind = "gpu"
        backend = "sequential"
        max_buffer_bytes = 1048576
        "#,
    )
    .unwrap();
    assert_eq!(config.backend, BackendKind::Sequential);
    assert_eq!(config.max_buffer_bytes, Some(1 << 20));
    assert_eq!(config.threads, None);

    let text = toml::to_string(&config).unwrap();
    let back: EngineConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn engine_kind_names() {
    assert_eq!(EngineKind::Cpu.name(), "cpu");
    assert_eq!(EngineKind::Gpu.name(), "gpu");
}
