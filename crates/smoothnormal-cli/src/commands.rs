//! CLI command implementations.

use std::path::Path;

use smoothnormal_bench::metrics::BenchmarkMetrics;
use smoothnormal_bench::runner::BenchmarkRunner;
use smoothnormal_bench::scenarios::{Scenario, ScenarioKind};
use smoothnormal_debug::lines::{normal_lines, NormalSource};
use smoothnormal_debug::snapshot::ChannelSnapshot;
use smoothnormal_engine::GpuEngine;
use smoothnormal_gpu::ThreadPoolBackend;
use smoothnormal_math::Mat4;
use smoothnormal_mesh::generators::{flat_quad, hard_cube, shared_cube, uv_sphere};
use smoothnormal_pipeline::{mesh_handle, BakeConfig, Baker, SceneNode};
use smoothnormal_telemetry::EventBus;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    output_path: Option<&str>,
    format: crate::OutputFormat,
    threads: Option<usize>,
) -> CommandResult {
    println!("Smooth Normal Benchmark Suite");
    println!("═════════════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {scenario_name}");
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut backend = ThreadPoolBackend::new();
    if let Some(threads) = threads {
        backend = backend.with_threads(threads);
    }
    let gpu = GpuEngine::new(Box::new(backend))?;

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        println!(
            "Running: {} ({} verts, {} tris, {} iterations)",
            kind.name(),
            scenario.mesh.vertex_count(),
            scenario.mesh.triangle_count(),
            scenario.iterations,
        );

        let metrics = BenchmarkRunner::run(&scenario, &gpu).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  CPU avg:       {:.3}ms", metrics.cpu_avg_time * 1000.0);
        println!("  GPU avg:       {:.3}ms ({})", metrics.gpu_avg_time * 1000.0, metrics.backend);
        println!("  Speedup:       {:.2}x", metrics.speedup());
        println!("  Max deviation: {:.3e}", metrics.max_deviation);
        println!();

        all_metrics.push(metrics);
    }

    let text = match format {
        crate::OutputFormat::Csv => BenchmarkMetrics::to_csv(&all_metrics),
        crate::OutputFormat::Json => BenchmarkMetrics::to_json(&all_metrics)?,
    };
    if let Some(path) = output_path {
        std::fs::write(path, &text)?;
        println!("Results written to: {path}");
    } else {
        println!("{text}");
    }

    Ok(())
}

/// Print the resolved configuration.
pub fn config(user_path: Option<&str>) -> CommandResult {
    let config = BakeConfig::resolve(BakeConfig::default(), user_path.map(Path::new))?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Validate a config file.
pub fn validate(path: &str) -> CommandResult {
    println!("Smooth Normal Config Validator");
    println!("──────────────────────────────");
    println!();

    println!("Validating config: {path}");
    match BakeConfig::load(Path::new(path)) {
        Ok(config) => {
            println!("✅ Config is valid.");
            println!("   matching:     {:?}", config.matching);
            println!("   write_target: {}", config.write_target);
            println!("   engine:       {}", config.engine.name());
            Ok(())
        }
        Err(e) => {
            println!("❌ Config validation failed: {e}");
            Err(e.into())
        }
    }
}

/// Bake a procedural model through the full pipeline.
pub fn demo(model: &str, config_path: Option<&str>, snapshot_path: Option<&str>) -> CommandResult {
    let mesh = match model {
        "flat_quad" => flat_quad(1.0),
        "hard_cube" => hard_cube(1.0),
        "shared_cube" => shared_cube(1.0),
        "uv_sphere" => uv_sphere(1.0, 16, 32),
        other => {
            eprintln!("Unknown model: {other}");
            eprintln!("Available: flat_quad, hard_cube, shared_cube, uv_sphere");
            return Err("Unknown model".into());
        }
    };
    let config = match config_path {
        Some(path) => BakeConfig::load(Path::new(path))?,
        None => BakeConfig::default(),
    };

    // Name the root so the default name-suffix rule matches.
    let root_name = format!("{model}{}", config.name_suffix);
    let asset_path = format!("{}{model}.fbx", config.file_path);
    let handle = mesh_handle(mesh);
    let root = SceneNode::new(root_name).with_mesh(handle.clone());

    let mut baker = Baker::new(config)?;
    let mut bus = EventBus::with_tracing();
    let report = baker.process(&asset_path, &root, &mut bus);
    bus.finalize();
    print!("{report}");

    let mesh = handle.lock().map_err(|_| "mesh lock poisoned")?;
    if baker.config().write_target.writes_colors() && report.is_success() {
        let lines = normal_lines(&mesh, NormalSource::VertexColor, Mat4::IDENTITY, 1.0)?;
        let max_tilt = lines
            .iter()
            .zip(&mesh.normals)
            .map(|(line, n)| line.direction().angle_between(*n).to_degrees())
            .fold(0.0f32, f32::max);
        println!("Max angle between baked and original normal: {max_tilt:.2}°");
    } else if baker.config().write_target.writes_tangents() {
        println!("Baked into {}; the original tangent frame was overwritten.", baker.config().write_target);
    }

    if let Some(path) = snapshot_path {
        std::fs::write(path, ChannelSnapshot::capture(&mesh).to_json()?)?;
        println!("Snapshot written to: {path}");
    }
    Ok(())
}
