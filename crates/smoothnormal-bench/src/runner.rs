//! Benchmark runner — times both engines on a scenario and compares results.

use std::time::Instant;

use smoothnormal_engine::{CpuEngine, GpuEngine, SmoothNormalEngine};
use smoothnormal_math::{NormalRange, Vec3};
use smoothnormal_mesh::PositionAdjacency;
use smoothnormal_types::SmoothNormalResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

struct Timing {
    avg: f64,
    min: f64,
    result: Vec<Vec3>,
}

impl BenchmarkRunner {
    /// Run a single scenario with the CPU engine and `gpu`.
    ///
    /// Adjacency is built once, outside the timed region, and shared by
    /// both engines. Returns metrics for the completed run.
    pub fn run(scenario: &Scenario, gpu: &GpuEngine) -> SmoothNormalResult<BenchmarkMetrics> {
        scenario.mesh.validate()?;
        let adjacency = PositionAdjacency::build(&scenario.mesh);
        let iterations = scenario.iterations.max(1);

        let cpu = Self::time(&CpuEngine::new(), scenario, &adjacency, iterations)?;
        let par = Self::time(gpu, scenario, &adjacency, iterations)?;

        let max_deviation = cpu
            .result
            .iter()
            .zip(&par.result)
            .map(|(a, b)| (*a - *b).abs().max_element())
            .fold(0.0f32, f32::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            backend: gpu.backend().name().to_string(),
            vertex_count: scenario.mesh.vertex_count(),
            triangle_count: scenario.mesh.triangle_count(),
            position_count: adjacency.position_count(),
            iterations,
            cpu_avg_time: cpu.avg,
            cpu_min_time: cpu.min,
            gpu_avg_time: par.avg,
            gpu_min_time: par.min,
            max_deviation,
            gpu_peak_bytes: gpu.backend().memory_stats().peak_bytes,
        };
        tracing::info!(
            scenario = %metrics.scenario,
            vertices = metrics.vertex_count,
            cpu_ms = metrics.cpu_avg_time * 1000.0,
            gpu_ms = metrics.gpu_avg_time * 1000.0,
            max_deviation = metrics.max_deviation,
            "benchmark scenario complete"
        );
        Ok(metrics)
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(gpu: &GpuEngine) -> SmoothNormalResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            results.push(Self::run(&scenario, gpu)?);
        }
        Ok(results)
    }

    fn time(
        engine: &dyn SmoothNormalEngine,
        scenario: &Scenario,
        adjacency: &PositionAdjacency,
        iterations: u32,
    ) -> SmoothNormalResult<Timing> {
        let mut total = 0.0;
        let mut min = f64::MAX;
        let mut result = Vec::new();
        for _ in 0..iterations {
            let start = Instant::now();
            result = engine.compute_with_adjacency(&scenario.mesh, adjacency, NormalRange::Color)?;
            let elapsed = start.elapsed().as_secs_f64();
            total += elapsed;
            min = min.min(elapsed);
        }
        Ok(Timing {
            avg: total / f64::from(iterations),
            min,
            result,
        })
    }
}
