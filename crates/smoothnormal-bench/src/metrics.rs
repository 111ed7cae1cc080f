//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Backend the parallel engine ran on.
    pub backend: String,
    /// Vertex count.
    pub vertex_count: usize,
    /// Triangle count.
    pub triangle_count: usize,
    /// Distinct positions (vertices after merging seams and hard edges).
    pub position_count: usize,
    /// Timed repetitions per engine.
    pub iterations: u32,
    /// Average CPU engine time per run (seconds).
    pub cpu_avg_time: f64,
    /// Fastest CPU engine run (seconds).
    pub cpu_min_time: f64,
    /// Average parallel engine time per run (seconds).
    pub gpu_avg_time: f64,
    /// Fastest parallel engine run (seconds).
    pub gpu_min_time: f64,
    /// Largest component difference between CPU and parallel results.
    pub max_deviation: f32,
    /// Peak device memory held by the parallel engine (bytes).
    pub gpu_peak_bytes: usize,
}

impl BenchmarkMetrics {
    /// CPU average time over parallel average time.
    pub fn speedup(&self) -> f64 {
        if self.gpu_avg_time > 0.0 {
            self.cpu_avg_time / self.gpu_avg_time
        } else {
            0.0
        }
    }

    /// Returns true if the engines agree within `tolerance`.
    pub fn within_tolerance(&self, tolerance: f32) -> bool {
        self.max_deviation <= tolerance
    }

    /// Format as a CSV row (header + data).
    pub fn to_csv_header() -> String {
        "scenario,backend,vertex_count,triangle_count,position_count,iterations,cpu_avg_ms,cpu_min_ms,gpu_avg_ms,gpu_min_ms,speedup,max_deviation,gpu_peak_bytes".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.4},{:.4},{:.4},{:.4},{:.2},{:.3e},{}",
            self.scenario,
            self.backend,
            self.vertex_count,
            self.triangle_count,
            self.position_count,
            self.iterations,
            self.cpu_avg_time * 1000.0,
            self.cpu_min_time * 1000.0,
            self.gpu_avg_time * 1000.0,
            self.gpu_min_time * 1000.0,
            self.speedup(),
            self.max_deviation,
            self.gpu_peak_bytes,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// Format multiple metrics as a pretty-printed JSON array.
    pub fn to_json(metrics: &[BenchmarkMetrics]) -> SmoothNormalResult<String> {
        serde_json::to_string_pretty(metrics).map_err(|e| SmoothNormalError::Serialization(e.to_string()))
    }
}
