//! # smoothnormal-bench
//!
//! Benchmark suite for the smooth-normal engines.
//!
//! Provides procedural benchmark scenarios, a runner that times the CPU
//! and parallel engines on the same mesh and measures how far their
//! results drift apart, and CSV/JSON export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
