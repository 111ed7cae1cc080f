//! Compute backend trait, sequential fallback and thread-pool backend.
//!
//! The [`GpuBackend`] trait defines the interface for allocating buffers
//! and dispatching [`Kernel`]s. [`CpuFallback`] runs every invocation in
//! order on the calling thread and serves as the correctness reference;
//! [`ThreadPoolBackend`] splits the dispatch into workgroups and runs
//! them on a rayon pool.

use std::sync::Arc;

use rayon::prelude::*;
use smoothnormal_types::constants::WORKGROUP_SIZE;
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

use crate::buffers::{ComputeBuffer, MemoryPool, MemoryStats};

/// Number of groups of size `y` needed to cover `x` items.
#[inline]
pub fn div_round_up(x: usize, y: usize) -> usize {
    x.div_ceil(y)
}

/// A data-parallel program with one invocation per output element.
///
/// Invocation `i` receives the `output_stride()` words of output element
/// `i` and must write nothing else. Inputs are read through the kernel's
/// own (shared, immutable) fields, so invocations never race.
pub trait Kernel: Sync {
    /// Kernel name used in logs and errors.
    fn label(&self) -> &str;

    /// Words written per invocation.
    fn output_stride(&self) -> usize;

    /// Runs invocation `invocation`, writing into `out`.
    fn execute(&self, invocation: usize, out: &mut [f32]);
}

/// Trait for compute backends.
///
/// The parallel engine dispatches its stages through this trait, so the
/// same engine code runs sequentially or across threads.
///
/// # Implementations
/// - [`CpuFallback`] — Sequential reference (always available)
/// - [`ThreadPoolBackend`] — Workgroups on a rayon thread pool
pub trait GpuBackend: Send + Sync {
    /// Initialize the backend. Must be called before dispatching.
    fn init(&mut self) -> SmoothNormalResult<()>;

    /// Returns the backend name (e.g., "cpu_fallback", "thread_pool").
    fn name(&self) -> &str;

    /// Returns true if work actually runs in parallel.
    fn is_parallel(&self) -> bool;

    /// Returns the memory pool buffers are allocated from.
    fn memory(&self) -> &Arc<MemoryPool>;

    /// Runs `kernel` once per element of `out`.
    fn dispatch(&self, kernel: &dyn Kernel, out: &mut ComputeBuffer) -> SmoothNormalResult<()>;

    /// Allocates a zero-filled buffer.
    fn create_buffer(
        &self,
        label: &str,
        elements: usize,
        stride: usize,
    ) -> SmoothNormalResult<ComputeBuffer> {
        self.memory().allocate(label, elements, stride)
    }

    /// Allocates a buffer and uploads `data` into it.
    fn upload_f32(&self, label: &str, data: &[f32], stride: usize) -> SmoothNormalResult<ComputeBuffer> {
        let mut buffer = self.create_buffer(label, div_round_up(data.len(), stride), stride)?;
        buffer.copy_from_slice(data)?;
        Ok(buffer)
    }

    /// Allocates a buffer and uploads integer `data` into it.
    fn upload_u32(&self, label: &str, data: &[u32], stride: usize) -> SmoothNormalResult<ComputeBuffer> {
        let mut buffer = self.create_buffer(label, div_round_up(data.len(), stride), stride)?;
        buffer.copy_from_u32(data)?;
        Ok(buffer)
    }

    /// Copies a buffer's contents back to host memory.
    fn read_back(&self, buffer: &ComputeBuffer) -> SmoothNormalResult<Vec<f32>> {
        Ok(buffer.as_slice().to_vec())
    }

    /// Returns current memory usage.
    fn memory_stats(&self) -> MemoryStats {
        self.memory().stats()
    }
}

fn check_dispatch(
    initialized: bool,
    backend: &str,
    kernel: &dyn Kernel,
    out: &ComputeBuffer,
) -> SmoothNormalResult<()> {
    if !initialized {
        return Err(SmoothNormalError::Gpu(format!(
            "Backend '{backend}' dispatched '{}' before init",
            kernel.label()
        )));
    }
    if kernel.output_stride() != out.stride() {
        return Err(SmoothNormalError::Gpu(format!(
            "Kernel '{}' writes {} words per invocation but buffer '{}' has stride {}",
            kernel.label(),
            kernel.output_stride(),
            out.label(),
            out.stride()
        )));
    }
    Ok(())
}

/// CPU fallback backend — sequential reference implementation.
///
/// Always available, used for:
/// - Platforms without a parallel device
/// - Correctness validation (parallel results should match it)
/// - Small meshes where dispatch overhead isn't worthwhile
pub struct CpuFallback {
    initialized: bool,
    memory: Arc<MemoryPool>,
}

impl CpuFallback {
    /// Creates a new CPU fallback backend with unlimited memory.
    pub fn new() -> Self {
        Self {
            initialized: false,
            memory: MemoryPool::unlimited(),
        }
    }

    /// Creates a backend whose buffers may not exceed `bytes` in total.
    pub fn with_memory_limit(bytes: usize) -> Self {
        Self {
            initialized: false,
            memory: MemoryPool::with_limit(bytes),
        }
    }
}

impl Default for CpuFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuBackend for CpuFallback {
    fn init(&mut self) -> SmoothNormalResult<()> {
        self.initialized = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "cpu_fallback"
    }

    fn is_parallel(&self) -> bool {
        false
    }

    fn memory(&self) -> &Arc<MemoryPool> {
        &self.memory
    }

    fn dispatch(&self, kernel: &dyn Kernel, out: &mut ComputeBuffer) -> SmoothNormalResult<()> {
        check_dispatch(self.initialized, self.name(), kernel, out)?;
        let stride = out.stride();
        for (i, slot) in out.as_mut_slice().chunks_mut(stride).enumerate() {
            kernel.execute(i, slot);
        }
        Ok(())
    }
}

/// Thread-pool backend — workgroups of [`WORKGROUP_SIZE`] invocations
/// scheduled on a rayon pool.
///
/// With `threads: None` the global rayon pool is used; otherwise a
/// dedicated pool is built at [`init`](GpuBackend::init).
pub struct ThreadPoolBackend {
    threads: Option<usize>,
    pool: Option<rayon::ThreadPool>,
    initialized: bool,
    memory: Arc<MemoryPool>,
}

impl ThreadPoolBackend {
    /// Creates a backend on the global rayon pool.
    pub fn new() -> Self {
        Self {
            threads: None,
            pool: None,
            initialized: false,
            memory: MemoryPool::unlimited(),
        }
    }

    /// Uses a dedicated pool with `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Limits total buffer memory to `bytes`.
    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory = MemoryPool::with_limit(bytes);
        self
    }

    fn run(&self, kernel: &dyn Kernel, out: &mut ComputeBuffer) {
        let stride = out.stride();
        let group_words = stride * WORKGROUP_SIZE;
        let data = out.as_mut_slice();
        let mut body = move || {
            data.par_chunks_mut(group_words)
                .enumerate()
                .for_each(|(group, words)| {
                    let first = group * WORKGROUP_SIZE;
                    for (local, slot) in words.chunks_mut(stride).enumerate() {
                        kernel.execute(first + local, slot);
                    }
                });
        };
        match &self.pool {
            Some(pool) => pool.install(body),
            None => body(),
        }
    }
}

impl Default for ThreadPoolBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuBackend for ThreadPoolBackend {
    fn init(&mut self) -> SmoothNormalResult<()> {
        if let Some(threads) = self.threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("smoothnormal-worker-{i}"))
                .build()
                .map_err(|e| SmoothNormalError::Gpu(format!("Thread pool creation failed: {e}")))?;
            self.pool = Some(pool);
        }
        self.initialized = true;
        tracing::debug!(
            backend = self.name(),
            threads = self.threads.unwrap_or_else(rayon::current_num_threads),
            "compute backend initialized"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "thread_pool"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn memory(&self) -> &Arc<MemoryPool> {
        &self.memory
    }

    fn dispatch(&self, kernel: &dyn Kernel, out: &mut ComputeBuffer) -> SmoothNormalResult<()> {
        check_dispatch(self.initialized, self.name(), kernel, out)?;
        tracing::trace!(
            kernel = kernel.label(),
            invocations = out.len(),
            workgroups = div_round_up(out.len(), WORKGROUP_SIZE),
            "dispatch"
        );
        self.run(kernel, out);
        Ok(())
    }
}
