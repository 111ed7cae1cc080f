//! Integration tests for smoothnormal-gpu.

use smoothnormal_gpu::backend::{div_round_up, CpuFallback, GpuBackend, Kernel, ThreadPoolBackend};
use smoothnormal_gpu::buffers::{ComputeBuffer, MemoryPool};
use smoothnormal_types::SmoothNormalError;

/// Writes `[i, i * scale]` for invocation `i`.
struct RampKernel {
    scale: f32,
}

impl Kernel for RampKernel {
    fn label(&self) -> &str {
        "ramp"
    }

    fn output_stride(&self) -> usize {
        2
    }

    fn execute(&self, invocation: usize, out: &mut [f32]) {
        out[0] = invocation as f32;
        out[1] = invocation as f32 * self.scale;
    }
}

/// Sums a shared input buffer into every slot.
struct SumKernel<'a> {
    input: &'a [f32],
}

impl Kernel for SumKernel<'_> {
    fn label(&self) -> &str {
        "sum"
    }

    fn output_stride(&self) -> usize {
        1
    }

    fn execute(&self, invocation: usize, out: &mut [f32]) {
        out[0] = self.input.iter().sum::<f32>() + invocation as f32;
    }
}

// ─── Buffer Tests ─────────────────────────────────────────────

#[test]
fn buffer_zeros() {
    let buf = ComputeBuffer::zeros(100);
    assert_eq!(buf.len(), 100);
    assert_eq!(buf.stride(), 1);
    assert!(buf.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn buffer_from_data() {
    let buf = ComputeBuffer::from_data(vec![1.0, 2.0, 3.0]);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0]);
}

#[test]
fn buffer_copy_overflow_is_error() {
    let mut buf = ComputeBuffer::zeros(2);
    assert!(buf.copy_from_slice(&[1.0, 2.0, 3.0]).is_err());
}

#[test]
fn buffer_u32_is_bit_cast() {
    let pool = MemoryPool::unlimited();
    let mut buf = pool.allocate("indices", 3, 1).unwrap();
    buf.copy_from_u32(&[0, 7, u32::MAX]).unwrap();
    let words: Vec<u32> = buf.as_slice().iter().map(|w| w.to_bits()).collect();
    assert_eq!(words, vec![0, 7, u32::MAX]);
}

#[test]
fn strided_elements() {
    let pool = MemoryPool::unlimited();
    let mut buf = pool.allocate("vec4", 2, 4).unwrap();
    buf.copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
    assert_eq!(buf.len(), 2);
    assert_eq!(buf.size_bytes(), 32);
    assert_eq!(buf.element(1), &[5.0, 6.0, 7.0, 8.0]);
}

// ─── Memory Pool Tests ────────────────────────────────────────

#[test]
fn pool_tracks_and_releases() {
    let pool = MemoryPool::unlimited();
    {
        let _a = pool.allocate("a", 16, 4).unwrap();
        let _b = pool.allocate("b", 8, 1).unwrap();
        let stats = pool.stats();
        assert_eq!(stats.live_buffers, 2);
        assert_eq!(stats.bytes_in_use, (64 + 8) * 4);
    }
    let stats = pool.stats();
    assert_eq!(stats.live_buffers, 0);
    assert_eq!(stats.bytes_in_use, 0);
    assert_eq!(stats.peak_bytes, (64 + 8) * 4);
}

#[test]
fn pool_limit_refuses_allocation() {
    let pool = MemoryPool::with_limit(64);
    let _a = pool.allocate("a", 8, 1).unwrap();
    let err = pool.allocate("b", 16, 1).unwrap_err();
    match err {
        SmoothNormalError::BufferAllocation {
            label,
            requested,
            available,
        } => {
            assert_eq!(label, "b");
            assert_eq!(requested, 64);
            assert_eq!(available, 32);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(pool.stats().live_buffers, 1);
}

#[test]
fn zero_stride_is_error() {
    let pool = MemoryPool::unlimited();
    assert!(pool.allocate("bad", 4, 0).is_err());
}

// ─── Backend Tests ────────────────────────────────────────────

#[test]
fn div_round_up_values() {
    assert_eq!(div_round_up(0, 64), 0);
    assert_eq!(div_round_up(1, 64), 1);
    assert_eq!(div_round_up(64, 64), 1);
    assert_eq!(div_round_up(65, 64), 2);
}

#[test]
fn cpu_init() {
    let mut backend = CpuFallback::new();
    assert!(backend.init().is_ok());
    assert_eq!(backend.name(), "cpu_fallback");
    assert!(!backend.is_parallel());
}

#[test]
fn dispatch_before_init_fails() {
    let backend = CpuFallback::new();
    let mut out = backend.create_buffer("out", 4, 2).unwrap();
    assert!(backend.dispatch(&RampKernel { scale: 1.0 }, &mut out).is_err());
}

#[test]
fn stride_mismatch_fails() {
    let mut backend = CpuFallback::new();
    backend.init().unwrap();
    let mut out = backend.create_buffer("out", 4, 3).unwrap();
    assert!(backend.dispatch(&RampKernel { scale: 1.0 }, &mut out).is_err());
}

#[test]
fn cpu_dispatch() {
    let mut backend = CpuFallback::new();
    backend.init().unwrap();
    let mut out = backend.create_buffer("out", 3, 2).unwrap();
    backend.dispatch(&RampKernel { scale: 2.0 }, &mut out).unwrap();
    assert_eq!(out.as_slice(), &[0.0, 0.0, 1.0, 2.0, 2.0, 4.0]);
}

#[test]
fn thread_pool_matches_cpu() {
    let mut cpu = CpuFallback::new();
    cpu.init().unwrap();
    let mut pool = ThreadPoolBackend::new().with_threads(4);
    pool.init().unwrap();
    assert!(pool.is_parallel());

    // Not a multiple of the workgroup size.
    let n = 1000;
    let mut a = cpu.create_buffer("a", n, 2).unwrap();
    let mut b = pool.create_buffer("b", n, 2).unwrap();
    cpu.dispatch(&RampKernel { scale: 0.5 }, &mut a).unwrap();
    pool.dispatch(&RampKernel { scale: 0.5 }, &mut b).unwrap();
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn global_and_dedicated_pools_cover_partial_workgroups() {
    let mut cpu = CpuFallback::new();
    cpu.init().unwrap();
    let mut expected = cpu.create_buffer("expected", 129, 2).unwrap();
    cpu.dispatch(&RampKernel { scale: 3.0 }, &mut expected).unwrap();

    let mut global = ThreadPoolBackend::new();
    global.init().unwrap();
    let mut dedicated = ThreadPoolBackend::new().with_threads(2);
    dedicated.init().unwrap();
    for backend in [&global, &dedicated] {
        let mut out = backend.create_buffer("out", 129, 2).unwrap();
        backend.dispatch(&RampKernel { scale: 3.0 }, &mut out).unwrap();
        assert_eq!(out.as_slice(), expected.as_slice());
    }
}

#[test]
fn kernels_read_shared_input() {
    let mut backend = ThreadPoolBackend::new();
    backend.init().unwrap();
    let input = backend.upload_f32("input", &[1.0, 2.0, 3.0], 1).unwrap();
    let mut out = backend.create_buffer("out", 130, 1).unwrap();
    let kernel = SumKernel {
        input: input.as_slice(),
    };
    backend.dispatch(&kernel, &mut out).unwrap();
    let result = backend.read_back(&out).unwrap();
    assert_eq!(result[0], 6.0);
    assert_eq!(result[129], 135.0);
}

#[test]
fn backend_memory_limit() {
    let mut backend = CpuFallback::with_memory_limit(16);
    backend.init().unwrap();
    assert!(backend.create_buffer("small", 4, 1).is_ok());
    assert!(backend.create_buffer("large", 5, 1).is_err());
    assert_eq!(backend.memory_stats().live_buffers, 0);
}
