//! Compute buffers and device memory accounting.
//!
//! A [`ComputeBuffer`] is a flat array of 32-bit words viewed as `f32`,
//! with a fixed number of words per element (its stride). Integer data
//! is stored bit-cast, the way shaders read it with `asuint`.
//!
//! Buffers created through a [`MemoryPool`] hold a reservation against
//! the pool's budget and return it on drop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

const WORD_BYTES: usize = std::mem::size_of::<f32>();

/// Snapshot of a pool's usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStats {
    /// Bytes currently reserved by live buffers.
    pub bytes_in_use: usize,
    /// Number of live buffers.
    pub live_buffers: usize,
    /// Highest `bytes_in_use` observed.
    pub peak_bytes: usize,
}

/// Device memory budget shared by all buffers of one backend.
#[derive(Debug, Default)]
pub struct MemoryPool {
    limit: Option<usize>,
    in_use: AtomicUsize,
    live: AtomicUsize,
    peak: AtomicUsize,
}

impl MemoryPool {
    /// Creates a pool with no size limit.
    pub fn unlimited() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a pool that refuses allocations beyond `limit` bytes in total.
    pub fn with_limit(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            limit: Some(limit),
            ..Self::default()
        })
    }

    /// Returns the configured limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns current usage.
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            bytes_in_use: self.in_use.load(Ordering::Acquire),
            live_buffers: self.live.load(Ordering::Acquire),
            peak_bytes: self.peak.load(Ordering::Acquire),
        }
    }

    /// Allocates a zero-filled buffer of `elements × stride` words.
    pub fn allocate(
        self: &Arc<Self>,
        label: &str,
        elements: usize,
        stride: usize,
    ) -> SmoothNormalResult<ComputeBuffer> {
        if stride == 0 {
            return Err(SmoothNormalError::Gpu(format!(
                "Buffer '{label}' has zero stride"
            )));
        }
        let words = elements.checked_mul(stride).ok_or_else(|| {
            SmoothNormalError::Gpu(format!("Buffer '{label}' size overflows"))
        })?;
        let bytes = words * WORD_BYTES;
        self.reserve(label, bytes)?;

        Ok(ComputeBuffer {
            label: label.to_string(),
            data: vec![0.0; words],
            stride,
            reservation: Some((Arc::clone(self), bytes)),
        })
    }

    fn reserve(&self, label: &str, bytes: usize) -> SmoothNormalResult<()> {
        let mut current = self.in_use.load(Ordering::Acquire);
        loop {
            let next = current.saturating_add(bytes);
            if let Some(limit) = self.limit {
                if next > limit {
                    return Err(SmoothNormalError::BufferAllocation {
                        label: label.to_string(),
                        requested: bytes,
                        available: limit.saturating_sub(current),
                    });
                }
            }
            match self
                .in_use
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    self.live.fetch_add(1, Ordering::AcqRel);
                    self.peak.fetch_max(next, Ordering::AcqRel);
                    return Ok(());
                }
                Err(actual) => current = actual,
            }
        }
    }

    fn release(&self, bytes: usize) {
        self.in_use.fetch_sub(bytes, Ordering::AcqRel);
        self.live.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A compute buffer of `len()` elements, `stride()` words each.
///
/// Not `Clone`: a buffer owns its reservation and releases it exactly once.
#[derive(Debug)]
pub struct ComputeBuffer {
    label: String,
    data: Vec<f32>,
    stride: usize,
    reservation: Option<(Arc<MemoryPool>, usize)>,
}

impl ComputeBuffer {
    /// Creates an untracked buffer of `len` scalar elements filled with zeros.
    pub fn zeros(len: usize) -> Self {
        Self::from_data(vec![0.0; len])
    }

    /// Creates an untracked scalar buffer from existing data.
    pub fn from_data(data: Vec<f32>) -> Self {
        Self {
            label: String::new(),
            data,
            stride: 1,
            reservation: None,
        }
    }

    /// Returns the buffer label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of elements (not words, not bytes).
    pub fn len(&self) -> usize {
        self.data.len() / self.stride
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of 32-bit words per element.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len() * WORD_BYTES
    }

    /// Returns the words as floats.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the words as mutable floats.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns element `i` as a slice of `stride` words.
    pub fn element(&self, i: usize) -> &[f32] {
        &self.data[i * self.stride..(i + 1) * self.stride]
    }

    /// Copies floats into the start of the buffer.
    pub fn copy_from_slice(&mut self, src: &[f32]) -> SmoothNormalResult<()> {
        if src.len() > self.data.len() {
            return Err(SmoothNormalError::Gpu(format!(
                "Upload of {} words overflows buffer '{}' ({} words)",
                src.len(),
                self.label,
                self.data.len()
            )));
        }
        self.data[..src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Copies integers into the start of the buffer, bit-cast to words.
    pub fn copy_from_u32(&mut self, src: &[u32]) -> SmoothNormalResult<()> {
        if src.len() > self.data.len() {
            return Err(SmoothNormalError::Gpu(format!(
                "Upload of {} words overflows buffer '{}' ({} words)",
                src.len(),
                self.label,
                self.data.len()
            )));
        }
        for (dst, &word) in self.data.iter_mut().zip(src) {
            *dst = f32::from_bits(word);
        }
        Ok(())
    }
}

impl Drop for ComputeBuffer {
    fn drop(&mut self) {
        if let Some((pool, bytes)) = self.reservation.take() {
            pool.release(bytes);
        }
    }
}
