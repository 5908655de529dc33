// Vectorized SAXPY with explicit SIMD intrinsics.
//
// Every lane does an unfused multiply followed by an add, so results match
// the scalar loop bit for bit. No FMA.

use crate::{SaxpyKernel, assert_slice_lengths, saxpy_into};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Lanes processed per step by the portable fallback.
#[cfg(not(target_arch = "x86_64"))]
const PORTABLE_LANES: usize = 8;

/// SIMD kernel. On x86-64 it uses AVX when the CPU supports it and SSE
/// (always present on x86-64) otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Simd {
    use_avx: bool,
}

impl Simd {
    /// Detects the available instruction set once.
    pub fn new() -> Self {
        #[cfg(target_arch = "x86_64")]
        let use_avx = is_x86_feature_detected!("avx");
        #[cfg(not(target_arch = "x86_64"))]
        let use_avx = false;

        Self { use_avx }
    }

    /// Name of the instruction set in use.
    pub fn instruction_set(&self) -> &'static str {
        if cfg!(target_arch = "x86_64") {
            if self.use_avx { "avx" } else { "sse" }
        } else {
            "portable"
        }
    }
}

impl Default for Simd {
    fn default() -> Self {
        Self::new()
    }
}

impl SaxpyKernel for Simd {
    fn name(&self) -> &'static str {
        "simd"
    }

    fn is_native(&self) -> bool {
        cfg!(target_arch = "x86_64")
    }

    fn apply(&self, a: f32, x: &[f32], y: &[f32], z: &mut [f32]) {
        assert_slice_lengths(x, y, z);

        #[cfg(target_arch = "x86_64")]
        {
            // SAFETY: lengths were checked above, and AVX is only used when
            // the CPU reported it; SSE is part of the x86-64 baseline.
            let done = unsafe {
                if self.use_avx {
                    saxpy_avx(a, x, y, z)
                } else {
                    saxpy_sse(a, x, y, z)
                }
            };
            saxpy_into(a, &x[done..], &y[done..], &mut z[done..]);
        }

        #[cfg(not(target_arch = "x86_64"))]
        saxpy_portable(a, x, y, z);
    }
}

/// Processes the largest multiple of 8 elements and returns how many were done.
///
/// # Safety
///
/// The CPU must support AVX and the three slices must have equal lengths.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
unsafe fn saxpy_avx(a: f32, x: &[f32], y: &[f32], z: &mut [f32]) -> usize {
    let blocks = z.len() / 8;

    unsafe {
        let va = _mm256_set1_ps(a);
        for i in 0..blocks {
            let idx = i * 8;
            let vx = _mm256_loadu_ps(x.as_ptr().add(idx));
            let vy = _mm256_loadu_ps(y.as_ptr().add(idx));
            let vz = _mm256_add_ps(_mm256_mul_ps(va, vx), vy);
            _mm256_storeu_ps(z.as_mut_ptr().add(idx), vz);
        }
    }

    blocks * 8
}

/// Processes the largest multiple of 4 elements and returns how many were done.
///
/// # Safety
///
/// The three slices must have equal lengths.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse")]
unsafe fn saxpy_sse(a: f32, x: &[f32], y: &[f32], z: &mut [f32]) -> usize {
    let blocks = z.len() / 4;

    unsafe {
        let va = _mm_set1_ps(a);
        for i in 0..blocks {
            let idx = i * 4;
            let vx = _mm_loadu_ps(x.as_ptr().add(idx));
            let vy = _mm_loadu_ps(y.as_ptr().add(idx));
            let vz = _mm_add_ps(_mm_mul_ps(va, vx), vy);
            _mm_storeu_ps(z.as_mut_ptr().add(idx), vz);
        }
    }

    blocks * 4
}

// fixed-width chunks the compiler can vectorize for the target
#[cfg(not(target_arch = "x86_64"))]
fn saxpy_portable(a: f32, x: &[f32], y: &[f32], z: &mut [f32]) {
    let mut z_chunks = z.chunks_exact_mut(PORTABLE_LANES);
    let mut x_chunks = x.chunks_exact(PORTABLE_LANES);
    let mut y_chunks = y.chunks_exact(PORTABLE_LANES);

    for ((z, x), y) in (&mut z_chunks).zip(&mut x_chunks).zip(&mut y_chunks) {
        for lane in 0..PORTABLE_LANES {
            z[lane] = a * x[lane] + y[lane];
        }
    }

    saxpy_into(
        a,
        x_chunks.remainder(),
        y_chunks.remainder(),
        z_chunks.into_remainder(),
    );
}
