//! SSE and AVX kernels.
//!
//! Loads and stores are unaligned, so any slice is fine. Aligned
//! buffers are still faster.
//!
//! Complex multiply is done as `a*kr + swap(a)*ki`, with the sign of
//! the real lanes of the second product flipped. `x + (-y)` is the same
//! IEEE operation as `x - y`, so this is bit identical to the scalar
//! formula.
use std::arch::x86_64::*;

use super::portable::mul_tail;
use crate::{Complex, Float};

/// SSE `f32` kernel. SSE is part of the x86_64 baseline.
pub(super) fn mul_f32_sse(n: usize, input: &[Float], out: &mut [Float], k: Float) {
    let input = &input[..n];
    let out = &mut out[..n];
    let body = n - n % 4;
    // SAFETY: SSE is always available on x86_64, and all accesses are
    // within `body`, which is no longer than either slice.
    unsafe {
        let kv = _mm_set1_ps(k);
        let ip = input.as_ptr();
        let op = out.as_mut_ptr();
        let mut i = 0;
        while i < body {
            let a = _mm_loadu_ps(ip.add(i));
            _mm_storeu_ps(op.add(i), _mm_mul_ps(a, kv));
            i += 4;
        }
    }
    mul_tail(&input[body..], &mut out[body..], k);
}

/// SSE `Complex<f32>` kernel, two samples at a time.
pub(super) fn mul_fc32_sse(n: usize, input: &[Complex], out: &mut [Complex], k: Complex) {
    let input = &input[..n];
    let out = &mut out[..n];
    let body = n - n % 2;
    // SAFETY: SSE is always available on x86_64. `Complex` is
    // `repr(C)` of two floats, so `body` samples are `2*body` floats,
    // which fit in both slices.
    unsafe {
        let kr = _mm_set1_ps(k.re);
        let ki = _mm_set1_ps(k.im);
        let sign = _mm_setr_ps(-0.0, 0.0, -0.0, 0.0);
        let ip = input.as_ptr() as *const f32;
        let op = out.as_mut_ptr() as *mut f32;
        let mut i = 0;
        while i < body {
            let a = _mm_loadu_ps(ip.add(2 * i));
            let swapped = _mm_shuffle_ps::<0b1011_0001>(a, a);
            let re = _mm_mul_ps(a, kr);
            let im = _mm_xor_ps(_mm_mul_ps(swapped, ki), sign);
            _mm_storeu_ps(op.add(2 * i), _mm_add_ps(re, im));
            i += 2;
        }
    }
    mul_tail(&input[body..], &mut out[body..], k);
}

/// AVX `f32` kernel.
///
/// Only selected after `is_x86_feature_detected!("avx")`.
pub(super) fn mul_f32_avx(n: usize, input: &[Float], out: &mut [Float], k: Float) {
    let input = &input[..n];
    let out = &mut out[..n];
    // SAFETY: AVX presence checked at kernel selection.
    unsafe { mul_f32_avx_inner(input, out, k) }
}

/// AVX `Complex<f32>` kernel, four samples at a time.
///
/// Only selected after `is_x86_feature_detected!("avx")`.
pub(super) fn mul_fc32_avx(n: usize, input: &[Complex], out: &mut [Complex], k: Complex) {
    let input = &input[..n];
    let out = &mut out[..n];
    // SAFETY: AVX presence checked at kernel selection.
    unsafe { mul_fc32_avx_inner(input, out, k) }
}

/// # Safety
///
/// CPU must support AVX. `input` and `out` must be the same length.
#[target_feature(enable = "avx")]
unsafe fn mul_f32_avx_inner(input: &[Float], out: &mut [Float], k: Float) {
    let n = input.len();
    let body = n - n % 8;
    // SAFETY: accesses stay within `body`, no longer than either slice.
    unsafe {
        let kv = _mm256_set1_ps(k);
        let ip = input.as_ptr();
        let op = out.as_mut_ptr();
        let mut i = 0;
        while i < body {
            let a = _mm256_loadu_ps(ip.add(i));
            _mm256_storeu_ps(op.add(i), _mm256_mul_ps(a, kv));
            i += 8;
        }
    }
    mul_tail(&input[body..], &mut out[body..], k);
}

/// # Safety
///
/// CPU must support AVX. `input` and `out` must be the same length.
#[target_feature(enable = "avx")]
unsafe fn mul_fc32_avx_inner(input: &[Complex], out: &mut [Complex], k: Complex) {
    let n = input.len();
    let body = n - n % 4;
    // SAFETY: `body` samples are `2*body` floats, which fit in both
    // slices.
    unsafe {
        let kr = _mm256_set1_ps(k.re);
        let ki = _mm256_set1_ps(k.im);
        let sign = _mm256_setr_ps(-0.0, 0.0, -0.0, 0.0, -0.0, 0.0, -0.0, 0.0);
        let ip = input.as_ptr() as *const f32;
        let op = out.as_mut_ptr() as *mut f32;
        let mut i = 0;
        while i < body {
            let a = _mm256_loadu_ps(ip.add(2 * i));
            let swapped = _mm256_permute_ps::<0b1011_0001>(a);
            let re = _mm256_mul_ps(a, kr);
            let im = _mm256_xor_ps(_mm256_mul_ps(swapped, ki), sign);
            _mm256_storeu_ps(op.add(2 * i), _mm256_add_ps(re, im));
            i += 4;
        }
    }
    mul_tail(&input[body..], &mut out[body..], k);
}
