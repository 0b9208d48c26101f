//! NEON kernels. NEON is part of the aarch64 baseline.
use std::arch::aarch64::*;

use super::portable::mul_tail;
use crate::{Complex, Float};

pub(super) fn mul_f32(n: usize, input: &[Float], out: &mut [Float], k: Float) {
    let input = &input[..n];
    let out = &mut out[..n];
    let body = n - n % 4;
    // SAFETY: accesses stay within `body`, no longer than either slice.
    unsafe {
        let kv = vdupq_n_f32(k);
        let ip = input.as_ptr();
        let op = out.as_mut_ptr();
        let mut i = 0;
        while i < body {
            let a = vld1q_f32(ip.add(i));
            vst1q_f32(op.add(i), vmulq_f32(a, kv));
            i += 4;
        }
    }
    mul_tail(&input[body..], &mut out[body..], k);
}

/// Same trick as the x86 kernel: `a*kr + swap(a)*ki`, real lanes of
/// the second product negated.
pub(super) fn mul_fc32(n: usize, input: &[Complex], out: &mut [Complex], k: Complex) {
    let input = &input[..n];
    let out = &mut out[..n];
    let body = n - n % 2;
    let sign_bits: [u32; 4] = [0x8000_0000, 0, 0x8000_0000, 0];
    // SAFETY: `Complex` is `repr(C)` of two floats, so `body` samples
    // are `2*body` floats, which fit in both slices.
    unsafe {
        let sign = vld1q_u32(sign_bits.as_ptr());
        let ip = input.as_ptr() as *const f32;
        let op = out.as_mut_ptr() as *mut f32;
        let mut i = 0;
        while i < body {
            let a = vld1q_f32(ip.add(2 * i));
            let swapped = vrev64q_f32(a);
            let re = vmulq_n_f32(a, k.re);
            let im = vreinterpretq_f32_u32(veorq_u32(
                vreinterpretq_u32_f32(vmulq_n_f32(swapped, k.im)),
                sign,
            ));
            vst1q_f32(op.add(2 * i), vaddq_f32(re, im));
            i += 2;
        }
    }
    mul_tail(&input[body..], &mut out[body..], k);
}
