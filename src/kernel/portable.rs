//! Architecture independent kernel.
use crate::sample::Sample;

const UNROLL: usize = 8;

/// Multiply in fixed size blocks, leaving the vectorizing to the compiler.
pub fn mul_unrolled<T: Sample>(n: usize, input: &[T], out: &mut [T], k: T) {
    let input = &input[..n];
    let out = &mut out[..n];
    let mut oc = out.chunks_exact_mut(UNROLL);
    let mut ic = input.chunks_exact(UNROLL);
    for (o, i) in (&mut oc).zip(&mut ic) {
        for j in 0..UNROLL {
            o[j] = i[j].mul_const(k);
        }
    }
    oc.into_remainder()
        .iter_mut()
        .zip(ic.remainder())
        .for_each(|(o, i)| *o = i.mul_const(k));
}

/// Scalar tail shared by the SIMD kernels.
#[allow(dead_code)]
pub(crate) fn mul_tail<T: Sample>(input: &[T], out: &mut [T], k: T) {
    out.iter_mut()
        .zip(input)
        .for_each(|(o, i)| *o = i.mul_const(k));
}
