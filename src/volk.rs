/*! volk FFI wrapper.

Uses the dispatching entry points rather than the `_a` ones, since
they check alignment themselves and are therefore sound for any slice.
 */
use libc::c_uint;

use crate::kernel::Kernel;
use crate::{Complex, Float};

#[allow(non_camel_case_types, non_upper_case_globals)]
mod volk_ffi;

/// Alignment volk prefers, in bytes.
#[must_use]
pub fn alignment() -> usize {
    // SAFETY: no arguments, returns a plain integer.
    unsafe { volk_ffi::volk_get_alignment() }
}

/// volk_32f_s32f_multiply_32f()
pub fn volk_32f_s32f_multiply_32f(n: usize, input: &[Float], out: &mut [Float], k: Float) {
    let input = &input[..n];
    let out = &mut out[..n];
    // SAFETY: both buffers are at least `n` long.
    unsafe {
        volk_ffi::volk_32f_s32f_multiply_32f(out.as_mut_ptr(), input.as_ptr(), k, n as c_uint);
    }
}

/// volk_32fc_s32fc_multiply_32fc()
pub fn volk_32fc_s32fc_multiply_32fc(
    n: usize,
    input: &[Complex],
    out: &mut [Complex],
    k: Complex,
) {
    let input = &input[..n];
    let out = &mut out[..n];
    // SAFETY: both buffers are at least `n` long.
    unsafe {
        volk_ffi::volk_32fc_s32fc_multiply_32fc(out.as_mut_ptr(), input.as_ptr(), k, n as c_uint);
    }
}

pub(crate) fn f32_kernel() -> Kernel<Float> {
    Kernel::new("volk", alignment(), volk_32f_s32f_multiply_32f)
}

pub(crate) fn fc32_kernel() -> Kernel<Complex> {
    Kernel::new("volk", alignment(), volk_32fc_s32fc_multiply_32fc)
}
