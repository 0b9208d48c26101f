/*! Raw volk bindings.
 */
/*
This file should probably be generated.
*/
use libc::{c_float, c_uint, size_t};

use crate::Complex;

type t_volk_32f_s32f_multiply_32f =
    unsafe extern "C" fn(*mut c_float, *const c_float, c_float, c_uint);

// lv_32fc_t is C99 `float _Complex`, same ABI as a repr(C) pair of floats.
type t_volk_32fc_s32fc_multiply_32fc =
    unsafe extern "C" fn(*mut Complex, *const Complex, Complex, c_uint);

#[link(name = "volk")]
unsafe extern "C" {
    pub fn volk_get_alignment() -> size_t;
    pub static volk_32f_s32f_multiply_32f: t_volk_32f_s32f_multiply_32f;
    pub static volk_32fc_s32fc_multiply_32fc: t_volk_32fc_s32fc_multiply_32fc;
}
