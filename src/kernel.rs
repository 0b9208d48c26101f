/*! Accelerated bulk multiply kernels, and selection between them.

Only scalar `f32` and scalar `Complex<f32>` have kernels. Everything
else, including multi-lane constants of those two types, runs the
generic loop in [`MultiplyConstV`][crate::multiply_const::MultiplyConstV].

All kernels produce results bit identical to [`Sample::mul_const`].
*/
use crate::sample::Sample;
use crate::{Complex, Float};

pub mod portable;

#[cfg(all(not(feature = "volk"), target_arch = "x86_64"))]
mod x86;

#[cfg(all(not(feature = "volk"), target_arch = "aarch64"))]
mod neon;

/// Bulk kernel signature.
///
/// Writes `out[i] = input[i] * k` for `i` in `0..n`. Panics if either
/// slice is shorter than `n`.
pub type KernelFn<T> = fn(n: usize, input: &[T], out: &mut [T], k: T);

/// A bulk multiply kernel, and what it prefers in terms of alignment.
pub struct Kernel<T> {
    name: &'static str,
    alignment: usize,
    func: KernelFn<T>,
}

// Derive would require T: Clone.
impl<T> Clone for Kernel<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Kernel<T> {}

impl<T> std::fmt::Debug for Kernel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("alignment", &self.alignment)
            .finish()
    }
}

impl<T> Kernel<T> {
    /// Create a new kernel.
    ///
    /// `alignment` is the buffer alignment, in bytes, the kernel
    /// performs best with.
    pub fn new(name: &'static str, alignment: usize, func: KernelFn<T>) -> Self {
        Self {
            name,
            alignment,
            func,
        }
    }

    /// Backend name, e.g. `avx`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Preferred alignment in bytes.
    #[must_use]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Minimum number of items per call for alignment safe bulk writes.
    #[must_use]
    pub fn output_multiple(&self) -> usize {
        std::cmp::max(1, self.alignment / std::mem::size_of::<T>())
    }

    /// Run the kernel over `n` elements.
    pub fn call(&self, n: usize, input: &[T], out: &mut [T], k: T) {
        (self.func)(n, input, out, k)
    }
}

/// Kernel selection per sample type.
pub trait Dispatch: Sample {
    /// Return the accelerated kernel for this type, if there is one.
    #[must_use]
    fn kernel() -> Option<Kernel<Self>> {
        None
    }
}

impl Dispatch for Float {
    fn kernel() -> Option<Kernel<Self>> {
        Some(select_f32())
    }
}

impl Dispatch for Complex {
    fn kernel() -> Option<Kernel<Self>> {
        Some(select_fc32())
    }
}

impl Dispatch for f64 {}
impl Dispatch for num_complex::Complex<f64> {}
impl Dispatch for i8 {}
impl Dispatch for i16 {}
impl Dispatch for i32 {}
impl Dispatch for num_complex::Complex<i8> {}
impl Dispatch for num_complex::Complex<i16> {}
impl Dispatch for num_complex::Complex<i32> {}

/// Select a kernel for `lanes` constants of type `T`.
///
/// Multi-lane constants are never accelerated.
#[must_use]
pub fn select<T: Dispatch>(lanes: usize) -> Option<Kernel<T>> {
    if lanes != 1 {
        return None;
    }
    T::kernel()
}

/// Name of the backend that [`select`] uses on this host.
#[must_use]
pub fn backend_name() -> &'static str {
    select_f32().name()
}

#[cfg(feature = "volk")]
fn select_f32() -> Kernel<Float> {
    crate::volk::f32_kernel()
}

#[cfg(feature = "volk")]
fn select_fc32() -> Kernel<Complex> {
    crate::volk::fc32_kernel()
}

#[cfg(all(not(feature = "volk"), target_arch = "x86_64"))]
fn select_f32() -> Kernel<Float> {
    if is_x86_feature_detected!("avx") {
        Kernel::new("avx", 32, x86::mul_f32_avx)
    } else {
        Kernel::new("sse", 16, x86::mul_f32_sse)
    }
}

#[cfg(all(not(feature = "volk"), target_arch = "x86_64"))]
fn select_fc32() -> Kernel<Complex> {
    if is_x86_feature_detected!("avx") {
        Kernel::new("avx", 32, x86::mul_fc32_avx)
    } else {
        Kernel::new("sse", 16, x86::mul_fc32_sse)
    }
}

#[cfg(all(not(feature = "volk"), target_arch = "aarch64"))]
fn select_f32() -> Kernel<Float> {
    Kernel::new("neon", 16, neon::mul_f32)
}

#[cfg(all(not(feature = "volk"), target_arch = "aarch64"))]
fn select_fc32() -> Kernel<Complex> {
    Kernel::new("neon", 16, neon::mul_fc32)
}

#[cfg(not(any(feature = "volk", target_arch = "x86_64", target_arch = "aarch64")))]
fn select_f32() -> Kernel<Float> {
    Kernel::new("unrolled", 32, portable::mul_unrolled)
}

#[cfg(not(any(feature = "volk", target_arch = "x86_64", target_arch = "aarch64")))]
fn select_fc32() -> Kernel<Complex> {
    Kernel::new("unrolled", 32, portable::mul_unrolled)
}
