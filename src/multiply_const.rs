/*! Multiply stream by a constant value, or a vector of constants.

With one constant every sample is multiplied by it. With `L` constants
the stream is made up of frames of `L` samples, and lane `i` of every
frame is multiplied by constant `i`.

Constants are kept in canonical `Complex<f64>` form, and converted to
the working sample type whenever they change.

# Example

```
use constmul::blocks::MultiplyConstV;
use constmul::Complex;

let mul = MultiplyConstV::scalar(Complex::new(0.0, 1.0));
let input = vec![Complex::new(1.0, 0.0); 16];
let mut out = vec![Complex::default(); 16];
assert_eq!(mul.multiply(16, &input, &mut out), 16);
assert_eq!(out[0], Complex::new(0.0, 1.0));
```
*/
use log::{debug, trace};

use crate::block::{Block, IoSignature, SyncBlock};
use crate::kernel::{self, Dispatch, Kernel};
use crate::{Canonical, Error, Result};

/// Kernel policy for [`MultiplyConstBuilder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KernelChoice {
    /// Use an accelerated kernel if one exists for the type.
    #[default]
    Auto,

    /// Always use the generic loop.
    Generic,
}

/// Builder for MultiplyConstV.
pub struct MultiplyConstBuilder<T> {
    consts: Vec<Canonical>,
    name: Option<String>,
    kernel: KernelChoice,
    dummy: std::marker::PhantomData<T>,
}

impl<T: Dispatch> MultiplyConstBuilder<T> {
    /// Create new builder from canonical constants.
    pub fn new(consts: Vec<Canonical>) -> Self {
        Self {
            consts,
            name: None,
            kernel: KernelChoice::Auto,
            dummy: std::marker::PhantomData,
        }
    }

    /// Create new builder from working type constants.
    pub fn from_values(vals: &[T]) -> Self {
        Self::new(vals.iter().map(|v| v.to_canonical()).collect())
    }

    /// Set name.
    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set kernel policy.
    pub fn kernel(mut self, kernel: KernelChoice) -> Self {
        self.kernel = kernel;
        self
    }

    /// Build MultiplyConstV.
    ///
    /// # Panics
    ///
    /// Panics if no constants were given.
    pub fn build(self) -> MultiplyConstV<T> {
        let kernel = match self.kernel {
            KernelChoice::Auto => kernel::select::<T>(self.consts.len()),
            KernelChoice::Generic => None,
        };
        let mut b = MultiplyConstV::with_kernel(self.consts, kernel);
        if let Some(name) = self.name {
            b.name = name;
        }
        b
    }
}

/// Multiply stream by a constant vector.
#[derive(Debug)]
pub struct MultiplyConstV<T> {
    name: String,
    canonical: Vec<Canonical>,
    val: Vec<T>,
    kernel: Option<Kernel<T>>,
    output_multiple: usize,
}

impl<T: Dispatch> MultiplyConstV<T> {
    /// Create new block from working type constants.
    ///
    /// One lane per constant. Scalar `f32` and `Complex<f32>` get an
    /// accelerated kernel.
    ///
    /// # Panics
    ///
    /// Panics if `vals` is empty.
    pub fn new(vals: &[T]) -> Self {
        MultiplyConstBuilder::from_values(vals).build()
    }

    /// Create new block multiplying by a single constant.
    pub fn scalar(val: T) -> Self {
        Self::new(&[val])
    }

    /// Create new block from canonical constants.
    ///
    /// # Panics
    ///
    /// Panics if `consts` is empty.
    pub fn from_canonical(consts: Vec<Canonical>) -> Self {
        MultiplyConstBuilder::new(consts).build()
    }

    /// Create new block with an explicitly chosen kernel, or none.
    ///
    /// A kernel only ever uses the first constant, so it must not be
    /// given together with more than one constant.
    ///
    /// # Panics
    ///
    /// Panics if `consts` is empty, or if a kernel is given with more
    /// than one constant.
    pub fn with_kernel(consts: Vec<Canonical>, kernel: Option<Kernel<T>>) -> Self {
        assert!(!consts.is_empty(), "MultiplyConstV needs at least one constant");
        assert!(
            kernel.is_none() || consts.len() == 1,
            "kernels only support a single constant, got {}",
            consts.len()
        );
        let output_multiple = kernel.map_or(1, |k| k.output_multiple());
        let val = convert(&consts);
        debug!(
            "MultiplyConstV<{}>: lanes={} kernel={} output_multiple={}",
            T::NAME,
            consts.len(),
            kernel.map_or("generic", |k| k.name()),
            output_multiple
        );
        Self {
            name: format!("MultiplyConstV<{}>", T::NAME),
            canonical: consts,
            val,
            kernel,
            output_multiple,
        }
    }

    /// Multiply `n` frames of input into output.
    ///
    /// Returns `n`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer holds fewer than `n` frames.
    pub fn multiply(&self, n: usize, input: &[T], out: &mut [T]) -> usize {
        let nums = n * self.val.len();
        if let Some(kernel) = &self.kernel {
            debug_assert_eq!(
                n % self.output_multiple,
                0,
                "{n} is not a multiple of {}",
                self.output_multiple
            );
            kernel.call(nums, input, out, self.val[0]);
            return n;
        }
        let input = &input[..nums];
        let out = &mut out[..nums];
        if let [k] = self.val.as_slice() {
            for (o, i) in out.iter_mut().zip(input) {
                *o = i.mul_const(*k);
            }
        } else {
            // Frame by frame is lane `i mod L`, without the modulo.
            let lanes = self.val.len();
            for (of, inf) in out.chunks_exact_mut(lanes).zip(input.chunks_exact(lanes)) {
                for ((o, i), k) in of.iter_mut().zip(inf).zip(&self.val) {
                    *o = i.mul_const(*k);
                }
            }
        }
        n
    }

    /// Replace the constants.
    ///
    /// Fails without changing anything if the number of constants
    /// differs from the number of lanes.
    pub fn set_const(&mut self, vals: Vec<Canonical>) -> Result<()> {
        if vals.len() != self.val.len() {
            debug!(
                "MultiplyConstV<{}>: rejected {} constants, want {}",
                T::NAME,
                vals.len(),
                self.val.len()
            );
            return Err(Error::LengthMismatch {
                want: self.val.len(),
                got: vals.len(),
            });
        }
        self.val = convert(&vals);
        self.canonical = vals;
        trace!("MultiplyConstV<{}>: new constants {:?}", T::NAME, self.canonical);
        Ok(())
    }

    /// Get the constants, as last set.
    #[must_use]
    pub fn get_const(&self) -> &[Canonical] {
        &self.canonical
    }

    /// The constants, converted to the working type.
    #[must_use]
    pub fn working_const(&self) -> &[T] {
        &self.val
    }

    /// Number of lanes, i.e. samples per frame.
    #[must_use]
    pub fn lanes(&self) -> usize {
        self.val.len()
    }

    /// Name of the bound kernel, if any.
    #[must_use]
    pub fn kernel_name(&self) -> Option<&'static str> {
        self.kernel.map(|k| k.name())
    }

    /// Output frames per call must be a multiple of this.
    #[must_use]
    pub fn output_multiple(&self) -> usize {
        self.output_multiple
    }

    fn signature(&self) -> IoSignature {
        IoSignature::new(1, 1, T::size() * self.val.len())
    }
}

fn convert<T: Dispatch>(vals: &[Canonical]) -> Vec<T> {
    vals.iter().map(|v| T::from_canonical(*v)).collect()
}

impl<T: Dispatch> Block for MultiplyConstV<T> {
    fn block_name(&self) -> &str {
        &self.name
    }
    fn input_signature(&self) -> IoSignature {
        self.signature()
    }
    fn output_signature(&self) -> IoSignature {
        self.signature()
    }
    fn output_multiple(&self) -> usize {
        self.output_multiple
    }
}

impl<T: Dispatch> SyncBlock<T> for MultiplyConstV<T> {
    fn work(&mut self, noutput: usize, input: &[T], out: &mut [T]) -> usize {
        self.multiply(noutput, input, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{assert_almost_equal_complex, assert_almost_equal_float};
    use crate::{Complex, Float};

    #[test]
    fn scalar_float() {
        let mul = MultiplyConstV::scalar(2.5 as Float);
        let n = 16;
        let input: Vec<Float> = (0..n).map(|i| i as Float).collect();
        let mut out = vec![0.0; n];
        assert_eq!(mul.multiply(n, &input, &mut out), n);
        let want: Vec<Float> = (0..n).map(|i| 2.5 * i as Float).collect();
        assert_almost_equal_float(&out, &want);
    }

    #[test]
    fn scalar_complex() {
        let mul = MultiplyConstV::scalar(Complex::new(0.0, 2.0));
        let input = vec![Complex::new(1.0, 1.0); 8];
        let mut out = vec![Complex::default(); 8];
        mul.multiply(8, &input, &mut out);
        assert_almost_equal_complex(&out, &[Complex::new(-2.0, 2.0); 8]);
    }

    #[test]
    fn three_lanes() {
        let mul = MultiplyConstV::<i16>::new(&[1, 10, 100]);
        assert_eq!(mul.lanes(), 3);
        let input = [1, 2, 3, 4, 5, 6];
        let mut out = [0; 6];
        assert_eq!(mul.multiply(2, &input, &mut out), 2);
        assert_eq!(out, [1, 20, 300, 4, 50, 600]);
    }

    #[test]
    fn multi_lane_float_not_accelerated() {
        let mul = MultiplyConstV::<Float>::new(&[1.0, 2.0]);
        assert_eq!(mul.kernel_name(), None);
        assert_eq!(mul.output_multiple(), 1);
        let mut out = [0.0; 4];
        mul.multiply(2, &[1.0, 1.0, 3.0, 3.0], &mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 6.0]);
    }

    #[test]
    fn only_touches_n_frames() {
        let mul = MultiplyConstV::<i32>::new(&[2, 3]);
        let mut out = [-1; 6];
        mul.multiply(2, &[1, 1, 1, 1, 1, 1], &mut out);
        assert_eq!(out, [2, 3, 2, 3, -1, -1]);
    }

    #[test]
    fn kernel_equals_generic() {
        let n = 64;
        let input: Vec<Float> = (0..n).map(|i| (i as Float) * 0.731 - 11.0).collect();
        let fast = MultiplyConstV::scalar(-1.3 as Float);
        let slow = MultiplyConstBuilder::from_values(&[-1.3 as Float])
            .kernel(KernelChoice::Generic)
            .build();
        assert!(fast.kernel_name().is_some());
        assert!(slow.kernel_name().is_none());
        let mut a = vec![0.0; n];
        let mut b = vec![0.0; n];
        fast.multiply(n, &input, &mut a);
        slow.multiply(n, &input, &mut b);
        #[cfg(not(feature = "volk"))]
        assert_eq!(a, b);
        #[cfg(feature = "volk")]
        assert_almost_equal_float(&a, &b);
    }

    #[test]
    fn output_multiple_from_kernel() {
        let mul = MultiplyConstV::scalar(Complex::new(1.0, 0.0));
        let kernel = kernel::select::<Complex>(1).unwrap();
        let want = std::cmp::max(1, kernel.alignment() / 8);
        assert_eq!(mul.output_multiple(), want);
        assert_eq!(Block::output_multiple(&mul), want);
    }

    #[test]
    fn set_get() -> Result<()> {
        let mut mul = MultiplyConstV::<i8>::new(&[1, 2]);
        assert_eq!(
            mul.get_const(),
            &[Canonical::new(1.0, 0.0), Canonical::new(2.0, 0.0)]
        );
        let v = vec![Canonical::new(3.7, 1.0), Canonical::new(-200.0, 0.0)];
        mul.set_const(v.clone())?;
        assert_eq!(mul.get_const(), v.as_slice());
        assert_eq!(mul.working_const(), &[3, -128]);
        Ok(())
    }

    #[test]
    fn set_wrong_length() {
        let mut mul = MultiplyConstV::<Complex>::new(&[Complex::new(1.0, 2.0)]);
        let before = mul.get_const().to_vec();
        let err = mul
            .set_const(vec![Canonical::new(1.0, 0.0), Canonical::new(2.0, 0.0)])
            .unwrap_err();
        assert_eq!(err, Error::LengthMismatch { want: 1, got: 2 });
        assert_eq!(mul.get_const(), before.as_slice());
        assert_eq!(mul.working_const(), &[Complex::new(1.0, 2.0)]);
        assert!(mul.set_const(vec![]).is_err());
        assert_eq!(mul.get_const(), before.as_slice());
    }

    #[test]
    fn set_const_changes_output() -> Result<()> {
        let mut mul = MultiplyConstV::scalar(2.0 as Float);
        mul.set_const(vec![Canonical::new(-4.0, 99.0)])?;
        let mut out = vec![0.0; 16];
        mul.multiply(16, &[1.0; 16], &mut out);
        assert_eq!(out, vec![-4.0; 16]);
        Ok(())
    }

    #[test]
    fn names_and_signature() {
        let mul = MultiplyConstV::<num_complex::Complex<i16>>::new(&[
            num_complex::Complex::new(1, 0),
            num_complex::Complex::new(0, 1),
            num_complex::Complex::new(2, 2),
        ]);
        assert_eq!(mul.block_name(), "MultiplyConstV<sc16>");
        let sig = mul.input_signature();
        assert_eq!(sig, mul.output_signature());
        assert_eq!(sig.min_streams(), 1);
        assert_eq!(sig.max_streams(), 1);
        assert_eq!(sig.item_size(), 12);

        let named = MultiplyConstBuilder::<f64>::new(vec![Canonical::new(1.0, 0.0)])
            .name("gain".into())
            .build();
        assert_eq!(named.block_name(), "gain");
    }

    #[test]
    #[should_panic]
    fn empty_consts() {
        let _ = MultiplyConstV::<Float>::new(&[]);
    }

    #[test]
    #[should_panic]
    fn kernel_with_lanes() {
        let k = kernel::select::<Float>(1);
        let _ = MultiplyConstV::with_kernel(
            vec![Canonical::new(1.0, 0.0), Canonical::new(2.0, 0.0)],
            k,
        );
    }
}
