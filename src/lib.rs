/*! This crate provides blocks that multiply sample streams by a
constant, for use in SDR (software defined radio) flowgraphs.

It's modelled on the `multiply_const` family of blocks in
[GNURadio][gnuradio].

# Architecture overview

The block doesn't own any streams. A surrounding framework schedules
it, owns the buffers, and calls [`SyncBlock::work`][block::SyncBlock]
with input and output slices. The block tells the framework, through
the [`Block`][block::Block] trait, how large its items are and how
many items it wants per call.

A block is created with one or more constants. With one constant every
sample is multiplied by it. With `L` constants items are frames of `L`
samples, and every lane has its own constant:

```text
  in:  [ x0 x1 x2 | x3 x4 x5 | ... ]
  k:   [ k0 k1 k2 ]
  out: [ x0*k0 x1*k1 x2*k2 | x3*k0 x4*k1 x5*k2 | ... ]
```

Supported sample types are `f32`, `f64`, complex versions of those,
and signed 8, 16 and 32 bit integers, real and complex. Constants are
stored as `Complex<f64>` and narrowed to the sample type.

Scalar `f32` and `Complex<f32>` blocks use a SIMD kernel, picked once
when the block is created. Enable the `volk` feature to use the system
[libvolk][volk] instead of the built in kernels.

# Examples

```
use constmul::blocks::MultiplyConstV;
use constmul::block::Block;

let mul = MultiplyConstV::<i16>::new(&[1, -1]);
assert_eq!(mul.input_signature().item_size(), 4);
let mut out = [0i16; 4];
mul.multiply(2, &[5, 5, 7, 7], &mut out);
assert_eq!(out, [5, -5, 7, -7]);
```

[gnuradio]: https://www.gnuradio.org/
[volk]: https://www.libvolk.org/
 */

// Blocks.
pub mod multiply_const;

pub mod block;
pub mod blocks;
pub mod kernel;
pub mod sample;

#[cfg(feature = "volk")]
pub mod volk;

/// Float type used. Usually f32, but not guaranteed.
pub type Float = f32;

/// Complex (I/Q) data.
pub type Complex = num_complex::Complex<Float>;

/// Canonical form constants are stored in.
pub type Canonical = num_complex::Complex<f64>;

/// Error type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Wrong number of constants given to `set_const()`.
    #[error("set_const called with the wrong length: got {got}, want {want}")]
    LengthMismatch {
        /// Number of lanes of the block.
        want: usize,
        /// Number of constants given.
        got: usize,
    },

    /// Build assumes CPU features the host doesn't have.
    #[error("environment error: {0}")]
    Environment(String),
}

/// Result convenience type.
pub type Result<T> = std::result::Result<T, Error>;

/// CPU feature, and whether it's assumed at build time or present.
pub struct Feature {
    name: String,
    build: bool,
    detected: bool,
}

impl Feature {
    /// Feature name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// True if compiled with this feature enabled.
    #[must_use]
    pub fn build(&self) -> bool {
        self.build
    }
    /// True if the running CPU has this feature.
    #[must_use]
    pub fn detected(&self) -> bool {
        self.detected
    }
}

/// Format features as a table.
pub fn environment_str(features: &[Feature]) -> String {
    let mut s = "Feature   Build Detected\n".to_string();
    for feature in features {
        s += &format!(
            "{:10} {:-5}    {:-5}\n",
            feature.name, feature.build, feature.detected
        );
    }
    s += &format!("Kernel backend: {}\n", kernel::backend_name());
    s
}

/// Check that CPU features assumed at build time are present.
pub fn check_environment() -> Result<Vec<Feature>> {
    #[allow(unused_mut)]
    let mut assumptions: Vec<Feature> = Vec::new();
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        assumptions.push(Feature {
            name: "SSE".to_string(),
            build: cfg!(target_feature = "sse"),
            detected: is_x86_feature_detected!("sse"),
        });
        assumptions.push(Feature {
            name: "AVX".to_string(),
            build: cfg!(target_feature = "avx"),
            detected: is_x86_feature_detected!("avx"),
        });
        assumptions.push(Feature {
            name: "FMA".to_string(),
            build: cfg!(target_feature = "fma"),
            detected: is_x86_feature_detected!("fma"),
        });
    }
    #[cfg(target_arch = "aarch64")]
    {
        assumptions.push(Feature {
            name: "NEON".to_string(),
            build: cfg!(target_feature = "neon"),
            detected: std::arch::is_aarch64_feature_detected!("neon"),
        });
    }

    let errs: Vec<_> = assumptions
        .iter()
        .filter(|f| f.build && !f.detected)
        .map(|f| {
            format!(
                "Feature {} assumed by build flags but not detected",
                f.name
            )
        })
        .collect();
    if errs.is_empty() {
        Ok(assumptions)
    } else {
        Err(Error::Environment(format!("{errs:?}")))
    }
}

#[cfg(test)]
pub mod tests {
    //! Test helper functions.
    use super::*;

    /// For testing, assert that two slices are almost equal.
    ///
    /// Floating point numbers are almost never exactly equal.
    pub fn assert_almost_equal_complex(left: &[Complex], right: &[Complex]) {
        assert_eq!(
            left.len(),
            right.len(),
            "\nleft: {:?}\nright: {:?}",
            left,
            right
        );
        for i in 0..left.len() {
            let dist = (left[i] - right[i]).norm_sqr().sqrt();
            if dist > 0.001 {
                assert_eq!(
                    left[i], right[i],
                    "\nElement {i}:\nleft: {:?}\nright: {:?}",
                    left, right
                );
            }
        }
    }

    /// For testing, assert that two slices are almost equal.
    ///
    /// Floating point numbers are almost never exactly equal.
    pub fn assert_almost_equal_float(left: &[Float], right: &[Float]) {
        assert_eq!(
            left.len(),
            right.len(),
            "\nleft: {:?}\nright: {:?}",
            left,
            right
        );
        for i in 0..left.len() {
            let dist = (left[i] - right[i]).abs();
            if dist > 0.001 {
                assert_eq!(left[i], right[i], "\nleft: {:?}\nright: {:?}", left, right);
            }
        }
    }

    #[test]
    fn environment() -> Result<()> {
        let features = check_environment()?;
        let s = environment_str(&features);
        assert!(s.starts_with("Feature"));
        assert!(s.contains("Kernel backend"));
        Ok(())
    }

    #[test]
    fn error_message() {
        let e = Error::LengthMismatch { want: 3, got: 1 };
        assert_eq!(
            e.to_string(),
            "set_const called with the wrong length: got 1, want 3"
        );
    }
}
