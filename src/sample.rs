/*! Sample types the multiply blocks can work on.

Every working type converts from and to the canonical `Complex<f64>`
form, so that constants can be stored once at full precision and
narrowed to whatever the stream carries.
*/
use crate::Canonical;
use num_complex::Complex;

/// A trait all working sample types must implement.
pub trait Sample: Copy + Default + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Short type suffix, e.g. `fc32` or `s16`.
    const NAME: &'static str;

    /// Size of one sample, in bytes.
    #[must_use]
    fn size() -> usize {
        std::mem::size_of::<Self>()
    }

    /// Narrow a canonical value to this type.
    ///
    /// Real types take the real part. Integer types truncate towards
    /// zero and saturate at their bounds.
    #[must_use]
    fn from_canonical(c: Canonical) -> Self;

    /// Widen to the canonical form. Exact for every type.
    #[must_use]
    fn to_canonical(self) -> Canonical;

    /// Multiply by a constant. Integer types wrap on overflow.
    #[must_use]
    fn mul_const(self, k: Self) -> Self;
}

macro_rules! float_sample {
    ($t:ty, $name:literal) => {
        impl Sample for $t {
            const NAME: &'static str = $name;
            fn from_canonical(c: Canonical) -> Self {
                c.re as $t
            }
            fn to_canonical(self) -> Canonical {
                Canonical::new(self as f64, 0.0)
            }
            fn mul_const(self, k: Self) -> Self {
                self * k
            }
        }
    };
}

macro_rules! complex_float_sample {
    ($t:ty, $name:literal) => {
        impl Sample for Complex<$t> {
            const NAME: &'static str = $name;
            fn from_canonical(c: Canonical) -> Self {
                Complex::new(c.re as $t, c.im as $t)
            }
            fn to_canonical(self) -> Canonical {
                Canonical::new(self.re as f64, self.im as f64)
            }
            fn mul_const(self, k: Self) -> Self {
                self * k
            }
        }
    };
}

macro_rules! int_sample {
    ($t:ty, $name:literal) => {
        impl Sample for $t {
            const NAME: &'static str = $name;
            fn from_canonical(c: Canonical) -> Self {
                c.re as $t
            }
            fn to_canonical(self) -> Canonical {
                Canonical::new(self as f64, 0.0)
            }
            fn mul_const(self, k: Self) -> Self {
                self.wrapping_mul(k)
            }
        }
    };
}

macro_rules! complex_int_sample {
    ($t:ty, $name:literal) => {
        impl Sample for Complex<$t> {
            const NAME: &'static str = $name;
            fn from_canonical(c: Canonical) -> Self {
                Complex::new(c.re as $t, c.im as $t)
            }
            fn to_canonical(self) -> Canonical {
                Canonical::new(self.re as f64, self.im as f64)
            }
            fn mul_const(self, k: Self) -> Self {
                // num_complex's Mul would panic on overflow in debug builds.
                Complex::new(
                    self.re
                        .wrapping_mul(k.re)
                        .wrapping_sub(self.im.wrapping_mul(k.im)),
                    self.re
                        .wrapping_mul(k.im)
                        .wrapping_add(self.im.wrapping_mul(k.re)),
                )
            }
        }
    };
}

float_sample!(f32, "f32");
float_sample!(f64, "f64");
complex_float_sample!(f32, "fc32");
complex_float_sample!(f64, "fc64");
int_sample!(i8, "s8");
int_sample!(i16, "s16");
int_sample!(i32, "s32");
complex_int_sample!(i8, "sc8");
complex_int_sample!(i16, "sc16");
complex_int_sample!(i32, "sc32");
