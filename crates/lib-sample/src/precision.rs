//! Element types a signal can hold, and the real precision behind them.
//!
//! Every sample type resolves to a real working precision: `f32` and
//! `Complex<f32>` both work in `f32`, `f64` and `Complex<f64>` in `f64`.
//! Derived quantities such as frequency resolution or sample instants are
//! expressed in that precision.
//!
//! # Accumulator promotion
//!
//! Overlap kernels accumulate into the signal's own element type, so that
//! type has to hold a tap-times-sample product without truncation. The
//! [`Promote`] relation encodes exactly the lossless pairings:
//!
//! | accumulator     | accepted taps                                  |
//! |-----------------|------------------------------------------------|
//! | `f32`           | `f32`                                          |
//! | `f64`           | `f32`, `f64`                                   |
//! | `Complex<f32>`  | `f32`, `Complex<f32>`                          |
//! | `Complex<f64>`  | `f32`, `f64`, `Complex<f32>`, `Complex<f64>`   |
//!
//! A real signal with complex taps does not type-check.

use num_complex::Complex;
use num_traits::{Float, FloatConst, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Mul};

/// Real scalar type used as working precision.
pub trait Precision: Float + FloatConst + Debug + Display + Default + Send + Sync + 'static {
    /// Lossy conversion from a sample count or index.
    fn from_usize(n: usize) -> Self;

    /// Lossy conversion from an integer sample rate.
    fn from_u32(n: u32) -> Self;
}

impl Precision for f32 {
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f32
    }

    #[inline]
    fn from_u32(n: u32) -> Self {
        n as f32
    }
}

impl Precision for f64 {
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f64
    }

    #[inline]
    fn from_u32(n: u32) -> Self {
        n as f64
    }
}

/// A value that can be stored in a signal.
pub trait Sample:
    Copy + Zero + Add<Output = Self> + Mul<Output = Self> + AddAssign + PartialEq + Debug + Send + Sync + 'static
{
    /// Real working precision of this element type.
    type Precision: Precision;

    /// Whether the element carries an imaginary part.
    const IS_COMPLEX: bool;

    /// Complex conjugate. Identity for real types.
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Precision;

    /// Imaginary part, zero for real types.
    fn im(self) -> Self::Precision;

    /// Widen to a complex value of the same precision.
    #[inline]
    fn to_complex(self) -> Complex<Self::Precision> {
        Complex::new(self.re(), self.im())
    }
}

macro_rules! impl_real_sample {
    ($t:ty) => {
        impl Sample for $t {
            type Precision = $t;
            const IS_COMPLEX: bool = false;

            #[inline]
            fn conj(self) -> Self {
                self
            }

            #[inline]
            fn re(self) -> $t {
                self
            }

            #[inline]
            fn im(self) -> $t {
                0.0
            }
        }
    };
}

macro_rules! impl_complex_sample {
    ($t:ty) => {
        impl Sample for Complex<$t> {
            type Precision = $t;
            const IS_COMPLEX: bool = true;

            #[inline]
            fn conj(self) -> Self {
                Complex::conj(&self)
            }

            #[inline]
            fn re(self) -> $t {
                self.re
            }

            #[inline]
            fn im(self) -> $t {
                self.im
            }
        }
    };
}

impl_real_sample!(f32);
impl_real_sample!(f64);
impl_complex_sample!(f32);
impl_complex_sample!(f64);

/// `Self` can accumulate products with taps of type `F` without losing precision.
pub trait Promote<F: Sample>: Sample {
    /// Lift a tap into the accumulator type.
    fn promote(tap: F) -> Self;
}

macro_rules! impl_promote {
    ($acc:ty => $($tap:ty),+ ; |$v:ident| $body:expr) => {
        $(
            impl Promote<$tap> for $acc {
                #[inline]
                fn promote($v: $tap) -> Self {
                    $body
                }
            }
        )+
    };
}

impl_promote!(f32 => f32; |v| v);
impl_promote!(f64 => f32, f64; |v| v as f64);
impl_promote!(Complex<f32> => f32; |v| Complex::new(v, 0.0));
impl_promote!(Complex<f32> => Complex<f32>; |v| v);
impl_promote!(Complex<f64> => f32, f64; |v| Complex::new(v as f64, 0.0));
impl_promote!(Complex<f64> => Complex<f32>; |v| Complex::new(v.re as f64, v.im as f64));
impl_promote!(Complex<f64> => Complex<f64>; |v| v);

/// Short type name used in human-readable summaries.
pub fn type_label<T: 'static>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Strip the module path but keep generic arguments, e.g. `Complex<f64>`.
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map(|i| i + 2).unwrap_or(0);
    &full[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulate<T: Promote<F>, F: Sample>(taps: &[F], samples: &[T]) -> T {
        let mut acc = T::zero();
        for (&t, &s) in taps.iter().zip(samples) {
            acc += T::promote(t) * s;
        }
        acc
    }

    #[test]
    fn test_real_conj_is_identity() {
        assert_eq!(Sample::conj(2.5f64), 2.5);
        assert_eq!(Sample::im(2.5f32), 0.0);
    }

    #[test]
    fn test_complex_conj() {
        let z = Complex::new(1.0f64, -3.0);
        assert_eq!(Sample::conj(z), Complex::new(1.0, 3.0));
        assert!(<Complex<f64> as Sample>::IS_COMPLEX);
        assert!(!<f64 as Sample>::IS_COMPLEX);
    }

    #[test]
    fn test_promote_real_taps_into_complex_accumulator() {
        let taps = [0.5f32, 2.0];
        let samples = [Complex::new(1.0f64, 1.0), Complex::new(0.0, -1.0)];
        let acc = accumulate(&taps, &samples);
        assert!((acc.re - 0.5).abs() < 1e-12);
        assert!((acc.im - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_promote_widens_f32_taps() {
        let taps = [0.1f32, 0.2f32];
        let samples = [1.0f64, 2.0];
        let acc = accumulate(&taps, &samples);
        assert!((acc - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_to_complex() {
        assert_eq!(3.0f32.to_complex(), Complex::new(3.0, 0.0));
        assert_eq!(
            Complex::new(1.0f64, 2.0).to_complex(),
            Complex::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_type_label() {
        assert_eq!(type_label::<f64>(), "f64");
        assert_eq!(type_label::<Complex<f32>>(), "Complex<f32>");
    }
}
