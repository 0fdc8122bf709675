//! Brute-force discrete Fourier transform via the Vandermonde matrix.
//!
//! Quadratic in signal length. Meant for verification and small transforms,
//! not as a replacement for an FFT.

use crate::error::{DspError, DspResult};
use crate::signal::Signal;
use crate::storage::Backing;
use lib_sample::{Capacity, Precision, Sample, SampleRate};
use ndarray::{Array1, Array2};
use num_complex::Complex;

/// Precomputed DFT matrix `W[r, c] = exp(-2πi · r · c / n)`.
#[derive(Clone, Debug)]
pub struct Vandermonde<P: Precision> {
    matrix: Array2<Complex<P>>,
    capacity: Capacity,
}

impl<P: Precision> Vandermonde<P> {
    /// Build a DFT matrix.
    ///
    /// * `capacity` - [`Capacity::Dynamic`] needs a runtime `dft_length`.
    ///   [`Capacity::Fixed`] defaults to its own size and rejects longer
    ///   runtime lengths.
    /// * `dft_length` - Transform length.
    pub fn new(capacity: Capacity, dft_length: Option<usize>) -> DspResult<Self> {
        let n = match (capacity, dft_length) {
            (Capacity::Dynamic, None) | (Capacity::Dynamic, Some(0)) => {
                return Err(DspError::InvalidConfig(
                    "DFT matrix is dynamically allocated; a positive runtime length is required"
                        .to_string(),
                ));
            }
            (Capacity::Dynamic, Some(n)) => n,
            (Capacity::Fixed(max), None) => max,
            (Capacity::Fixed(max), Some(n)) if n > max => {
                return Err(DspError::CapacityExceeded {
                    capacity,
                    requested: n,
                });
            }
            (Capacity::Fixed(_), Some(n)) => n,
        };

        if n == 0 {
            return Err(DspError::InvalidConfig("DFT length must be positive".to_string()));
        }

        tracing::debug!(dft_length = n, %capacity, "building Vandermonde matrix");

        let step = -(P::PI() + P::PI()) / P::from_usize(n);
        // Reduce r * c modulo n so large products don't lose phase precision.
        let matrix = Array2::from_shape_fn((n, n), |(r, c)| {
            let k = (r * c) % n;
            Complex::from_polar(P::one(), step * P::from_usize(k))
        });

        Ok(Self { matrix, capacity })
    }

    /// Heap-allocated matrix of the given length.
    pub fn dynamic(dft_length: usize) -> DspResult<Self> {
        Self::new(Capacity::Dynamic, Some(dft_length))
    }

    /// Transform length.
    #[inline]
    pub fn dft_length(&self) -> usize {
        self.matrix.nrows()
    }

    /// Capacity the matrix was built with.
    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// The DFT matrix itself.
    pub fn matrix(&self) -> &Array2<Complex<P>> {
        &self.matrix
    }

    /// Fourier coefficients of a signal.
    ///
    /// The signal must be exactly `dft_length` samples long.
    pub fn apply<T, B>(&self, signal: &Signal<T, B>) -> DspResult<Spectrum<P>>
    where
        T: Sample<Precision = P>,
        B: Backing<T>,
    {
        self.check_len(signal.size())?;
        let samples: Array1<Complex<P>> = signal.iter().map(|&s| s.to_complex()).collect();
        Ok(Spectrum {
            coefficients: self.matrix.dot(&samples),
            sample_rate: signal.rate(),
        })
    }

    /// Inverse transform: conjugate transpose times coefficients, divided by length.
    ///
    /// The result is complex even for a real input signal; its imaginary
    /// parts are then zero up to rounding.
    pub fn inverse(&self, spectrum: &Spectrum<P>) -> DspResult<Array1<Complex<P>>> {
        self.check_len(spectrum.len())?;
        let n = P::from_usize(self.dft_length());
        let adjoint = self.matrix.t().mapv(|w| w.conj());
        Ok(adjoint.dot(&spectrum.coefficients).mapv(|z| z.unscale(n)))
    }

    fn check_len(&self, len: usize) -> DspResult<()> {
        if len != self.dft_length() {
            return Err(DspError::LengthMismatch {
                expected: self.dft_length(),
                actual: len,
            });
        }
        Ok(())
    }
}

/// Frequency-domain coefficients of a signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum<P: Precision> {
    /// One coefficient per DFT bin.
    pub coefficients: Array1<Complex<P>>,

    /// Sample rate of the transformed signal.
    pub sample_rate: SampleRate,
}

impl<P: Precision> Spectrum<P> {
    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Whether the spectrum has no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Bin width: `sample_rate / len`.
    pub fn resolution(&self) -> P {
        self.sample_rate.as_precision::<P>() / P::from_usize(self.len())
    }

    /// Frequency of bin `k`.
    pub fn frequency_at(&self, k: usize) -> P {
        P::from_usize(k) * self.resolution()
    }

    /// Magnitude of every bin.
    pub fn magnitudes(&self) -> Vec<P> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    /// Bin with the largest magnitude, if any.
    pub fn peak_bin(&self) -> Option<usize> {
        self.coefficients
            .iter()
            .map(|c| c.norm_sqr())
            .enumerate()
            .fold(None, |best: Option<(usize, P)>, (k, m)| match best {
                Some((_, bm)) if bm >= m => best,
                _ => Some((k, m)),
            })
            .map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{DynamicSignal, FixedSignal};
    use num_complex::Complex64;
    use rustfft::FftPlanner;
    use std::f64::consts::PI;

    fn cosine(n: usize, period: f64, rate: u32) -> DynamicSignal<f64> {
        DynamicSignal::from_fn(|i| (2.0 * PI * i as f64 / period).cos(), n, rate).unwrap()
    }

    #[test]
    fn test_cosine_lands_in_two_bins() {
        let sig = cosine(16, 8.0, 32);
        let dft = Vandermonde::<f64>::new(Capacity::Fixed(16), None).unwrap();
        let spectrum = dft.apply(&sig).unwrap();

        let mags = spectrum.magnitudes();
        for (k, m) in mags.iter().enumerate() {
            let expected = if k == 2 || k == 14 { 8.0 } else { 0.0 };
            assert!((m - expected).abs() < 1e-9, "bin {k}: {m}");
        }
        assert!((spectrum.resolution() - 2.0).abs() < 1e-12);
        assert!((spectrum.frequency_at(2) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_complex_tone_peak_bin() {
        let sig = DynamicSignal::from_fn(
            |i| Complex64::from_polar(1.0, 2.0 * PI * 3.0 * i as f64 / 8.0),
            8,
            8,
        )
        .unwrap();
        let spectrum = Vandermonde::<f64>::dynamic(8).unwrap().apply(&sig).unwrap();
        assert_eq!(spectrum.peak_bin(), Some(3));
        assert!((spectrum.magnitudes()[3] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_rustfft() {
        let n = 12;
        let sig = DynamicSignal::from_fn(
            |i| Complex64::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()),
            n,
            n as u32,
        )
        .unwrap();

        let dft = Vandermonde::<f64>::dynamic(n).unwrap();
        let spectrum = dft.apply(&sig).unwrap();

        let mut buffer = sig.to_vec();
        FftPlanner::<f64>::new().plan_fft_forward(n).process(&mut buffer);

        for (a, b) in spectrum.coefficients.iter().zip(buffer.iter()) {
            assert!((a - b).norm() < 1e-10, "{a} vs {b}");
        }
    }

    #[test]
    fn test_inverse_recovers_signal() {
        let sig = cosine(16, 5.0, 16);
        let dft = Vandermonde::<f64>::dynamic(16).unwrap();
        let spectrum = dft.apply(&sig).unwrap();
        let recovered = dft.inverse(&spectrum).unwrap();

        for (orig, rec) in sig.iter().zip(recovered.iter()) {
            assert!((orig - rec.re).abs() < 1e-10);
            assert!(rec.im.abs() < 1e-10);
        }
    }

    #[test]
    fn test_single_precision_fixed_signal() {
        let sig = FixedSignal::<f32, 8>::from_fn(|i| if i == 0 { 1.0 } else { 0.0 }, 8, 8).unwrap();
        let dft = Vandermonde::<f32>::new(Capacity::Fixed(8), Some(8)).unwrap();
        let spectrum = dft.apply(&sig).unwrap();
        // An impulse has a flat spectrum.
        for c in spectrum.coefficients.iter() {
            assert!((c.re - 1.0).abs() < 1e-6 && c.im.abs() < 1e-6);
        }
    }

    #[test]
    fn test_dynamic_requires_runtime_length() {
        assert!(matches!(
            Vandermonde::<f64>::new(Capacity::Dynamic, None),
            Err(DspError::InvalidConfig(_))
        ));
        assert!(matches!(
            Vandermonde::<f64>::dynamic(0),
            Err(DspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fixed_rejects_longer_runtime_length() {
        let err = Vandermonde::<f64>::new(Capacity::Fixed(8), Some(9)).unwrap_err();
        assert_eq!(
            err,
            DspError::CapacityExceeded {
                capacity: Capacity::Fixed(8),
                requested: 9
            }
        );

        let shorter = Vandermonde::<f64>::new(Capacity::Fixed(8), Some(4)).unwrap();
        assert_eq!(shorter.dft_length(), 4);
    }

    #[test]
    fn test_apply_length_mismatch() {
        let sig = cosine(10, 5.0, 10);
        let dft = Vandermonde::<f64>::dynamic(8).unwrap();
        assert_eq!(
            dft.apply(&sig).unwrap_err(),
            DspError::LengthMismatch {
                expected: 8,
                actual: 10
            }
        );
    }
}
