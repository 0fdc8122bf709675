//! Discretely sampled signal container.
//!
//! A [`Signal`] owns an ordered sequence of samples plus the rate they were
//! acquired at. The storage strategy is a type parameter:
//!
//! ```
//! use lib_dsp::signal::{DynamicSignal, FixedSignal};
//!
//! // Heap-backed, can be padded by the overlap modes that need it.
//! let dynamic = DynamicSignal::<f64>::from_fn(|i| i as f64, 8, 8).unwrap();
//! // Inline, at most 16 samples, length frozen after construction.
//! let fixed = FixedSignal::<f32, 16>::from_fn(|i| i as f32, 8, 8).unwrap();
//!
//! assert_eq!(dynamic.size(), fixed.size());
//! ```
//!
//! # Sample Semantics
//!
//! Sample `i` is taken at `t = i / sample_rate`. The frequency resolution of
//! a signal is `sample_rate / size`, the bin width of a DFT over the whole
//! signal.

use crate::error::{DspError, DspResult};
use crate::storage::{Backing, Fixed, Growable};
use lib_sample::{Capacity, Precision, Sample, SampleRate};
use std::iter::Rev;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

/// A uniformly sampled signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal<T: Sample, B: Backing<T> = Growable<T>> {
    /// Owned samples.
    data: B,

    /// Acquisition rate in samples per unit time.
    sample_rate: SampleRate,

    _marker: PhantomData<T>,
}

/// Heap-backed signal that can grow.
pub type DynamicSignal<T> = Signal<T, Growable<T>>;

/// Inline signal holding at most `N` samples.
pub type FixedSignal<T, const N: usize> = Signal<T, Fixed<T, N>>;

impl<T: Sample, B: Backing<T>> Signal<T, B> {
    /// Create a signal by copying the first `num_samples` values of `source`.
    ///
    /// Fails if the sample rate is zero, if `source` is shorter than
    /// `num_samples`, or if a fixed backing cannot hold `num_samples`.
    pub fn from_slice(source: &[T], num_samples: usize, sample_rate: u32) -> DspResult<Self> {
        if source.len() < num_samples {
            return Err(DspError::InsufficientData {
                needed: num_samples,
                got: source.len(),
            });
        }
        let mut signal = Self::zeros(num_samples, sample_rate)?;
        signal
            .as_mut_slice()
            .copy_from_slice(&source[..num_samples]);
        Ok(signal)
    }

    /// Create a signal whose `i`-th sample is `f(i)`, evaluated eagerly for
    /// every index in `0..num_samples`.
    pub fn from_fn<G>(mut f: G, num_samples: usize, sample_rate: u32) -> DspResult<Self>
    where
        G: FnMut(usize) -> T,
    {
        let mut signal = Self::zeros(num_samples, sample_rate)?;
        for (i, sample) in signal.iter_mut().enumerate() {
            *sample = f(i);
        }
        Ok(signal)
    }

    /// Create a zero-valued signal.
    pub fn zeros(num_samples: usize, sample_rate: u32) -> DspResult<Self> {
        let sample_rate =
            SampleRate::new(sample_rate).ok_or(DspError::InvalidSampleRate(sample_rate))?;
        Ok(Self {
            data: B::with_len(num_samples)?,
            sample_rate,
            _marker: PhantomData,
        })
    }

    /// Number of samples.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the signal holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Acquisition rate in samples per unit time.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.get()
    }

    /// Acquisition rate as a unit-checked value.
    #[inline]
    pub fn rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Frequency resolution in inverse unit time: `sample_rate / size`.
    #[inline]
    pub fn resolution(&self) -> T::Precision {
        let rate = <T::Precision as Precision>::from_u32(self.sample_rate());
        rate / <T::Precision as Precision>::from_usize(self.size())
    }

    /// Time of the `index`-th sample.
    #[inline]
    pub fn time_at(&self, index: usize) -> T::Precision {
        let index = <T::Precision as Precision>::from_usize(index);
        index / <T::Precision as Precision>::from_u32(self.sample_rate())
    }

    /// Capacity tag of the backing storage.
    #[inline]
    pub fn capacity(&self) -> Capacity {
        B::CAPACITY
    }

    /// Whether the signal can change length.
    #[inline]
    pub fn is_growable(&self) -> bool {
        B::CAPACITY.is_growable()
    }

    /// Change the number of samples, zero-filling new ones.
    ///
    /// Fixed-capacity signals refuse with [`DspError::NotSupported`], even
    /// when `new_size` would fit.
    pub fn resize(&mut self, new_size: usize) -> DspResult<()> {
        self.data.resize(new_size)
    }

    /// Insert `count` copies of `value` before sample `at`.
    pub fn insert(&mut self, at: usize, count: usize, value: T) -> DspResult<()> {
        self.data.insert(at, count, value)
    }

    /// Add `front` zeros before the first sample and `back` zeros after the last.
    pub fn pad(&mut self, front: usize, back: usize) -> DspResult<()> {
        if front == 0 && back == 0 {
            return Ok(());
        }
        if !self.is_growable() {
            return Err(DspError::not_supported(format!(
                "{} signal can't be zero-padded by {front}+{back} samples",
                self.capacity()
            )));
        }
        tracing::trace!(front, back, len = self.size(), "zero-padding signal");
        self.data.insert(0, front, T::zero())?;
        let end = self.data.len();
        self.data.insert(end, back, T::zero())
    }

    /// Samples as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Samples as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Iterate from the first sample to the last.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutably iterate from the first sample to the last.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Mutably iterate from the last sample to the first.
    #[inline]
    pub fn iter_rev_mut(&mut self) -> Rev<IterMut<'_, T>> {
        self.iter_mut().rev()
    }

    /// Copy the samples out into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Sample> DynamicSignal<T> {
    /// Take ownership of an existing buffer without copying.
    pub fn from_vec(samples: Vec<T>, sample_rate: u32) -> DspResult<Self> {
        let sample_rate =
            SampleRate::new(sample_rate).ok_or(DspError::InvalidSampleRate(sample_rate))?;
        Ok(Self {
            data: Growable::from(samples),
            sample_rate,
            _marker: PhantomData,
        })
    }

    /// Consume the signal and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data.into_inner()
    }
}

impl<T: Sample, B: Backing<T>> Index<usize> for Signal<T, B> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Sample, B: Backing<T>> IndexMut<usize> for Signal<T, B> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T: Sample, B: Backing<T>> IntoIterator for &'a Signal<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Sample, B: Backing<T>> IntoIterator for &'a mut Signal<T, B> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
