//! Sample storage backings.
//!
//! A [`Signal`](crate::signal::Signal) owns its samples through one of two
//! backings:
//!
//! - [`Fixed`]: inline array with a capacity chosen at compile time. Its
//!   length is set once at construction and can never change.
//! - [`Growable`]: heap buffer that supports resizing and insertion.
//!
//! Both expose the same [`Backing`] interface, so code written against a
//! signal behaves identically regardless of where the samples live. Length
//! changes on a fixed backing fail with [`DspError::NotSupported`] instead of
//! being compiled out.

use crate::error::{DspError, DspResult};
use lib_sample::{Capacity, Sample};

mod sealed {
    pub trait Sealed {}
}

/// Common capability interface over the closed set of sample backings.
pub trait Backing<T: Sample>: sealed::Sealed + Sized {
    /// Capacity tag of this backing type.
    const CAPACITY: Capacity;

    /// Allocate `len` zero-valued samples.
    fn with_len(len: usize) -> DspResult<Self>;

    /// Number of live samples.
    fn len(&self) -> usize;

    /// Whether there are no live samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live samples as a contiguous slice.
    fn as_slice(&self) -> &[T];

    /// Live samples as a mutable contiguous slice.
    fn as_mut_slice(&mut self) -> &mut [T];

    /// Change the number of live samples, zero-filling any new tail.
    fn resize(&mut self, new_len: usize) -> DspResult<()>;

    /// Insert `count` copies of `value` before position `at`.
    fn insert(&mut self, at: usize, count: usize, value: T) -> DspResult<()>;
}

/// Inline, compile-time-capacity storage for at most `N` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixed<T, const N: usize> {
    data: [T; N],
    len: usize,
}

impl<T, const N: usize> sealed::Sealed for Fixed<T, N> {}

impl<T: Sample, const N: usize> Backing<T> for Fixed<T, N> {
    const CAPACITY: Capacity = Capacity::Fixed(N);

    fn with_len(len: usize) -> DspResult<Self> {
        if len > N {
            return Err(DspError::CapacityExceeded {
                capacity: Self::CAPACITY,
                requested: len,
            });
        }
        Ok(Self {
            data: [T::zero(); N],
            len,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }

    fn resize(&mut self, new_len: usize) -> DspResult<()> {
        Err(DspError::not_supported(format!(
            "signal has fixed capacity {N}: can't resize from {} to {new_len}",
            self.len
        )))
    }

    fn insert(&mut self, at: usize, count: usize, _value: T) -> DspResult<()> {
        Err(DspError::not_supported(format!(
            "signal has fixed capacity {N}: can't insert {count} samples at {at}"
        )))
    }
}

/// Heap storage that can change length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Growable<T>(Vec<T>);

impl<T> Growable<T> {
    /// Consume the backing and return its buffer.
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for Growable<T> {
    fn from(samples: Vec<T>) -> Self {
        Self(samples)
    }
}

impl<T> sealed::Sealed for Growable<T> {}

impl<T: Sample> Backing<T> for Growable<T> {
    const CAPACITY: Capacity = Capacity::Dynamic;

    fn with_len(len: usize) -> DspResult<Self> {
        Ok(Self(vec![T::zero(); len]))
    }

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    fn resize(&mut self, new_len: usize) -> DspResult<()> {
        self.0.resize(new_len, T::zero());
        Ok(())
    }

    fn insert(&mut self, at: usize, count: usize, value: T) -> DspResult<()> {
        if at > self.0.len() {
            return Err(DspError::InsufficientData {
                needed: at,
                got: self.0.len(),
            });
        }
        self.0.splice(at..at, std::iter::repeat(value).take(count));
        Ok(())
    }
}
