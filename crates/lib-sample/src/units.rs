//! Sampling units and storage capacity tags.
//!
//! These newtypes keep sample rates and buffer capacities from being mixed
//! up with plain sample counts.

use crate::precision::Precision;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU32;

/// Acquisition rate in samples per unit time. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleRate(NonZeroU32);

impl SampleRate {
    /// One sample per unit time.
    pub const UNIT: Self = Self(NonZeroU32::MIN);

    /// Create a sample rate, rejecting zero.
    #[inline]
    pub fn new(samples_per_unit: u32) -> Option<Self> {
        NonZeroU32::new(samples_per_unit).map(Self)
    }

    /// Samples per unit time.
    #[inline]
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Time between consecutive samples.
    #[inline]
    pub fn period<P: Precision>(&self) -> P {
        P::one() / P::from_u32(self.get())
    }

    /// Sample rate as a working-precision scalar.
    #[inline]
    pub fn as_precision<P: Precision>(&self) -> P {
        P::from_u32(self.get())
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = InvalidSampleRate;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidSampleRate)
    }
}

impl From<SampleRate> for u32 {
    fn from(rate: SampleRate) -> Self {
        rate.get()
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} S/unit", self.get())
    }
}

impl Serialize for SampleRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.get())
    }
}

impl<'de> Deserialize<'de> for SampleRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u32::deserialize(deserializer)?;
        Self::new(raw).ok_or_else(|| serde::de::Error::custom("sample rate must be positive"))
    }
}

/// Error returned when converting zero into a [`SampleRate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSampleRate;

impl fmt::Display for InvalidSampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sample rate must be positive")
    }
}

impl std::error::Error for InvalidSampleRate {}

/// Storage capacity tag of a sample buffer or transform matrix.
///
/// A fixed capacity is decided when the type is chosen and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    /// Inline storage for at most this many elements.
    Fixed(usize),
    /// Heap storage that can grow and shrink.
    Dynamic,
}

impl Capacity {
    /// Whether the storage can change length.
    #[inline]
    pub fn is_growable(&self) -> bool {
        matches!(self, Capacity::Dynamic)
    }

    /// Whether `len` elements fit in this capacity.
    #[inline]
    pub fn admits(&self, len: usize) -> bool {
        match self {
            Capacity::Fixed(max) => len <= *max,
            Capacity::Dynamic => true,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Fixed(n) => write!(f, "statically allocated ({n})"),
            Capacity::Dynamic => f.write_str("dynamically allocated"),
        }
    }
}
