//! Convolution and correlation of a signal with a shorter set of taps.
//!
//! Both operations share one sliding dot-product kernel. Convolution sweeps
//! the signal from its last sample towards its first, which time-reverses the
//! taps without touching their storage; correlation sweeps forwards and
//! conjugates complex taps.
//!
//! All entry points are destructive: the result overwrites the signal, and
//! the returned range locates the meaningful output inside it.
//!
//! # Modes
//!
//! With `delay = taps.len() - 1`:
//!
//! ```text
//! Full   pad `delay` zeros at both ends    output len = N + M - 1
//! Valid  no padding                        output len = N - M + 1
//! Same   pad `delay` zeros at the front    output len = N
//! ```
//!
//! Padding is always with zeros. Full and Same need a growable signal; a
//! fixed-capacity signal only supports Valid, so pre-pad at construction if
//! the boundary samples are needed.
//!
//! # Example
//! ```
//! use lib_dsp::overlap::{convolve, OverlapMode};
//! use lib_dsp::signal::DynamicSignal;
//!
//! let mut sig = DynamicSignal::from_fn(|i| (i + 1) as f32, 5, 5).unwrap();
//! let range = convolve(&mut sig, &[0.1f32, 0.2, 0.3], OverlapMode::Valid).unwrap();
//! assert_eq!(range.len(), 3);
//! ```

use crate::error::{DspError, DspResult};
use crate::signal::Signal;
use crate::storage::Backing;
use lib_sample::{Promote, Sample};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Boundary handling for an overlap operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// Include the partial overlaps at both ends.
    ///
    /// ```text
    /// Signal: [p p 0 1 2 3 4 p p]
    /// Iter 1: [a b c]             ---> [* p 0 1 2 3 4 p p]
    /// Iter 2:   [a b c]           ---> [* * 0 1 2 3 4 p p]
    ///    ...
    /// Iter 7:             [a b c] ---> [* * * * * * * p p]
    /// ```
    Full,
    /// Only positions where the taps overlap the signal completely.
    ///
    /// ```text
    /// Signal: [0 1 2 3 4]
    /// Iter 1: [a b c]     ---> [* 1 2 3 4]
    /// Iter 2:   [a b c]   ---> [* * 2 3 4]
    /// Iter 3:     [a b c] ---> [* * * 3 4]
    /// ```
    #[default]
    Valid,
    /// Output as long as the input, partial overlap at the leading edge.
    ///
    /// ```text
    /// Signal: [p p 0 1 2 3 4]
    /// Iter 1: [a b c]         ---> [* p 0 1 2 3 4]
    ///    ...
    /// Iter 5:         [a b c] ---> [* * * * * 3 4]
    /// ```
    Same,
}

impl OverlapMode {
    /// Zeros to add `(front, back)` for a given filter delay.
    #[inline]
    pub fn padding(&self, delay: usize) -> (usize, usize) {
        match self {
            OverlapMode::Full => (delay, delay),
            OverlapMode::Valid => (0, 0),
            OverlapMode::Same => (delay, 0),
        }
    }

    /// Whether the mode grows the signal.
    #[inline]
    pub fn requires_growth(&self) -> bool {
        !matches!(self, OverlapMode::Valid)
    }

    /// Number of output samples for a signal of `signal_len` and `taps_len` taps.
    #[inline]
    pub fn output_len(&self, signal_len: usize, taps_len: usize) -> usize {
        let delay = taps_len.saturating_sub(1);
        match self {
            OverlapMode::Full => signal_len + delay,
            OverlapMode::Valid => signal_len.saturating_sub(delay),
            OverlapMode::Same => signal_len,
        }
    }
}

impl fmt::Display for OverlapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverlapMode::Full => "full",
            OverlapMode::Valid => "valid",
            OverlapMode::Same => "same",
        })
    }
}

impl FromStr for OverlapMode {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(OverlapMode::Full),
            "valid" => Ok(OverlapMode::Valid),
            "same" => Ok(OverlapMode::Same),
            other => Err(DspError::InvalidConfig(format!(
                "unknown overlap mode '{other}' (expected full, valid or same)"
            ))),
        }
    }
}

/// Direction in which the kernel walks a buffer.
pub trait Traversal {
    /// Human-readable name, used in logs.
    const NAME: &'static str;

    /// Physical index of the `pos`-th element visited in a buffer of `len`.
    fn locate(len: usize, pos: usize) -> usize;
}

/// Walk from the first element to the last.
#[derive(Clone, Copy, Debug)]
pub struct Forward;

/// Walk from the last element to the first.
#[derive(Clone, Copy, Debug)]
pub struct Reverse;

impl Traversal for Forward {
    const NAME: &'static str = "forward";

    #[inline(always)]
    fn locate(_len: usize, pos: usize) -> usize {
        pos
    }
}

impl Traversal for Reverse {
    const NAME: &'static str = "reverse";

    #[inline(always)]
    fn locate(len: usize, pos: usize) -> usize {
        len - 1 - pos
    }
}

/// Sliding dot product of `taps` over `samples`, in place.
///
/// Visiting `samples` in the order given by `D`, output `i` is
/// `sum_j taps[j] * samples[i + j]` and is written back to visited position
/// `i`. Each write lands on a position the remaining iterations never read,
/// so the sweep needs no scratch buffer.
///
/// Returns the number of outputs written, `samples.len() - taps.len() + 1`.
/// They occupy the first visited positions; the trailing `taps.len() - 1`
/// positions keep their input values.
///
/// # Panics
///
/// Panics if `taps` is empty or longer than `samples`.
pub fn overlap_kernel<D, T, F>(samples: &mut [T], taps: &[F]) -> usize
where
    D: Traversal,
    T: Promote<F>,
    F: Sample,
{
    assert!(!taps.is_empty(), "overlap kernel needs at least one tap");
    assert!(
        taps.len() <= samples.len(),
        "taps ({}) longer than signal window ({})",
        taps.len(),
        samples.len()
    );

    let len = samples.len();
    let outputs = len - (taps.len() - 1);

    tracing::trace!(direction = D::NAME, len, taps = taps.len(), outputs, "overlap kernel");

    for pos in 0..outputs {
        let mut acc = T::zero();
        for (j, &tap) in taps.iter().enumerate() {
            acc += T::promote(tap) * samples[D::locate(len, pos + j)];
        }
        samples[D::locate(len, pos)] = acc;
    }

    outputs
}

/// Convolve `signal` with `taps` in place.
///
/// Returns the index range of `signal` holding the result; the leading
/// `taps.len() - 1` samples are left over from the input.
///
/// # Errors
///
/// [`DspError::NotSupported`] if `mode` needs padding and `signal` has a
/// fixed capacity. The signal is untouched in that case.
///
/// # Panics
///
/// Panics if `taps` is empty or not strictly shorter than `signal`.
pub fn convolve<T, F, B>(
    signal: &mut Signal<T, B>,
    taps: &[F],
    mode: OverlapMode,
) -> DspResult<Range<usize>>
where
    T: Promote<F>,
    F: Sample,
    B: Backing<T>,
{
    let delay = check_preconditions(signal, taps.len(), mode, "convolve")?;
    apply_padding(signal, delay, mode)?;

    overlap_kernel::<Reverse, T, F>(signal.as_mut_slice(), taps);

    Ok(delay..signal.size())
}

/// Correlate `signal` with `taps` in place.
///
/// Complex taps are conjugated in place before the sweep, so the caller sees
/// them conjugated afterwards. Returns the index range of `signal` holding
/// the result; the trailing `taps.len() - 1` samples are left over from the
/// input.
///
/// # Errors
///
/// [`DspError::NotSupported`] if `mode` needs padding and `signal` has a
/// fixed capacity. Neither the signal nor the taps are touched in that case.
///
/// # Panics
///
/// Panics if `taps` is empty or not strictly shorter than `signal`.
pub fn correlate<T, F, B>(
    signal: &mut Signal<T, B>,
    taps: &mut [F],
    mode: OverlapMode,
) -> DspResult<Range<usize>>
where
    T: Promote<F>,
    F: Sample,
    B: Backing<T>,
{
    let delay = check_preconditions(signal, taps.len(), mode, "correlate")?;

    if F::IS_COMPLEX {
        for tap in taps.iter_mut() {
            *tap = tap.conj();
        }
    }

    apply_padding(signal, delay, mode)?;

    let outputs = overlap_kernel::<Forward, T, F>(signal.as_mut_slice(), taps);

    Ok(0..outputs)
}

/// Validate an overlap call and return the filter delay.
///
/// Runs before any mutation, so a failed call leaves its arguments intact.
fn check_preconditions<T, B>(
    signal: &Signal<T, B>,
    taps_len: usize,
    mode: OverlapMode,
    operation: &str,
) -> DspResult<usize>
where
    T: Sample,
    B: Backing<T>,
{
    assert!(taps_len > 0, "{operation}: taps must not be empty");
    assert!(
        signal.size() > taps_len,
        "{operation}: signal length ({}) must exceed taps length ({taps_len})",
        signal.size()
    );

    if mode.requires_growth() && !signal.is_growable() {
        return Err(DspError::not_supported(format!(
            "{operation} in {mode} mode pads the signal, but it is {}; \
             pre-pad at construction and use valid mode",
            signal.capacity()
        )));
    }

    let delay = taps_len - 1;
    tracing::debug!(
        operation,
        %mode,
        signal_len = signal.size(),
        taps_len,
        delay,
        output_len = mode.output_len(signal.size(), taps_len),
        "overlap"
    );
    Ok(delay)
}

fn apply_padding<T, B>(signal: &mut Signal<T, B>, delay: usize, mode: OverlapMode) -> DspResult<()>
where
    T: Sample,
    B: Backing<T>,
{
    let (front, back) = mode.padding(delay);
    signal.pad(front, back)
}
