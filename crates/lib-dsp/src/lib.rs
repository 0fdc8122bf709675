//! # lib-dsp
//!
//! In-place overlap engine for one-dimensional sampled signals.
//!
//! This crate provides the computational core:
//!
//! - **Signal**: sample container over fixed-capacity or growable storage
//! - **Overlap**: convolution and correlation with Full, Valid and Same modes
//! - **Fourier**: brute-force DFT through a precomputed Vandermonde matrix
//! - **Render**: condensed summaries and XML dumps of a signal
//!
//! Overlap operations overwrite the signal they are given and return the
//! index range holding the result. Work is direct summation,
//! O(signal length × taps length).

pub mod error;
pub mod storage;
pub mod signal;
pub mod overlap;
pub mod fourier;
pub mod render;

pub use error::{DspError, DspResult};
pub use storage::{Backing, Fixed, Growable};
pub use signal::{DynamicSignal, FixedSignal, Signal};
pub use overlap::{convolve, correlate, overlap_kernel, OverlapMode};
pub use fourier::{Spectrum, Vandermonde};
