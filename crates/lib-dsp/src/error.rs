//! Error types for DSP operations.

use lib_sample::Capacity;
use thiserror::Error;

/// Errors that can occur during DSP operations.
///
/// Misuse of the overlap preconditions (taps not shorter than the signal)
/// is not represented here: those are programmer errors and panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DspError {
    /// Operation not supported by this storage (e.g. growing a fixed buffer).
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Requested length exceeds a fixed capacity.
    #[error("Capacity exceeded: {capacity} cannot hold {requested} elements")]
    CapacityExceeded { capacity: Capacity, requested: usize },

    /// Sample rate of zero.
    #[error("Sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    /// Insufficient data for operation.
    #[error("Insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Input length mismatch.
    #[error("Input length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DspError {
    /// Shorthand for the unsupported-operation fault.
    pub(crate) fn not_supported(what: impl Into<String>) -> Self {
        Self::NotSupported(what.into())
    }
}

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;
