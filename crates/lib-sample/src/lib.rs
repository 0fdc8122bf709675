//! # lib-sample
//!
//! Element-type vocabulary for the overlap engine.
//!
//! This crate provides the foundational types shared across the workspace:
//! - Sample element types and their real working precision
//! - The accumulator promotion relation between signal and tap types
//! - Sample rates and storage capacity tags

pub mod precision;
pub mod units;

pub use precision::*;
pub use units::*;

/// Re-export num_complex for convenience
pub use num_complex::{Complex, Complex32, Complex64};
