//! Error types for PRISM operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! the analysis engine. Data problems (malformed tokens, empty input,
//! degenerate batches) are never errors; they resolve to documented fallback
//! values in the component that meets them.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending value (and the limit it broke).
//! * **Deferred**: Duplicate builder settings are recorded and reported at `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Batch configuration**: Batch size must be positive.
//! 2. **Anomaly thresholds**: Positive, finite, and ordered (high <= critical).
//! 3. **Prediction settings**: Count, spacing and error band bounds.
//! 4. **Builder misuse**: Parameters configured more than once.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Numeric values in errors are reported as `f64` regardless of the float type in use.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not represent data-quality problems.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for PRISM configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PrismError {
    /// Batch size must be at least 1.
    InvalidBatchSize(usize),

    /// An anomaly threshold is non-finite or not strictly positive.
    InvalidThreshold {
        /// Name of the threshold ("anomaly_high_threshold" or "anomaly_critical_threshold").
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The HIGH threshold must not exceed the CRITICAL threshold.
    InvalidThresholdOrder {
        /// The HIGH threshold provided.
        high: f64,
        /// The CRITICAL threshold provided.
        critical: f64,
    },

    /// Too many forward predictions were requested.
    InvalidPredictionCount {
        /// The count provided.
        got: usize,
        /// Maximum allowed count.
        max: usize,
    },

    /// Spacing between predicted positions must be at least 1.
    InvalidPredictionStep(usize),

    /// The heuristic prediction error band must be finite and non-negative.
    InvalidErrorBand(f64),

    /// The magnitude limit for accepted samples must be finite and positive.
    InvalidMagnitudeLimit(f64),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for PrismError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidBatchSize(size) => {
                write!(f, "Invalid batch_size: {size} (must be at least 1)")
            }
            Self::InvalidThreshold { name, value } => {
                write!(f, "Invalid {name}: {value} (must be > 0 and finite)")
            }
            Self::InvalidThresholdOrder { high, critical } => {
                write!(
                    f,
                    "Invalid anomaly thresholds: high {high} exceeds critical {critical}"
                )
            }
            Self::InvalidPredictionCount { got, max } => {
                write!(f, "Invalid prediction_count: {got} (must be at most {max})")
            }
            Self::InvalidPredictionStep(step) => {
                write!(f, "Invalid prediction_step: {step} (must be at least 1)")
            }
            Self::InvalidErrorBand(band) => {
                write!(
                    f,
                    "Invalid prediction_error_band: {band} (must be >= 0 and finite)"
                )
            }
            Self::InvalidMagnitudeLimit(limit) => {
                write!(f, "Invalid magnitude_limit: {limit} (must be > 0 and finite)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for PrismError {}
