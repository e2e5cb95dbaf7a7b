//! Validation of analysis configuration.
//!
//! ## Purpose
//!
//! This module checks every configurable parameter against its bounds before
//! an analyzer is built, so the analysis entry points never fail.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **One check per parameter**: Builders call only what they configure.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not inspect input data; bad tokens are not errors.
//! * This module does not correct invalid parameters.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PrismError;

/// Upper bound on the number of forward predictions.
pub const MAX_PREDICTION_COUNT: usize = 10_000;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for PRISM configuration.
///
/// Provides static methods returning `Result<(), PrismError>`.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Batching
    // ========================================================================

    /// Validate the batch size.
    pub fn validate_batch_size(batch_size: usize) -> Result<(), PrismError> {
        if batch_size == 0 {
            return Err(PrismError::InvalidBatchSize(batch_size));
        }
        Ok(())
    }

    // ========================================================================
    // Anomaly Thresholds
    // ========================================================================

    /// Validate one z-score threshold.
    pub fn validate_threshold<T: Float>(value: T, name: &'static str) -> Result<(), PrismError> {
        if !value.is_finite() || value <= T::zero() {
            return Err(PrismError::InvalidThreshold {
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate both thresholds and their ordering.
    pub fn validate_thresholds<T: Float>(high: T, critical: T) -> Result<(), PrismError> {
        Self::validate_threshold(high, "anomaly_high_threshold")?;
        Self::validate_threshold(critical, "anomaly_critical_threshold")?;
        if high > critical {
            return Err(PrismError::InvalidThresholdOrder {
                high: high.to_f64().unwrap_or(f64::NAN),
                critical: critical.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Predictions
    // ========================================================================

    /// Validate the number of forward predictions.
    ///
    /// Zero is allowed and disables prediction.
    pub fn validate_prediction_count(count: usize) -> Result<(), PrismError> {
        if count > MAX_PREDICTION_COUNT {
            return Err(PrismError::InvalidPredictionCount {
                got: count,
                max: MAX_PREDICTION_COUNT,
            });
        }
        Ok(())
    }

    /// Validate the spacing between predicted positions.
    pub fn validate_prediction_step(step: usize) -> Result<(), PrismError> {
        if step == 0 {
            return Err(PrismError::InvalidPredictionStep(step));
        }
        Ok(())
    }

    /// Validate the heuristic error band.
    pub fn validate_error_band<T: Float>(band: T) -> Result<(), PrismError> {
        if !band.is_finite() || band < T::zero() {
            return Err(PrismError::InvalidErrorBand(
                band.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Sanitizing
    // ========================================================================

    /// Validate the optional magnitude limit.
    pub fn validate_magnitude_limit<T: Float>(limit: Option<T>) -> Result<(), PrismError> {
        match limit {
            Some(l) if !l.is_finite() || l <= T::zero() => Err(PrismError::InvalidMagnitudeLimit(
                l.to_f64().unwrap_or(f64::NAN),
            )),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Builder State
    // ========================================================================

    /// Validate that no parameter was set twice.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), PrismError> {
        if let Some(param) = duplicate_param {
            return Err(PrismError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
