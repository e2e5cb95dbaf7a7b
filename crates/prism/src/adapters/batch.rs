//! Batch adapter for whole-input analysis.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: the complete input is
//! available up front, is sanitized in one pass, partitioned, and handed to
//! the execution engine.
//!
//! ## Design notes
//!
//! * **Processing**: Sanitizes, partitions, runs the batch pass, aggregates.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Infallible analysis**: All checks happen in `build()`; `analyze` never fails.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent API for configuration with sensible defaults.
//! * **Batch pass**: Sequential by default, replaceable by extension crates.
//!
//! ## Non-goals
//!
//! * This adapter does not handle chunked input (use the streaming adapter).

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::engine::executor::{BatchPassFn, DEFAULT_BATCH_SIZE, PrismConfig, PrismExecutor};
use crate::engine::output::PrismReport;
use crate::engine::validator::Validator;
use crate::evaluation::anomaly::{
    AnomalyDetector, DEFAULT_CRITICAL_THRESHOLD, DEFAULT_HIGH_THRESHOLD,
};
use crate::evaluation::prediction::{
    DEFAULT_ERROR_BAND, DEFAULT_PREDICTION_COUNT, DEFAULT_PREDICTION_STEP, PredictionPlan,
};
use crate::input::PrismInput;
use crate::primitives::errors::PrismError;
use crate::primitives::sanitizer::SanitizedSeries;

// ============================================================================
// Batch PRISM Builder
// ============================================================================

/// Builder for the batch analyzer.
#[derive(Debug, Clone)]
pub struct BatchPrismBuilder<T: Float> {
    /// Samples per batch
    pub batch_size: usize,

    /// Z-score above which a sample is HIGH
    pub anomaly_high_threshold: T,

    /// Z-score above which a sample is CRITICAL
    pub anomaly_critical_threshold: T,

    /// Number of forward predictions
    pub prediction_count: usize,

    /// Spacing between predicted positions
    pub prediction_step: usize,

    /// Half-width of the heuristic prediction band
    pub prediction_error_band: T,

    /// Optional bound on accepted sample magnitude
    pub magnitude_limit: Option<T>,

    /// Whether to list flagged anomaly records
    pub return_anomalies: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom batch pass function.
    #[doc(hidden)]
    pub custom_batch_pass: Option<BatchPassFn<T>>,

    /// Parallel execution hint, read by extension crates that install a
    /// parallel batch pass. The sequential engine ignores it.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchPrismBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchPrismBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            anomaly_high_threshold: T::from(DEFAULT_HIGH_THRESHOLD).unwrap_or(T::zero()),
            anomaly_critical_threshold: T::from(DEFAULT_CRITICAL_THRESHOLD).unwrap_or(T::zero()),
            prediction_count: DEFAULT_PREDICTION_COUNT,
            prediction_step: DEFAULT_PREDICTION_STEP,
            prediction_error_band: T::from(DEFAULT_ERROR_BAND).unwrap_or(T::zero()),
            magnitude_limit: None,
            return_anomalies: false,
            custom_batch_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the number of samples per batch.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the z-score above which a sample is HIGH.
    pub fn anomaly_high_threshold(mut self, threshold: T) -> Self {
        self.anomaly_high_threshold = threshold;
        self
    }

    /// Set the z-score above which a sample is CRITICAL.
    pub fn anomaly_critical_threshold(mut self, threshold: T) -> Self {
        self.anomaly_critical_threshold = threshold;
        self
    }

    /// Discard samples with `|v| > limit`.
    pub fn magnitude_limit(mut self, limit: T) -> Self {
        self.magnitude_limit = Some(limit);
        self
    }

    /// Enable listing HIGH and CRITICAL records in the reports.
    pub fn return_anomalies(mut self, enabled: bool) -> Self {
        self.return_anomalies = enabled;
        self
    }

    // ========================================================================
    // Batch-Specific Setters
    // ========================================================================

    /// Set the number of forward predictions.
    pub fn prediction_count(mut self, count: usize) -> Self {
        self.prediction_count = count;
        self
    }

    /// Set the spacing between predicted positions.
    pub fn prediction_step(mut self, step: usize) -> Self {
        self.prediction_step = step;
        self
    }

    /// Set the half-width of the prediction error band.
    pub fn prediction_error_band(mut self, band: T) -> Self {
        self.prediction_error_band = band;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom batch pass function.
    #[doc(hidden)]
    pub fn custom_batch_pass(mut self, pass: BatchPassFn<T>) -> Self {
        self.custom_batch_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch analyzer.
    pub fn build(self) -> Result<BatchPrism<T>, PrismError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_batch_size(self.batch_size)?;
        Validator::validate_thresholds(self.anomaly_high_threshold, self.anomaly_critical_threshold)?;
        Validator::validate_prediction_count(self.prediction_count)?;
        Validator::validate_prediction_step(self.prediction_step)?;
        Validator::validate_error_band(self.prediction_error_band)?;
        Validator::validate_magnitude_limit(self.magnitude_limit)?;

        let config = PrismConfig {
            batch_size: self.batch_size,
            detector: AnomalyDetector::new(
                self.anomaly_high_threshold,
                self.anomaly_critical_threshold,
            ),
            prediction: PredictionPlan {
                count: self.prediction_count,
                step: self.prediction_step,
                error_band: self.prediction_error_band,
            },
            magnitude_limit: self.magnitude_limit,
            return_anomalies: self.return_anomalies,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_batch_pass: self.custom_batch_pass,
        };

        Ok(BatchPrism { config })
    }
}

// ============================================================================
// Batch PRISM Processor
// ============================================================================

/// Batch analyzer.
#[derive(Debug, Clone)]
pub struct BatchPrism<T: Float> {
    config: PrismConfig<T>,
}

impl<T: Float> BatchPrism<T> {
    /// Analyze text or pre-tokenized input.
    pub fn analyze<I: PrismInput + ?Sized>(&self, input: &I) -> PrismReport<T> {
        let series = input.sanitize(&self.config.sanitizer());
        self.run(series)
    }

    /// Analyze numeric samples; non-finite or out-of-range values are discarded.
    pub fn analyze_samples(&self, samples: &[T]) -> PrismReport<T> {
        let series = self.config.sanitizer().sanitize_values(samples);
        self.run(series)
    }

    /// The validated configuration.
    pub fn config(&self) -> &PrismConfig<T> {
        &self.config
    }

    fn run(&self, series: SanitizedSeries<T>) -> PrismReport<T> {
        let report = &series.report;
        debug!(
            input = report.input_count,
            valid = report.valid_count,
            missing = report.missing_count,
            malformed = report.malformed_count,
            non_finite = report.non_finite_count,
            out_of_range = report.out_of_range_count,
            "Input sanitized"
        );
        PrismExecutor::run_with_config(&series, &self.config)
    }
}
