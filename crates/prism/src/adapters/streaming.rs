//! Streaming adapter for chunked text input.
//!
//! ## Purpose
//!
//! This module provides the streaming execution adapter: text arrives in
//! arbitrary chunks, is tokenized incrementally, and every batch is analyzed
//! as soon as it is known to be complete. `finalize` flushes the last batch
//! and aggregates the run.
//!
//! ## Design notes
//!
//! * **Chunk boundaries**: Tokens split across chunks are reassembled, so the
//!   final report equals the batch adapter's report for the joined text.
//! * **Late completion**: A full batch is only analyzed once the next sample
//!   arrives, since discards seen in between still belong to it if the
//!   stream ends there.
//! * **Sequential**: Batches are analyzed one at a time as they complete.
//!
//! ## Invariants
//!
//! * Emitted batch reports are in batch order and never revised.
//! * The finalized report is identical to a batch analysis of the same text.
//!
//! ## Non-goals
//!
//! * This adapter does not update models across batches.
//! * This adapter requires chunks to be provided in stream order.

// External dependencies
use core::mem::take;
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::engine::executor::{DEFAULT_BATCH_SIZE, PrismConfig, PrismExecutor};
use crate::engine::output::{BatchReport, PrismReport};
use crate::engine::validator::Validator;
use crate::evaluation::anomaly::{
    AnomalyDetector, DEFAULT_CRITICAL_THRESHOLD, DEFAULT_HIGH_THRESHOLD,
};
use crate::evaluation::prediction::{
    DEFAULT_ERROR_BAND, DEFAULT_PREDICTION_COUNT, DEFAULT_PREDICTION_STEP, PredictionPlan,
};
use crate::primitives::errors::PrismError;
use crate::primitives::partition::BatchSlice;
use crate::primitives::sanitizer::{DiscardReason, ParseReport, Sanitizer};
use crate::primitives::tokens::Tokenizer;

// ============================================================================
// Streaming PRISM Builder
// ============================================================================

/// Builder for the streaming analyzer.
#[derive(Debug, Clone)]
pub struct StreamingPrismBuilder<T: Float> {
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

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for StreamingPrismBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> StreamingPrismBuilder<T> {
    /// Create a new streaming builder with default parameters.
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

    /// Set the number of forward predictions made by `finalize`.
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

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the streaming analyzer.
    pub fn build(self) -> Result<StreamingPrism<T>, PrismError> {
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
            custom_batch_pass: None,
        };

        Ok(StreamingPrism {
            sanitizer: config.sanitizer(),
            config,
            tokenizer: Tokenizer::new(),
            current: Vec::with_capacity(self.batch_size.min(DEFAULT_BATCH_SIZE)),
            current_report: ParseReport::default(),
            carry: ParseReport::default(),
            total: ParseReport::default(),
            completed: Vec::new(),
        })
    }
}

// ============================================================================
// Streaming PRISM Processor
// ============================================================================

/// Streaming analyzer state.
#[derive(Debug, Clone)]
pub struct StreamingPrism<T: Float> {
    config: PrismConfig<T>,
    sanitizer: Sanitizer<T>,
    tokenizer: Tokenizer,

    /// Samples of the batch being filled.
    current: Vec<T>,

    /// Accounting attributed to `current`.
    current_report: ParseReport,

    /// Discards seen while `current` was full; they go to whichever batch ends up owning them.
    carry: ParseReport,

    /// Accounting for the whole stream.
    total: ParseReport,

    /// Reports of every batch analyzed so far.
    completed: Vec<BatchReport<T>>,
}

impl<T: Float> StreamingPrism<T> {
    /// Feed a chunk of text. Returns the reports of batches completed by it.
    pub fn process_chunk(&mut self, chunk: &str) -> Vec<BatchReport<T>> {
        let before = self.completed.len();
        let mut tokenizer = take(&mut self.tokenizer);
        tokenizer.feed(chunk, |token| {
            let outcome = self.sanitizer.classify(token);
            self.accept(outcome);
        });
        self.tokenizer = tokenizer;
        self.completed[before..].to_vec()
    }

    /// Feed numeric samples. Returns the reports of batches completed by them.
    pub fn process_samples(&mut self, samples: &[T]) -> Vec<BatchReport<T>> {
        let before = self.completed.len();
        for &value in samples {
            let outcome = self.sanitizer.classify_value(value);
            self.accept(outcome);
        }
        self.completed[before..].to_vec()
    }

    /// Flush the trailing token and batch, and aggregate the whole stream.
    ///
    /// The analyzer is reset afterwards and can be reused.
    pub fn finalize(&mut self) -> PrismReport<T> {
        let mut tokenizer = take(&mut self.tokenizer);
        tokenizer.finish(|token| {
            let outcome = self.sanitizer.classify(token);
            self.accept(outcome);
        });

        if !self.current.is_empty() {
            let carry = take(&mut self.carry);
            self.current_report.merge(&carry);
            self.flush();
        }

        debug!(
            input = self.total.input_count,
            valid = self.total.valid_count,
            discarded = self.total.discarded_count,
            "Stream finalized"
        );

        let batches = take(&mut self.completed);
        let report = PrismExecutor::aggregate(self.total, batches, &self.config);
        self.reset();
        report
    }

    /// Drop all buffered state.
    pub fn reset(&mut self) {
        self.tokenizer = Tokenizer::new();
        self.current.clear();
        self.current_report = ParseReport::default();
        self.carry = ParseReport::default();
        self.total = ParseReport::default();
        self.completed.clear();
    }

    /// Number of batches analyzed so far.
    pub fn completed_batches(&self) -> usize {
        self.completed.len()
    }

    fn accept(&mut self, outcome: Result<T, DiscardReason>) {
        match outcome {
            Ok(value) => {
                self.total.record_valid();
                if self.current.len() == self.config.batch_size {
                    self.flush();
                    self.current_report = take(&mut self.carry);
                }
                self.current.push(value);
                self.current_report.record_valid();
            }
            Err(reason) => {
                self.total.record_discard(reason);
                if self.current.len() == self.config.batch_size {
                    self.carry.record_discard(reason);
                } else {
                    self.current_report.record_discard(reason);
                }
            }
        }
    }

    fn flush(&mut self) {
        let index = self.completed.len();
        let batch = BatchSlice {
            index,
            offset: index * self.config.batch_size,
            samples: &self.current,
            report: self.current_report,
        };
        let report = PrismExecutor::analyze_batch(&batch, &self.config);
        self.completed.push(report);
        self.current.clear();
        self.current_report = ParseReport::default();
    }
}
