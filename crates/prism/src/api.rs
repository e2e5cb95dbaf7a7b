//! High-level API for PRISM analyses.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements
//! a fluent builder for the analysis parameters and the choice of an
//! execution adapter (Batch or Streaming).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PrismBuilder`] via `Prism::new()`.
//! 2. Chain configuration methods (`.batch_size()`, `.prediction_count()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchPrismBuilder;
use crate::adapters::streaming::StreamingPrismBuilder;
use crate::engine::executor::BatchPassFn;

// Publicly re-exported types
pub use crate::adapters::batch::BatchPrism;
pub use crate::adapters::streaming::StreamingPrism;
pub use crate::algorithms::models::{Model, ModelFit, ModelKind};
pub use crate::engine::output::{BatchReport, PrismReport};
pub use crate::evaluation::anomaly::{AnomalyRecord, AnomalySummary, Severity};
pub use crate::evaluation::prediction::Prediction;
pub use crate::evaluation::stability::{RiskLevel, StabilityScore};
pub use crate::input::PrismInput;
pub use crate::math::descriptive::StatSummary;
pub use crate::primitives::errors::PrismError;
pub use crate::primitives::sanitizer::{DiscardReason, ParseReport};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Streaming};
}

/// Fluent builder for configuring PRISM parameters and execution modes.
#[derive(Debug, Clone)]
pub struct PrismBuilder<T> {
    /// Samples per batch.
    pub batch_size: Option<usize>,

    /// Z-score above which a sample is HIGH.
    pub anomaly_high_threshold: Option<T>,

    /// Z-score above which a sample is CRITICAL.
    pub anomaly_critical_threshold: Option<T>,

    /// Number of forward predictions.
    pub prediction_count: Option<usize>,

    /// Spacing between predicted positions.
    pub prediction_step: Option<usize>,

    /// Half-width of the heuristic prediction band.
    pub prediction_error_band: Option<T>,

    /// Discard samples beyond this magnitude.
    pub magnitude_limit: Option<T>,

    /// List flagged anomaly records in the reports.
    pub return_anomalies: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom batch pass function (Batch only).
    #[doc(hidden)]
    pub custom_batch_pass: Option<BatchPassFn<T>>,

    /// Parallel execution hint (Batch only).
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for PrismBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PrismBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: PrismAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            batch_size: None,
            anomaly_high_threshold: None,
            anomaly_critical_threshold: None,
            prediction_count: None,
            prediction_step: None,
            prediction_error_band: None,
            magnitude_limit: None,
            return_anomalies: None,
            custom_batch_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the number of samples per batch (default 1000).
    pub fn batch_size(mut self, size: usize) -> Self {
        if self.batch_size.is_some() {
            self.duplicate_param = Some("batch_size");
        }
        self.batch_size = Some(size);
        self
    }

    /// Set the z-score above which a sample is HIGH (default 3).
    pub fn anomaly_high_threshold(mut self, threshold: T) -> Self {
        if self.anomaly_high_threshold.is_some() {
            self.duplicate_param = Some("anomaly_high_threshold");
        }
        self.anomaly_high_threshold = Some(threshold);
        self
    }

    /// Set the z-score above which a sample is CRITICAL (default 5).
    pub fn anomaly_critical_threshold(mut self, threshold: T) -> Self {
        if self.anomaly_critical_threshold.is_some() {
            self.duplicate_param = Some("anomaly_critical_threshold");
        }
        self.anomaly_critical_threshold = Some(threshold);
        self
    }

    /// Set the number of forward predictions (default 3).
    pub fn prediction_count(mut self, count: usize) -> Self {
        if self.prediction_count.is_some() {
            self.duplicate_param = Some("prediction_count");
        }
        self.prediction_count = Some(count);
        self
    }

    /// Set the spacing between predicted positions (default 5).
    pub fn prediction_step(mut self, step: usize) -> Self {
        if self.prediction_step.is_some() {
            self.duplicate_param = Some("prediction_step");
        }
        self.prediction_step = Some(step);
        self
    }

    /// Set the half-width of the prediction error band (default 2.5).
    pub fn prediction_error_band(mut self, band: T) -> Self {
        if self.prediction_error_band.is_some() {
            self.duplicate_param = Some("prediction_error_band");
        }
        self.prediction_error_band = Some(band);
        self
    }

    /// Discard samples with `|v| > limit` (off by default).
    pub fn magnitude_limit(mut self, limit: T) -> Self {
        if self.magnitude_limit.is_some() {
            self.duplicate_param = Some("magnitude_limit");
        }
        self.magnitude_limit = Some(limit);
        self
    }

    /// Include HIGH and CRITICAL records in the reports.
    pub fn return_anomalies(mut self) -> Self {
        self.return_anomalies = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom batch pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_batch_pass(mut self, pass: BatchPassFn<T>) -> Self {
        self.custom_batch_pass = Some(pass);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait PrismAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`PrismBuilder`] into a specialized execution builder.
    fn convert(builder: PrismBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> PrismAdapter<T> for Batch {
    type Output = BatchPrismBuilder<T>;

    fn convert(builder: PrismBuilder<T>) -> Self::Output {
        let mut result = BatchPrismBuilder::default();

        if let Some(bs) = builder.batch_size {
            result.batch_size = bs;
        }
        if let Some(high) = builder.anomaly_high_threshold {
            result.anomaly_high_threshold = high;
        }
        if let Some(critical) = builder.anomaly_critical_threshold {
            result.anomaly_critical_threshold = critical;
        }
        if let Some(count) = builder.prediction_count {
            result.prediction_count = count;
        }
        if let Some(step) = builder.prediction_step {
            result.prediction_step = step;
        }
        if let Some(band) = builder.prediction_error_band {
            result.prediction_error_band = band;
        }
        result.magnitude_limit = builder.magnitude_limit;
        if let Some(ra) = builder.return_anomalies {
            result.return_anomalies = ra;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(bp) = builder.custom_batch_pass {
            result.custom_batch_pass = Some(bp);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for chunked streaming processing.
#[derive(Debug, Clone, Copy)]
pub struct Streaming;

impl<T: Float> PrismAdapter<T> for Streaming {
    type Output = StreamingPrismBuilder<T>;

    fn convert(builder: PrismBuilder<T>) -> Self::Output {
        let mut result = StreamingPrismBuilder::default();

        if let Some(bs) = builder.batch_size {
            result.batch_size = bs;
        }
        if let Some(high) = builder.anomaly_high_threshold {
            result.anomaly_high_threshold = high;
        }
        if let Some(critical) = builder.anomaly_critical_threshold {
            result.anomaly_critical_threshold = critical;
        }
        if let Some(count) = builder.prediction_count {
            result.prediction_count = count;
        }
        if let Some(step) = builder.prediction_step {
            result.prediction_step = step;
        }
        if let Some(band) = builder.prediction_error_band {
            result.prediction_error_band = band;
        }
        result.magnitude_limit = builder.magnitude_limit;
        if let Some(ra) = builder.return_anomalies {
            result.return_anomalies = ra;
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
