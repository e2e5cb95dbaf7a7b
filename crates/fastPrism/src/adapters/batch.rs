//! Batch adapter with parallel batch execution.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter for PRISM analyses with
//! batches analyzed concurrently. It wraps the `prism` batch builder and
//! injects the parallel batch pass when parallelism is enabled.
//!
//! ## Design notes
//!
//! * **Delegation**: All parameters and validation live in the `prism` builder.
//! * **Parallelism**: Adds parallel execution via `rayon` (fastPrism extension).
//! * **Default**: Parallel execution is on unless explicitly disabled.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Reports are identical whether parallelism is enabled or not.
//!
//! ## Non-goals
//!
//! * This adapter does not handle chunked input (use the streaming adapter).

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::batch_pass_parallel;

// External dependencies
use num_traits::Float;
use std::result::Result;

// Export dependencies from prism crate
use prism::internals::adapters::batch::{BatchPrism, BatchPrismBuilder};
use prism::internals::engine::output::PrismReport;
use prism::internals::input::PrismInput;
use prism::internals::primitives::errors::PrismError;

// ============================================================================
// Extended Batch PRISM Builder
// ============================================================================

/// Builder for the batch analyzer with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchPrismBuilder<T: Float> {
    /// Base builder from the prism crate
    pub base: BatchPrismBuilder<T>,
}

impl<T: Float> Default for ParallelBatchPrismBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchPrismBuilder<T> {
    /// Create a new batch builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from prism BatchPrismBuilder
    /// * parallel: true (fastPrism extension)
    fn new() -> Self {
        let base = BatchPrismBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the number of samples per batch.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.base = self.base.batch_size(batch_size);
        self
    }

    /// Set the z-score above which a sample is HIGH.
    pub fn anomaly_high_threshold(mut self, threshold: T) -> Self {
        self.base = self.base.anomaly_high_threshold(threshold);
        self
    }

    /// Set the z-score above which a sample is CRITICAL.
    pub fn anomaly_critical_threshold(mut self, threshold: T) -> Self {
        self.base = self.base.anomaly_critical_threshold(threshold);
        self
    }

    /// Discard samples with `|v| > limit`.
    pub fn magnitude_limit(mut self, limit: T) -> Self {
        self.base = self.base.magnitude_limit(limit);
        self
    }

    /// Enable listing HIGH and CRITICAL records in the reports.
    pub fn return_anomalies(mut self, enabled: bool) -> Self {
        self.base = self.base.return_anomalies(enabled);
        self
    }

    // ========================================================================
    // Batch-Specific Setters
    // ========================================================================

    /// Set the number of forward predictions.
    pub fn prediction_count(mut self, count: usize) -> Self {
        self.base = self.base.prediction_count(count);
        self
    }

    /// Set the spacing between predicted positions.
    pub fn prediction_step(mut self, step: usize) -> Self {
        self.base = self.base.prediction_step(step);
        self
    }

    /// Set the half-width of the prediction error band.
    pub fn prediction_error_band(mut self, band: T) -> Self {
        self.base = self.base.prediction_error_band(band);
        self
    }
}

impl<T: Float + Send + Sync> ParallelBatchPrismBuilder<T> {
    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch analyzer.
    pub fn build(self) -> Result<ParallelBatchPrism<T>, PrismError> {
        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                builder = builder.custom_batch_pass(batch_pass_parallel);
            } else {
                builder.custom_batch_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            builder.custom_batch_pass = None;
        }

        // Validation is centralized in the prism crate
        let inner = builder.build()?;
        Ok(ParallelBatchPrism { inner })
    }
}

// ============================================================================
// Extended Batch PRISM Processor
// ============================================================================

/// Batch analyzer with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchPrism<T: Float> {
    inner: BatchPrism<T>,
}

impl<T: Float + Send + Sync> ParallelBatchPrism<T> {
    /// Analyze text or pre-tokenized input.
    pub fn analyze<I: PrismInput + ?Sized>(&self, input: &I) -> PrismReport<T> {
        self.inner.analyze(input)
    }

    /// Analyze numeric samples; non-finite or out-of-range values are discarded.
    pub fn analyze_samples(&self, samples: &[T]) -> PrismReport<T> {
        self.inner.analyze_samples(samples)
    }

    /// Whether batches are analyzed in parallel.
    pub fn is_parallel(&self) -> bool {
        self.inner.config().custom_batch_pass.is_some()
    }
}
