//! High-level API for PRISM analyses with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point for PRISM with parallel
//! batch execution. It extends the `prism` API with a batch adapter that
//! analyzes independent batches on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `prism` builder pattern.
//! * **Parallel-First**: Defaults to parallel execution for batch analyses.
//! * **Transparent**: Marker types (Batch, Streaming) select the builders.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PrismBuilder`] via `Prism::new()`.
//! 2. Chain configuration methods (`.batch_size()`, `.prediction_count()`, etc.).
//! 3. Select an adapter via `.adapter(Batch)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::ParallelBatchPrismBuilder;

// Export dependencies from prism crate
use prism::internals::api::Batch as BaseBatch;

// Publicly re-exported types
pub use prism::internals::api::{
    AnomalyRecord, AnomalySummary, BatchReport, DiscardReason, Model, ModelFit, ModelKind,
    ParseReport, Prediction, PrismAdapter, PrismBuilder, PrismError, PrismInput, PrismReport,
    RiskLevel, Severity, StabilityScore, StatSummary, Streaming,
};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Streaming};
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> PrismAdapter<T> for Batch {
    type Output = ParallelBatchPrismBuilder<T>;

    fn convert(builder: PrismBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastPrism Batch
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseBatch as PrismAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelBatchPrismBuilder { base }
    }
}
