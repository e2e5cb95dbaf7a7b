//! Parallel execution engine for PRISM analyses.
//!
//! ## Purpose
//!
//! This module provides the parallel batch pass that is injected into the
//! `prism` crate's execution engine. Batches are independent, so they are
//! analyzed concurrently on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacement for the sequential batch pass.
//! * **Parallelism**: Uses `rayon` for data-parallel execution across batches.
//! * **Ordering**: Results are collected from an indexed iterator, so they
//!   come back in batch order.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Output is identical to the sequential pass for the same input.
//!
//! ## Non-goals
//!
//! * This module does not aggregate batches (handled by `prism::executor`).
//! * This module does not validate configuration (handled by `validator`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use tracing::debug;

// Export dependencies from prism crate
use prism::internals::engine::executor::{PrismConfig, PrismExecutor};
use prism::internals::engine::output::BatchReport;
use prism::internals::primitives::partition::BatchSlice;

// ============================================================================
// Parallel Batch Pass
// ============================================================================

/// Analyze all batches in parallel.
#[cfg(feature = "cpu")]
pub fn batch_pass_parallel<T>(
    batches: &[BatchSlice<'_, T>],
    config: &PrismConfig<T>,
) -> Vec<BatchReport<T>>
where
    T: Float + Send + Sync,
{
    debug!(
        batches = batches.len(),
        threads = rayon::current_num_threads(),
        "Parallel batch pass"
    );

    batches
        .par_iter()
        .map(|batch| PrismExecutor::analyze_batch(batch, config))
        .collect()
}
