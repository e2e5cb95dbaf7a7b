//! Batch partitioning of a sanitized series.
//!
//! ## Purpose
//!
//! This module cuts the clean sample sequence into contiguous, fixed-size
//! batches and attributes every discarded token to exactly one batch.
//!
//! ## Design notes
//!
//! * **Borrowing**: Batches are views into the sanitized samples; nothing is copied.
//! * **Attribution**: A discarded token belongs to the batch that would receive
//!   the next accepted sample. Discards after the final sample fall into the
//!   last batch.
//!
//! ## Invariants
//!
//! * Batches are contiguous, ordered, and cover all samples exactly once.
//! * Every batch except possibly the last holds exactly `batch_size` samples.
//! * Per-batch parse reports sum to the series report whenever there is at
//!   least one batch.
//! * An empty series yields no batches.

// Internal dependencies
use crate::primitives::sanitizer::{Discard, ParseReport, SanitizedSeries};

// ============================================================================
// Batch Slice
// ============================================================================

/// One contiguous batch of clean samples.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSlice<'a, T> {
    /// Zero-based batch index.
    pub index: usize,

    /// Position of the first sample in the full clean sequence.
    pub offset: usize,

    /// The batch samples.
    pub samples: &'a [T],

    /// Parse accounting attributed to this batch.
    pub report: ParseReport,
}

impl<T> BatchSlice<'_, T> {
    /// Number of samples in the batch.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ============================================================================
// Partitioning
// ============================================================================

/// Number of batches needed for `n` samples.
#[inline]
pub fn batch_count(n: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    n.div_ceil(batch_size)
}

/// Index of the batch a discarded token belongs to.
#[inline]
pub fn owning_batch(slot: usize, batch_size: usize, n_batches: usize) -> usize {
    (slot / batch_size).min(n_batches.saturating_sub(1))
}

/// Split a sanitized series into batches of `batch_size` samples.
pub fn partition<T>(series: &SanitizedSeries<T>, batch_size: usize) -> Vec<BatchSlice<'_, T>> {
    let n_batches = batch_count(series.samples.len(), batch_size);
    if n_batches == 0 {
        return Vec::new();
    }

    let mut batches: Vec<BatchSlice<'_, T>> = series
        .samples
        .chunks(batch_size)
        .enumerate()
        .map(|(index, samples)| {
            let report = ParseReport {
                input_count: samples.len(),
                valid_count: samples.len(),
                ..ParseReport::default()
            };
            BatchSlice {
                index,
                offset: index * batch_size,
                samples,
                report,
            }
        })
        .collect();

    attribute_discards(&mut batches, &series.discards, batch_size);
    batches
}

fn attribute_discards<T>(batches: &mut [BatchSlice<'_, T>], discards: &[Discard], batch_size: usize) {
    let n_batches = batches.len();
    for discard in discards {
        let idx = owning_batch(discard.slot, batch_size, n_batches);
        batches[idx].report.record_discard(discard.reason);
    }
}
