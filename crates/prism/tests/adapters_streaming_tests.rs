//! Tests for the streaming adapter.
//!
//! ## Test Organization
//!
//! 1. **Equivalence** - Streaming and batch reports agree
//! 2. **Incremental Output** - Batches completed per chunk
//! 3. **Attribution** - Discards around batch boundaries
//! 4. **Lifecycle** - Finalize, reset and reuse

use prism::internals::api::{BatchPrism, StreamingPrism};
use prism::prelude::*;

fn stream(batch_size: usize) -> StreamingPrism<f64> {
    Prism::<f64>::new()
        .batch_size(batch_size)
        .return_anomalies()
        .adapter(Streaming)
        .build()
        .unwrap()
}

fn batch(batch_size: usize) -> BatchPrism<f64> {
    Prism::<f64>::new()
        .batch_size(batch_size)
        .return_anomalies()
        .adapter(Batch)
        .build()
        .unwrap()
}

const TEXT: &str = "1 2 3 x 4, 5,,6 [7 8] 9 NULL 10 inf 11 12 13 14 100 15 -";

// ============================================================================
// Equivalence
// ============================================================================

/// Test that one-character chunks reproduce the batch report.
#[test]
fn test_char_chunks_match_batch() {
    let mut s = stream(3);
    for c in TEXT.chars() {
        s.process_chunk(&c.to_string());
    }
    assert_eq!(s.finalize(), batch(3).analyze(TEXT));
}

/// Test several chunk sizes and batch sizes.
#[test]
fn test_chunk_sizes_match_batch() {
    let bytes = TEXT.as_bytes();
    for batch_size in [1, 2, 3, 5, 100] {
        let expected = batch(batch_size).analyze(TEXT);
        for chunk_size in [1, 2, 4, 7, TEXT.len()] {
            let mut s = stream(batch_size);
            for chunk in bytes.chunks(chunk_size) {
                s.process_chunk(std::str::from_utf8(chunk).unwrap());
            }
            assert_eq!(
                s.finalize(),
                expected,
                "batch_size {batch_size}, chunk_size {chunk_size}"
            );
        }
    }
}

/// Test that numeric samples stream like the batch adapter.
#[test]
fn test_samples_match_batch() {
    let values: Vec<f64> = (0..57).map(|i| (i as f64 * 0.3).cos() * 10.0).collect();
    let mut s = stream(10);
    for part in values.chunks(8) {
        s.process_samples(part);
    }
    assert_eq!(s.finalize(), batch(10).analyze_samples(&values));
}

// ============================================================================
// Incremental Output
// ============================================================================

/// Test that a batch is emitted once the next sample arrives.
#[test]
fn test_batches_emitted_late() {
    let mut s = stream(2);

    let first = s.process_chunk("1 2 3 4");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].index, 0);
    assert_eq!(first[0].len(), 2);

    // "4" is still pending in the tokenizer
    assert!(s.process_chunk(" 5").is_empty());
    assert_eq!(s.completed_batches(), 1);

    let report = s.finalize();
    assert_eq!(report.batch_count(), 3);
    assert_eq!(report.parse_report.valid_count, 5);
}

/// Test that emitted batch reports are final.
#[test]
fn test_emitted_batches_unchanged() {
    let mut s = stream(3);
    let mut emitted = Vec::new();
    for chunk in ["1 2 3 ", "4 5 6 7 ", "8 9 10 "] {
        emitted.extend(s.process_chunk(chunk));
    }
    let report = s.finalize();

    assert_eq!(emitted.len(), 3);
    assert_eq!(&report.batches[..3], &emitted[..]);
}

// ============================================================================
// Attribution
// ============================================================================

/// Test that a discard after a full batch moves to the next batch.
#[test]
fn test_discard_after_full_batch() {
    let mut s = stream(2);
    s.process_chunk("1 2 x 3");
    let report = s.finalize();

    assert_eq!(report.batches[0].parse_report.input_count, 2);
    assert_eq!(report.batches[1].parse_report.input_count, 2);
    assert_eq!(report.batches[1].parse_report.malformed_count, 1);
}

/// Test that trailing discards stay with the last batch.
#[test]
fn test_trailing_discards() {
    let mut s = stream(2);
    s.process_chunk("1 2 x y");
    let report = s.finalize();

    assert_eq!(report.batch_count(), 1);
    assert_eq!(report.batches[0].parse_report.input_count, 4);
}

/// Test a stream made only of discards.
#[test]
fn test_only_discards() {
    let mut s = stream(2);
    s.process_chunk("a, NULL, inf");
    let report = s.finalize();

    assert_eq!(report.batch_count(), 0);
    assert_eq!(report.parse_report.discarded_count, 3);
    assert!(!report.has_model());
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Test that finalize resets the analyzer.
#[test]
fn test_finalize_resets() {
    let mut s = stream(2);
    s.process_chunk("5 6 7 8 9");
    let _ = s.finalize();

    s.process_chunk("1 2 3");
    let report = s.finalize();
    assert_eq!(report, batch(2).analyze("1 2 3"));
}

/// Test that reset drops buffered input.
#[test]
fn test_reset() {
    let mut s = stream(2);
    s.process_chunk("1 2 3 4");
    s.reset();
    assert_eq!(s.completed_batches(), 0);

    let report = s.finalize();
    assert_eq!(report.parse_report.input_count, 0);
    assert_eq!(report.batch_count(), 0);
}

/// Test streaming builder validation.
#[test]
fn test_builder_validation() {
    let err = Prism::<f64>::new()
        .prediction_count(20_000)
        .adapter(Streaming)
        .build()
        .unwrap_err();
    assert!(matches!(err, PrismError::InvalidPredictionCount { got: 20_000, .. }));
}

/// Test that a batch size too large to preallocate still works.
#[test]
fn test_huge_batch_size() {
    let mut stream = Prism::<f64>::new()
        .batch_size(usize::MAX)
        .adapter(Streaming)
        .build()
        .unwrap();
    stream.process_chunk("1 2 x 3");
    let report = stream.finalize();

    assert_eq!(report.batch_count(), 1);
    assert_eq!(report.batches[0].len(), 3);
    let expected = Prism::<f64>::new()
        .batch_size(usize::MAX)
        .adapter(Batch)
        .build()
        .unwrap()
        .analyze("1 2 x 3");
    assert_eq!(report, expected);
}
