//! Tests that parallel and sequential batch passes agree.
//!
//! ## Test Organization
//!
//! 1. **Consistency** - Parallel reports equal sequential reports
//! 2. **Configuration** - Parallel flag and parameter delegation
//! 3. **Integration** - Agreement with the base crate

use approx::assert_abs_diff_eq;

use fastPrism::prelude::*;

fn signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let spike = if i % 997 == 0 { 250.0 } else { 0.0 };
            0.02 * x + (x * 0.05).sin() * 4.0 + spike
        })
        .collect()
}

// ============================================================================
// Consistency
// ============================================================================

/// Test that parallel and sequential passes give identical reports.
#[test]
fn test_parallel_matches_sequential() {
    let samples = signal(10_000);

    let seq = Prism::<f64>::new()
        .batch_size(700)
        .return_anomalies()
        .adapter(Batch)
        .parallel(false)
        .build()
        .unwrap()
        .analyze_samples(&samples);

    let par = Prism::<f64>::new()
        .batch_size(700)
        .return_anomalies()
        .adapter(Batch)
        .parallel(true)
        .build()
        .unwrap()
        .analyze_samples(&samples);

    assert_eq!(seq.batch_count(), 15);
    assert_eq!(par, seq);
}

/// Test that batch order survives parallel execution.
#[test]
fn test_parallel_batch_order() {
    let samples = signal(5_000);
    let report = Prism::<f64>::new()
        .batch_size(100)
        .adapter(Batch)
        .build()
        .unwrap()
        .analyze_samples(&samples);

    for (i, batch) in report.batches.iter().enumerate() {
        assert_eq!(batch.index, i);
        assert_eq!(batch.offset, i * 100);
    }
}

/// Test that text input agrees between modes.
#[test]
fn test_parallel_text_input() {
    let text = "1 2 NULL 3, 4,, 5 x 6 7 8 9 10 inf 11 12";
    let build = |parallel: bool| {
        Prism::<f64>::new()
            .batch_size(3)
            .adapter(Batch)
            .parallel(parallel)
            .build()
            .unwrap()
    };

    assert_eq!(build(true).analyze(text), build(false).analyze(text));
}

// ============================================================================
// Configuration
// ============================================================================

/// Test the parallel flag.
#[test]
fn test_is_parallel() {
    let default = Prism::<f64>::new().adapter(Batch).build().unwrap();
    let off = Prism::<f64>::new()
        .adapter(Batch)
        .parallel(false)
        .build()
        .unwrap();
    let off_early = Prism::<f64>::new()
        .parallel(false)
        .adapter(Batch)
        .build()
        .unwrap();

    assert_eq!(default.is_parallel(), cfg!(feature = "cpu"));
    assert!(!off.is_parallel());
    assert!(!off_early.is_parallel());
}

/// Test that parameters and validation are delegated to the base builder.
#[test]
fn test_parameter_delegation() {
    let err = Prism::<f64>::new()
        .adapter(Batch)
        .batch_size(0)
        .build()
        .unwrap_err();
    assert_eq!(err, PrismError::InvalidBatchSize(0));

    let err = Prism::<f64>::new()
        .batch_size(5)
        .batch_size(6)
        .adapter(Batch)
        .build()
        .unwrap_err();
    assert!(matches!(err, PrismError::DuplicateParameter { .. }));

    let report = Prism::<f64>::new()
        .adapter(Batch)
        .prediction_count(2)
        .prediction_step(10)
        .prediction_error_band(1.0)
        .build()
        .unwrap()
        .analyze("0 1 2 3 4");
    let positions: Vec<usize> = report.predictions.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![5, 15]);
    assert_abs_diff_eq!(report.predictions[1].value, 15.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.predictions[1].upper(), 16.0, epsilon = 1e-9);
}

// ============================================================================
// Integration
// ============================================================================

/// Test that fastPrism matches the base crate.
#[test]
fn test_matches_base_crate() {
    let samples = signal(3_000);

    let base = prism::prelude::Prism::<f64>::new()
        .batch_size(400)
        .adapter(prism::prelude::Batch)
        .build()
        .unwrap()
        .analyze_samples(&samples);

    let fast = Prism::<f64>::new()
        .batch_size(400)
        .adapter(Batch)
        .build()
        .unwrap()
        .analyze_samples(&samples);

    assert_eq!(fast, base);
}

/// Test that the streaming adapter is available through fastPrism.
#[test]
fn test_streaming_reexport() {
    let mut stream = Prism::<f64>::new()
        .batch_size(2)
        .adapter(Streaming)
        .build()
        .unwrap();
    stream.process_chunk("1 2 3 4 5");
    let report = stream.finalize();

    assert_eq!(report.batch_count(), 3);
}
