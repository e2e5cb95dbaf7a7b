//! Tests for token sanitizing and parse accounting.
//!
//! ## Test Organization
//!
//! 1. **Classification** - Valid, missing, malformed, non-finite, out of range
//! 2. **Series** - Text, token and value sanitizing
//! 3. **Parse Report** - Counting invariants and merging

use prism::internals::primitives::sanitizer::{DiscardReason, ParseReport, Sanitizer};

// ============================================================================
// Classification
// ============================================================================

/// Test that numeric tokens are accepted after trimming.
#[test]
fn test_classify_valid() {
    let s = Sanitizer::<f64>::new();
    assert_eq!(s.classify("42"), Ok(42.0));
    assert_eq!(s.classify("  -3.5 "), Ok(-3.5));
    assert_eq!(s.classify("1e3"), Ok(1000.0));
    assert_eq!(s.classify("-5"), Ok(-5.0));
}

/// Test null markers regardless of case.
#[test]
fn test_classify_null_markers() {
    let s = Sanitizer::<f64>::new();
    for token in ["", "null", "NULL", "Na", "nan", "NaN", "None", "n/a", "-"] {
        assert_eq!(s.classify(token), Err(DiscardReason::Missing), "token {token:?}");
    }
}

/// Test tokens that fail numeric conversion.
#[test]
fn test_classify_malformed() {
    let s = Sanitizer::<f64>::new();
    for token in ["abc", "1.2.3", "0x10", "12abc", "--1"] {
        assert_eq!(s.classify(token), Err(DiscardReason::Malformed), "token {token:?}");
    }
}

/// Test tokens that parse to infinities.
#[test]
fn test_classify_non_finite() {
    let s = Sanitizer::<f64>::new();
    assert_eq!(s.classify("inf"), Err(DiscardReason::NonFinite));
    assert_eq!(s.classify("-inf"), Err(DiscardReason::NonFinite));
    assert_eq!(s.classify("1e999"), Err(DiscardReason::NonFinite));
}

/// Test that values overflowing a narrower float type are non-finite.
#[test]
fn test_classify_f32_overflow() {
    let s = Sanitizer::<f32>::new();
    assert_eq!(s.classify("1e300"), Err(DiscardReason::NonFinite));
    assert_eq!(s.classify("2.5"), Ok(2.5f32));
}

/// Test the magnitude limit.
#[test]
fn test_classify_magnitude_limit() {
    let s = Sanitizer::with_magnitude_limit(Some(100.0));
    assert_eq!(s.classify("100"), Ok(100.0));
    assert_eq!(s.classify("-100"), Ok(-100.0));
    assert_eq!(s.classify("150"), Err(DiscardReason::OutOfRange));
    assert_eq!(s.classify_value(-200.0), Err(DiscardReason::OutOfRange));
}

/// Test classification of numeric values.
#[test]
fn test_classify_value() {
    let s = Sanitizer::<f64>::new();
    assert_eq!(s.classify_value(1.0), Ok(1.0));
    assert_eq!(s.classify_value(f64::NAN), Err(DiscardReason::NonFinite));
    assert_eq!(s.classify_value(f64::NEG_INFINITY), Err(DiscardReason::NonFinite));
}

// ============================================================================
// Series
// ============================================================================

/// Test sanitizing a text with every discard reason.
#[test]
fn test_sanitize_text_counts() {
    let s = Sanitizer::with_magnitude_limit(Some(1000.0));
    let series = s.sanitize_text("1 2 abc NULL inf 5000 3");

    assert_eq!(series.samples, vec![1.0, 2.0, 3.0]);
    let r = series.report;
    assert_eq!(r.input_count, 7);
    assert_eq!(r.valid_count, 3);
    assert_eq!(r.discarded_count, 4);
    assert_eq!(r.malformed_count, 1);
    assert_eq!(r.missing_count, 1);
    assert_eq!(r.non_finite_count, 1);
    assert_eq!(r.out_of_range_count, 1);
    assert!(r.is_consistent());
}

/// Test that discards remember how many samples preceded them.
#[test]
fn test_discard_slots() {
    let series = Sanitizer::<f64>::new().sanitize_text("x 1 y 2 z");
    let slots: Vec<usize> = series.discards.iter().map(|d| d.slot).collect();

    assert_eq!(slots, vec![0, 1, 2]);
    assert!(series.discards.iter().all(|d| d.reason == DiscardReason::Malformed));
}

/// Test that empty comma fields count as missing.
#[test]
fn test_sanitize_text_empty_fields() {
    let series = Sanitizer::<f64>::new().sanitize_text("1,,2,");

    assert_eq!(series.samples, vec![1.0, 2.0]);
    assert_eq!(series.report.missing_count, 2);
}

/// Test that pre-tokenized input is not split further.
#[test]
fn test_sanitize_tokens() {
    let series = Sanitizer::<f64>::new().sanitize_tokens(["1 2", " 3 ", "NA"]);

    assert_eq!(series.samples, vec![3.0]);
    assert_eq!(series.report.malformed_count, 1);
    assert_eq!(series.report.missing_count, 1);
}

/// Test sanitizing numeric values.
#[test]
fn test_sanitize_values() {
    let series =
        Sanitizer::<f64>::new().sanitize_values(&[1.0, f64::NAN, f64::INFINITY, 2.0]);

    assert_eq!(series.samples, vec![1.0, 2.0]);
    assert_eq!(series.report.non_finite_count, 2);
    assert_eq!(series.len(), 2);
}

/// Test that an input made only of discards yields an empty series.
#[test]
fn test_all_discarded() {
    let series = Sanitizer::<f64>::new().sanitize_text("NULL, abc, inf");

    assert!(series.is_empty());
    assert_eq!(series.report.input_count, 3);
    assert_eq!(series.report.discarded_count, 3);
}

// ============================================================================
// Parse Report
// ============================================================================

/// Test that recording keeps the report consistent.
#[test]
fn test_report_recording() {
    let mut r = ParseReport::default();
    r.record_valid();
    r.record_discard(DiscardReason::Missing);
    r.record_discard(DiscardReason::OutOfRange);

    assert_eq!(r.input_count, 3);
    assert_eq!(r.valid_count, 1);
    assert_eq!(r.discarded_count, 2);
    assert!(r.is_consistent());
}

/// Test merging two reports.
#[test]
fn test_report_merge() {
    let mut a = ParseReport::default();
    a.record_valid();
    a.record_discard(DiscardReason::Malformed);
    let mut b = ParseReport::default();
    b.record_valid();
    b.record_valid();
    b.record_discard(DiscardReason::NonFinite);

    a.merge(&b);
    assert_eq!(a.input_count, 5);
    assert_eq!(a.valid_count, 3);
    assert_eq!(a.malformed_count, 1);
    assert_eq!(a.non_finite_count, 1);
    assert!(a.is_consistent());
}

/// Test that an inconsistent report is detected.
#[test]
fn test_report_inconsistent() {
    let r = ParseReport {
        input_count: 3,
        valid_count: 1,
        discarded_count: 1,
        ..ParseReport::default()
    };
    assert!(!r.is_consistent());
}
