//! Tests for z-score anomaly detection.
//!
//! ## Test Organization
//!
//! 1. **Classification** - Threshold boundaries
//! 2. **Z-Scores** - Degenerate spread
//! 3. **Detection** - Batches with known outliers
//! 4. **Summaries** - Counting and merging

use approx::assert_relative_eq;

use prism::internals::evaluation::anomaly::{AnomalyDetector, AnomalySummary, Severity};
use prism::internals::evaluation::stability::RiskLevel;
use prism::internals::math::descriptive::StatSummary;

/// One outlier of value 100 among `n - 1` zeros; its z-score is `sqrt(n - 1)`.
fn single_outlier(n: usize) -> Vec<f64> {
    let mut samples = vec![0.0; n];
    samples[n - 1] = 100.0;
    samples
}

// ============================================================================
// Classification
// ============================================================================

/// Test the default thresholds.
#[test]
fn test_default_thresholds() {
    let d = AnomalyDetector::<f64>::default();
    assert_eq!(d.high_threshold, 3.0);
    assert_eq!(d.critical_threshold, 5.0);
}

/// Test severities on both sides of each threshold.
#[test]
fn test_classify() {
    let d = AnomalyDetector::<f64>::default();
    assert_eq!(d.classify(0.0), Severity::None);
    assert_eq!(d.classify(3.0), Severity::None);
    assert_eq!(d.classify(4.0), Severity::High);
    assert_eq!(d.classify(5.0), Severity::High);
    assert_eq!(d.classify(6.0), Severity::Critical);
}

/// Test custom thresholds.
#[test]
fn test_classify_custom() {
    let d = AnomalyDetector::new(1.0, 2.0);
    assert_eq!(d.classify(1.5), Severity::High);
    assert_eq!(d.classify(2.5), Severity::Critical);
}

// ============================================================================
// Z-Scores
// ============================================================================

/// Test that zero spread gives a zero z-score.
#[test]
fn test_z_score_zero_spread() {
    assert_eq!(AnomalyDetector::z_score(10.0, 5.0, 0.0), 0.0);
}

/// Test an absolute z-score.
#[test]
fn test_z_score_absolute() {
    assert_relative_eq!(AnomalyDetector::z_score(-4.0, 2.0, 3.0), 2.0, epsilon = 1e-12);
}

// ============================================================================
// Detection
// ============================================================================

/// Test detection against fixed statistics.
#[test]
fn test_detect_fixed_stats() {
    let stats = StatSummary {
        mean: 0.0,
        std_dev: 1.0,
        ..StatSummary::default()
    };
    let report = AnomalyDetector::default().detect(&[0.5, 4.0, -6.0], &stats);

    let severities: Vec<Severity> = report.records.iter().map(|r| r.severity).collect();
    assert_eq!(severities, vec![Severity::None, Severity::High, Severity::Critical]);
    assert_relative_eq!(report.records[2].z_score, 6.0, epsilon = 1e-12);
    assert_eq!(report.summary.normal, 1);
    assert_eq!(report.summary.high, 1);
    assert_eq!(report.summary.critical, 1);
}

/// Test that a single outlier among 21 samples is HIGH.
#[test]
fn test_detect_high_outlier() {
    let samples = single_outlier(21);
    let stats = StatSummary::compute(&samples);
    let report = AnomalyDetector::default().detect(&samples, &stats);

    assert_relative_eq!(report.records[20].z_score, 20f64.sqrt(), epsilon = 1e-9);
    assert_eq!(report.records[20].severity, Severity::High);
    assert_eq!(report.summary.anomalies(), 1);
}

/// Test that a single outlier among 31 samples is CRITICAL.
#[test]
fn test_detect_critical_outlier() {
    let samples = single_outlier(31);
    let stats = StatSummary::compute(&samples);
    let report = AnomalyDetector::default().detect(&samples, &stats);

    assert_eq!(report.records[30].severity, Severity::Critical);
    assert_eq!(report.summary.critical, 1);
    assert_eq!(report.summary.normal, 30);
}

/// Test that a sample exactly four standard deviations out is HIGH.
#[test]
fn test_detect_exactly_four_sigma() {
    // Mean 0 and population sigma 1, both exact
    let mut samples = vec![0.0; 32];
    samples[0] = 4.0;
    samples[1] = -4.0;
    let stats = StatSummary::compute(&samples);
    assert_eq!(stats.mean, 0.0);
    assert_eq!(stats.std_dev, 1.0);

    let report = AnomalyDetector::default().detect(&samples, &stats);

    assert_eq!(report.records[0].z_score, 4.0);
    assert_eq!(report.records[0].severity, Severity::High);
    assert_eq!(report.records[1].severity, Severity::High);
    assert_eq!(report.summary.high, 2);
    assert_eq!(report.summary.critical, 0);
}

/// Test that spread near the largest finite float still flags outliers.
#[test]
fn test_detect_near_max() {
    let mut samples = vec![0.0_f64; 30];
    samples.push(1.7e308);
    let stats = StatSummary::compute(&samples);
    assert!(stats.std_dev.is_finite());

    let report = AnomalyDetector::default().detect(&samples, &stats);

    assert_eq!(report.records[30].severity, Severity::Critical);
    assert_eq!(report.summary.anomalies(), 1);
}

/// Test that constant data has no anomalies.
#[test]
fn test_detect_constant() {
    let samples = [7.0; 50];
    let stats = StatSummary::compute(&samples);
    let report = AnomalyDetector::default().detect(&samples, &stats);

    assert_eq!(report.summary.anomalies(), 0);
    assert_eq!(report.summary.normal, 50);
    assert!(report.records.iter().all(|r| r.z_score == 0.0));
}

/// Test that flagged records carry global indices.
#[test]
fn test_flagged_offset() {
    let samples = single_outlier(31);
    let stats = StatSummary::compute(&samples);
    let report = AnomalyDetector::default().detect(&samples, &stats);

    let flagged = report.flagged(1000);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].index, 1030);
    assert_eq!(flagged[0].value, 100.0);
}

// ============================================================================
// Summaries
// ============================================================================

/// Test counting, merging and the risk level.
#[test]
fn test_summary_merge_and_risk() {
    let mut a = AnomalySummary::default();
    a.record(Severity::None);
    a.record(Severity::High);
    assert_eq!(a.risk_level(), RiskLevel::High);

    let mut b = AnomalySummary::default();
    b.record(Severity::Critical);
    b.record(Severity::None);
    a.merge(&b);

    assert_eq!(a.total(), 4);
    assert_eq!(a.anomalies(), 2);
    assert_eq!(a.risk_level(), RiskLevel::Critical);
    assert_eq!(AnomalySummary::default().risk_level(), RiskLevel::Low);
}

/// Test severity names.
#[test]
fn test_severity_display() {
    assert_eq!(Severity::None.to_string(), "NONE");
    assert_eq!(Severity::High.to_string(), "HIGH");
    assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    assert!(!Severity::None.is_anomalous());
    assert!(Severity::High.is_anomalous());
}
