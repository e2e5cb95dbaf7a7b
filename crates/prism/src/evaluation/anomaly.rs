//! Z-score anomaly classification.
//!
//! ## Purpose
//!
//! This module scores every sample of a batch by its distance from the batch
//! mean in units of standard deviation and classifies it into a severity.
//!
//! ## Design notes
//!
//! * **Population sigma**: The z-score uses the population standard deviation
//!   from [`StatSummary`].
//! * **Flat data**: When `std_dev == 0` every z-score is 0 and nothing is flagged.
//! * **Strict boundaries**: `z > critical` is CRITICAL; `high < z <= critical`
//!   is HIGH.
//!
//! ## Invariants
//!
//! * Exactly one record per sample, in sample order.
//! * `normal + high + critical` equals the number of samples.
//! * Every z-score is finite and non-negative.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::evaluation::stability::RiskLevel;
use crate::math::descriptive::StatSummary;

/// Default z-score above which a sample is HIGH.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 3.0;

/// Default z-score above which a sample is CRITICAL.
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 5.0;

// ============================================================================
// Records
// ============================================================================

/// How far a sample lies from the batch mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Within the high threshold.
    None,
    /// Above the high threshold, at most the critical threshold.
    High,
    /// Above the critical threshold.
    Critical,
}

impl Severity {
    /// Whether the sample counts as an anomaly.
    #[inline]
    pub fn is_anomalous(self) -> bool {
        self != Severity::None
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Severity::None => write!(f, "NONE"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Classification of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyRecord<T> {
    /// Position of the sample in the scored sequence.
    pub index: usize,

    /// The sample value.
    pub value: T,

    /// `|value - mean| / std_dev`.
    pub z_score: T,

    /// Severity derived from the z-score.
    pub severity: Severity,
}

/// Sample counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnomalySummary {
    /// Samples classified NONE.
    pub normal: usize,

    /// Samples classified HIGH.
    pub high: usize,

    /// Samples classified CRITICAL.
    pub critical: usize,
}

impl AnomalySummary {
    /// Count one classified sample.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::None => self.normal += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    /// Add another summary's counts to this one.
    pub fn merge(&mut self, other: &AnomalySummary) {
        self.normal += other.normal;
        self.high += other.high;
        self.critical += other.critical;
    }

    /// HIGH plus CRITICAL samples.
    pub fn anomalies(&self) -> usize {
        self.high + self.critical
    }

    /// Every classified sample.
    pub fn total(&self) -> usize {
        self.normal + self.high + self.critical
    }

    /// Worst severity present.
    pub fn risk_level(&self) -> RiskLevel {
        if self.critical > 0 {
            RiskLevel::Critical
        } else if self.high > 0 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

/// Per-sample records together with their counts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport<T> {
    /// One record per sample.
    pub records: Vec<AnomalyRecord<T>>,

    /// Counts by severity.
    pub summary: AnomalySummary,
}

impl<T: Float> AnomalyReport<T> {
    /// Records classified HIGH or CRITICAL, with indices shifted by `offset`.
    pub fn flagged(&self, offset: usize) -> Vec<AnomalyRecord<T>> {
        self.records
            .iter()
            .filter(|r| r.severity.is_anomalous())
            .map(|r| AnomalyRecord {
                index: r.index + offset,
                ..*r
            })
            .collect()
    }
}

// ============================================================================
// Detector
// ============================================================================

/// Z-score classifier with a HIGH and a CRITICAL threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyDetector<T> {
    /// Threshold for HIGH.
    pub high_threshold: T,

    /// Threshold for CRITICAL.
    pub critical_threshold: T,
}

impl<T: Float> Default for AnomalyDetector<T> {
    fn default() -> Self {
        Self {
            high_threshold: T::from(DEFAULT_HIGH_THRESHOLD).unwrap_or(T::zero()),
            critical_threshold: T::from(DEFAULT_CRITICAL_THRESHOLD).unwrap_or(T::zero()),
        }
    }
}

impl<T: Float> AnomalyDetector<T> {
    /// Create a detector with explicit thresholds.
    pub fn new(high_threshold: T, critical_threshold: T) -> Self {
        Self {
            high_threshold,
            critical_threshold,
        }
    }

    /// Severity for a z-score.
    #[inline]
    pub fn classify(&self, z_score: T) -> Severity {
        if z_score > self.critical_threshold {
            Severity::Critical
        } else if z_score > self.high_threshold {
            Severity::High
        } else {
            Severity::None
        }
    }

    /// Z-score of `value`; 0 when there is no spread.
    #[inline]
    pub fn z_score(value: T, mean: T, std_dev: T) -> T {
        if std_dev == T::zero() {
            return T::zero();
        }
        let z = (value - mean).abs() / std_dev;
        if z.is_finite() { z } else { T::zero() }
    }

    /// Score every sample against the batch mean and standard deviation.
    pub fn detect(&self, samples: &[T], stats: &StatSummary<T>) -> AnomalyReport<T> {
        let mut summary = AnomalySummary::default();
        let records = samples
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let z_score = Self::z_score(value, stats.mean, stats.std_dev);
                let severity = self.classify(z_score);
                summary.record(severity);
                AnomalyRecord {
                    index,
                    value,
                    z_score,
                    severity,
                }
            })
            .collect();

        AnomalyReport { records, summary }
    }
}
