//! Composite stability score.
//!
//! ## Purpose
//!
//! This module condenses data quality, anomaly density and the worst anomaly
//! severity into one health figure on a 0 to 100 scale.
//!
//! ## Key concepts
//!
//! * **Quality**: `100 · valid / input`, 0 with no input.
//! * **Anomaly ratio**: `100 · anomalies / valid`, 0 with no valid samples.
//! * **Danger**: LOW is 100, HIGH is 50, CRITICAL is 0.
//! * **Score**: `quality · 0.5 + (100 - ratio) · 0.3 + danger · 0.2`, clamped.
//!
//! ## Invariants
//!
//! * `0 <= value <= 100`.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::evaluation::anomaly::AnomalySummary;
use crate::primitives::sanitizer::ParseReport;

const QUALITY_WEIGHT: f64 = 0.5;
const RATIO_WEIGHT: f64 = 0.3;
const DANGER_WEIGHT: f64 = 0.2;

// ============================================================================
// Risk Level
// ============================================================================

/// Worst anomaly severity observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// No anomalies.
    Low,
    /// At least one HIGH anomaly, no CRITICAL ones.
    High,
    /// At least one CRITICAL anomaly.
    Critical,
}

impl RiskLevel {
    /// Danger contribution to the stability score.
    pub fn danger_score<T: Float>(self) -> T {
        let score = match self {
            RiskLevel::Low => 100.0,
            RiskLevel::High => 50.0,
            RiskLevel::Critical => 0.0,
        };
        T::from(score).unwrap_or(T::zero())
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ============================================================================
// Stability Score
// ============================================================================

/// Health figure with the inputs it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityScore<T> {
    /// Score in `[0, 100]`.
    pub value: T,

    /// Worst severity present.
    pub risk_level: RiskLevel,

    /// Percentage of tokens accepted.
    pub quality: T,

    /// Percentage of valid samples flagged as anomalies.
    pub anomaly_ratio: T,
}

impl<T: Float> StabilityScore<T> {
    /// Score a batch (or a whole run) from its counts.
    pub fn compute(report: &ParseReport, anomalies: &AnomalySummary) -> Self {
        let hundred = T::from(100.0).unwrap_or(T::one());
        let quality: T = percentage(report.valid_count, report.input_count);
        let anomaly_ratio: T = percentage(anomalies.anomalies(), report.valid_count);
        let risk_level = anomalies.risk_level();

        let value: T = quality * weight::<T>(QUALITY_WEIGHT)
            + (hundred - anomaly_ratio) * weight::<T>(RATIO_WEIGHT)
            + risk_level.danger_score::<T>() * weight::<T>(DANGER_WEIGHT);

        Self {
            value: value.max(T::zero()).min(hundred),
            risk_level,
            quality,
            anomaly_ratio,
        }
    }
}

#[inline]
fn weight<T: Float>(w: f64) -> T {
    T::from(w).unwrap_or(T::zero())
}

/// `100 · part / whole`, or 0 when `whole == 0`.
fn percentage<T: Float>(part: usize, whole: usize) -> T {
    if whole == 0 {
        return T::zero();
    }
    let part = T::from(part).unwrap_or(T::zero());
    let whole = T::from(whole).unwrap_or(T::one());
    T::from(100.0).unwrap_or(T::one()) * part / whole
}
