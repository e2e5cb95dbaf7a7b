//! Output types for PRISM analyses.
//!
//! ## Purpose
//!
//! This module defines [`BatchReport`], the diagnostics of one batch, and
//! [`PrismReport`], the run-level report that aggregates them.
//!
//! ## Design notes
//!
//! * **Pure data**: Reports are built once and never mutated by the library.
//! * **Optional listings**: Flagged anomaly records are only present when
//!   requested; counts are always present.
//! * **Export**: All report types derive `serde::Serialize`.
//! * **Ergonomics**: `PrismReport` implements `Display` as a plain-text summary.
//!
//! ## Invariants
//!
//! * Batches appear in input order; batch `i` starts at `offset = i * batch_size`.
//! * Anomaly record indices are positions in the full clean sequence.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not colour or otherwise style its text output.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::algorithms::models::ModelFit;
use crate::evaluation::anomaly::{AnomalyRecord, AnomalySummary};
use crate::evaluation::prediction::Prediction;
use crate::evaluation::stability::StabilityScore;
use crate::math::descriptive::StatSummary;
use crate::primitives::sanitizer::ParseReport;

// ============================================================================
// Batch Report
// ============================================================================

/// Diagnostics of one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport<T> {
    /// Zero-based batch index.
    pub index: usize,

    /// Position of the first batch sample in the clean sequence.
    pub offset: usize,

    /// Parse accounting attributed to this batch.
    pub parse_report: ParseReport,

    /// Statistics of the batch samples.
    pub statistics: StatSummary<T>,

    /// Winning model, if any candidate could be fitted.
    pub model: Option<ModelFit<T>>,

    /// Every candidate that was fitted, in preference order.
    pub candidates: Vec<ModelFit<T>>,

    /// Anomaly counts by severity.
    pub anomalies: AnomalySummary,

    /// HIGH and CRITICAL records, when requested.
    pub anomaly_records: Option<Vec<AnomalyRecord<T>>>,

    /// Stability of this batch.
    pub stability: StabilityScore<T>,
}

impl<T> BatchReport<T> {
    /// Number of clean samples in the batch.
    pub fn len(&self) -> usize {
        self.parse_report.valid_count
    }

    /// Whether the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.parse_report.valid_count == 0
    }
}

// ============================================================================
// Run Report
// ============================================================================

/// Run-level diagnostics aggregated over all batches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrismReport<T> {
    /// Token accounting for the whole input.
    pub parse_report: ParseReport,

    /// Statistics pooled over all batches.
    pub statistics: StatSummary<T>,

    /// Best batch model over the run.
    pub model: Option<ModelFit<T>>,

    /// Index of the batch the winning model was fitted on.
    pub model_batch: Option<usize>,

    /// Mean R² of the per-batch winners.
    pub mean_r_squared: T,

    /// Summed anomaly counts.
    pub anomalies: AnomalySummary,

    /// HIGH and CRITICAL records of every batch, when requested.
    pub anomaly_records: Option<Vec<AnomalyRecord<T>>>,

    /// Stability of the whole run.
    pub stability: StabilityScore<T>,

    /// Forward predictions from the winning model.
    pub predictions: Vec<Prediction<T>>,

    /// Per-batch reports in input order.
    pub batches: Vec<BatchReport<T>>,

    /// Batch size the run used.
    pub batch_size: usize,
}

impl<T: Float> PrismReport<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Number of batches analyzed.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Check if a model was selected.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Check if anomaly records were collected.
    pub fn has_anomaly_records(&self) -> bool {
        self.anomaly_records.is_some()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for PrismReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let p = &self.parse_report;
        writeln!(f, "Summary:")?;
        writeln!(f, "  Tokens:     {}", p.input_count)?;
        writeln!(f, "  Valid:      {}", p.valid_count)?;
        writeln!(f, "  Discarded:  {}", p.discarded_count)?;
        writeln!(
            f,
            "  Batches:    {} (batch size {})",
            self.batches.len(),
            self.batch_size
        )?;
        writeln!(f)?;

        let s = &self.statistics;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Mean:       {}", s.mean)?;
        writeln!(f, "  Median:     {}", s.median)?;
        writeln!(f, "  Mode:       {}", s.mode)?;
        writeln!(f, "  Std dev:    {}", s.std_dev)?;
        writeln!(f, "  Variance:   {}", s.variance)?;
        writeln!(f, "  Min:        {}", s.min)?;
        writeln!(f, "  Max:        {}", s.max)?;
        writeln!(f, "  Range:      {}", s.range)?;
        writeln!(f, "  CV:         {}", s.coefficient_of_variation)?;
        writeln!(f)?;

        writeln!(f, "Model:")?;
        match &self.model {
            Some(fit) => {
                writeln!(f, "  Kind:       {}", fit.kind())?;
                writeln!(f, "  Formula:    {}", fit.formula())?;
                writeln!(f, "  R^2:        {}", fit.r_squared)?;
            }
            None => writeln!(f, "  None")?,
        }
        writeln!(f, "  Mean R^2:   {}", self.mean_r_squared)?;
        writeln!(f)?;

        writeln!(f, "Anomalies:")?;
        writeln!(f, "  High:       {}", self.anomalies.high)?;
        writeln!(f, "  Critical:   {}", self.anomalies.critical)?;
        if let Some(records) = &self.anomaly_records {
            for r in records {
                writeln!(
                    f,
                    "  #{:<8} {:>14.6}  z = {:.4}  {}",
                    r.index, r.value, r.z_score, r.severity
                )?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Stability:")?;
        writeln!(f, "  Score:      {}", self.stability.value)?;
        writeln!(f, "  Risk:       {}", self.stability.risk_level)?;

        if !self.predictions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Predictions:")?;
            writeln!(
                f,
                "{:>10} {:>14} {:>14} {:>14}",
                "Position", "Value", "Lower", "Upper"
            )?;
            writeln!(f, "{:-<55}", "")?;
            for pred in &self.predictions {
                write!(
                    f,
                    "{:>10} {:>14.6} {:>14.6} {:>14.6}",
                    pred.position,
                    pred.value,
                    pred.lower(),
                    pred.upper()
                )?;
                if pred.fallback {
                    write!(f, "  (mean)")?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
