//! Execution engine for PRISM analyses.
//!
//! ## Purpose
//!
//! This module runs the per-batch pipeline (statistics, model fitting,
//! anomaly detection, stability) and aggregates the batch results into a
//! run-level report with forward predictions.
//!
//! ## Design notes
//!
//! * **Independent batches**: Each batch is analyzed from scratch; no state
//!   flows between batches, so the batch pass may run them in any order.
//! * **Pluggable pass**: The batch pass is a plain function pointer so that
//!   extension crates can inject a parallel implementation.
//! * **Deterministic**: Identical input and configuration give bit-identical
//!   reports, whichever pass is used.
//!
//! ## Key concepts
//!
//! * **Global winner**: The best batch model over the run (highest R²,
//!   simpler family on ties, then earliest batch).
//! * **Prediction origin**: Predictions evaluate the global winner on its own
//!   batch's x axis.
//!
//! ## Invariants
//!
//! * Batch reports come back in batch order.
//! * With zero clean samples there are no batches, no model and no predictions.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by `validator`).
//! * This module does not tokenize or sanitize input (handled by adapters).
//! * This module does not handle parallel execution directly.

// External dependencies
use num_traits::Float;
use tracing::{debug, info, warn};

// Internal dependencies
use crate::algorithms::models::{ModelFit, fit_candidates, select_best};
use crate::engine::output::{BatchReport, PrismReport};
use crate::evaluation::anomaly::{AnomalyDetector, AnomalySummary};
use crate::evaluation::prediction::PredictionPlan;
use crate::evaluation::stability::StabilityScore;
use crate::math::descriptive::StatSummary;
use crate::primitives::partition::{BatchSlice, partition};
use crate::primitives::sanitizer::{ParseReport, SanitizedSeries, Sanitizer};

/// Default number of samples per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for a custom batch pass (maps partitioned batches to reports).
#[doc(hidden)]
pub type BatchPassFn<T> = fn(&[BatchSlice<'_, T>], &PrismConfig<T>) -> Vec<BatchReport<T>>;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for PRISM execution.
#[derive(Debug, Clone)]
pub struct PrismConfig<T> {
    /// Samples per batch (at least 1).
    pub batch_size: usize,

    /// Z-score classifier.
    pub detector: AnomalyDetector<T>,

    /// Forward prediction settings.
    pub prediction: PredictionPlan<T>,

    /// Optional bound on accepted sample magnitude.
    pub magnitude_limit: Option<T>,

    /// Whether to list HIGH and CRITICAL records in the reports.
    pub return_anomalies: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom batch pass function (enables parallel execution).
    ///
    /// This is the only record of how batches are executed; `None` means the
    /// sequential pass.
    #[doc(hidden)]
    pub custom_batch_pass: Option<BatchPassFn<T>>,
}

impl<T: Float> Default for PrismConfig<T> {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            detector: AnomalyDetector::default(),
            prediction: PredictionPlan::default(),
            magnitude_limit: None,
            return_anomalies: false,
            custom_batch_pass: None,
        }
    }
}

impl<T: Float> PrismConfig<T> {
    /// Sanitizer matching this configuration.
    pub fn sanitizer(&self) -> Sanitizer<T> {
        Sanitizer::with_magnitude_limit(self.magnitude_limit)
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for PRISM analyses.
pub struct PrismExecutor;

impl PrismExecutor {
    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Partition a sanitized series, analyze every batch and aggregate.
    pub fn run_with_config<T: Float>(
        series: &SanitizedSeries<T>,
        config: &PrismConfig<T>,
    ) -> PrismReport<T> {
        let batches = partition(series, config.batch_size);
        let pass: BatchPassFn<T> = config.custom_batch_pass.unwrap_or(batch_pass_sequential);
        let reports = pass(&batches, config);
        Self::aggregate(series.report, reports, config)
    }

    /// Analyze a single batch.
    pub fn analyze_batch<T: Float>(batch: &BatchSlice<'_, T>, config: &PrismConfig<T>) -> BatchReport<T> {
        let statistics = StatSummary::compute(batch.samples);

        let candidates = fit_candidates(batch.samples);
        let model = select_best(&candidates).copied();
        if model.is_none() && !batch.is_empty() {
            warn!(batch = batch.index, size = batch.len(), "No model could be fitted");
        }

        let detection = config.detector.detect(batch.samples, &statistics);
        let stability: StabilityScore<T> = StabilityScore::compute(&batch.report, &detection.summary);
        let anomaly_records = config
            .return_anomalies
            .then(|| detection.flagged(batch.offset));

        debug!(
            batch = batch.index,
            size = batch.len(),
            model = %model.map(|m| m.kind().to_string()).unwrap_or_else(|| "NONE".into()),
            r_squared = model.map(|m| m.r_squared.to_f64().unwrap_or(0.0)).unwrap_or(0.0),
            anomalies = detection.summary.anomalies(),
            "Batch analyzed"
        );

        BatchReport {
            index: batch.index,
            offset: batch.offset,
            parse_report: batch.report,
            statistics,
            model,
            candidates,
            anomalies: detection.summary,
            anomaly_records,
            stability,
        }
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// Combine batch reports into a run-level report.
    ///
    /// `parse_report` is the accounting of the whole input; it also covers
    /// discards when no batch exists.
    pub fn aggregate<T: Float>(
        parse_report: ParseReport,
        batches: Vec<BatchReport<T>>,
        config: &PrismConfig<T>,
    ) -> PrismReport<T> {
        let parts: Vec<StatSummary<T>> = batches.iter().map(|b| b.statistics).collect();
        let statistics = StatSummary::pool(&parts);

        let mut anomalies = AnomalySummary::default();
        for b in &batches {
            anomalies.merge(&b.anomalies);
        }
        let stability: StabilityScore<T> = StabilityScore::compute(&parse_report, &anomalies);

        let anomaly_records = config.return_anomalies.then(|| {
            batches
                .iter()
                .filter_map(|b| b.anomaly_records.as_ref())
                .flatten()
                .copied()
                .collect()
        });

        let winner = global_winner(&batches);
        let mean_r_squared = mean_winner_r_squared(&batches);

        let total = statistics.count;
        let predictions = match winner {
            Some((idx, fit)) => {
                let preds = config
                    .prediction
                    .predict(&fit, batches[idx].offset, total, statistics.mean);
                let fallbacks = preds.iter().filter(|p| p.fallback).count();
                if fallbacks > 0 {
                    warn!(count = fallbacks, "Non-finite predictions replaced by the mean");
                }
                preds
            }
            None => Vec::new(),
        };

        info!(
            samples = total,
            batches = batches.len(),
            discarded = parse_report.discarded_count,
            anomalies = anomalies.anomalies(),
            stability = stability.value.to_f64().unwrap_or(0.0),
            risk = %stability.risk_level,
            "Analysis complete"
        );

        PrismReport {
            parse_report,
            statistics,
            model: winner.map(|(_, fit)| fit),
            model_batch: winner.map(|(idx, _)| idx),
            mean_r_squared,
            anomalies,
            anomaly_records,
            stability,
            predictions,
            batches,
            batch_size: config.batch_size,
        }
    }
}

/// Best batch winner over the run and the position of its batch.
fn global_winner<T: Float>(batches: &[BatchReport<T>]) -> Option<(usize, ModelFit<T>)> {
    let mut best: Option<(usize, ModelFit<T>)> = None;
    for (idx, b) in batches.iter().enumerate() {
        if let Some(fit) = b.model {
            if best.map_or(true, |(_, current)| fit.beats(&current)) {
                best = Some((idx, fit));
            }
        }
    }
    best
}

fn mean_winner_r_squared<T: Float>(batches: &[BatchReport<T>]) -> T {
    let scores: Vec<T> = batches
        .iter()
        .filter_map(|b| b.model.map(|m| m.r_squared))
        .collect();
    if scores.is_empty() {
        return T::zero();
    }
    let n = T::from(scores.len()).unwrap_or(T::one());
    scores.iter().fold(T::zero(), |acc, &r| acc + r) / n
}

// ============================================================================
// Batch Passes
// ============================================================================

/// Analyze batches one after another.
pub fn batch_pass_sequential<T: Float>(
    batches: &[BatchSlice<'_, T>],
    config: &PrismConfig<T>,
) -> Vec<BatchReport<T>> {
    batches
        .iter()
        .map(|batch| PrismExecutor::analyze_batch(batch, config))
        .collect()
}
