//! Forward extrapolation from a fitted model.
//!
//! ## Purpose
//!
//! This module evaluates a winning model past the end of the clean sequence
//! and attaches a fixed heuristic error band to each point.
//!
//! ## Design notes
//!
//! * **Global positions**: Predictions are requested at positions of the full
//!   clean sequence (`N, N+step, ...`) and translated to the model's own x axis
//!   by subtracting the offset of the batch the model was fitted on.
//!   Positions past `usize::MAX` are not produced.
//! * **Fallback**: A non-finite evaluation (exponential overflow) is replaced
//!   by a fallback value, normally the pooled mean, and marked as such.
//!
//! ## Non-goals
//!
//! * The error band is a constant, not a statistical interval.

// External dependencies
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::algorithms::models::ModelFit;

/// Default number of forward predictions.
pub const DEFAULT_PREDICTION_COUNT: usize = 3;

/// Default spacing between predicted positions.
pub const DEFAULT_PREDICTION_STEP: usize = 5;

/// Default half-width of the error band.
pub const DEFAULT_ERROR_BAND: f64 = 2.5;

// ============================================================================
// Prediction
// ============================================================================

/// One extrapolated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction<T> {
    /// Position in the clean sequence.
    pub position: usize,

    /// Predicted value.
    pub value: T,

    /// Half-width of the heuristic band around `value`.
    pub error_band: T,

    /// True if the model evaluation was not finite and the fallback was used.
    pub fallback: bool,
}

impl<T: Float> Prediction<T> {
    /// `value - error_band`.
    pub fn lower(&self) -> T {
        self.value - self.error_band
    }

    /// `value + error_band`.
    pub fn upper(&self) -> T {
        self.value + self.error_band
    }
}

// ============================================================================
// Prediction Plan
// ============================================================================

/// Where and how to extrapolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionPlan<T> {
    /// Number of predictions.
    pub count: usize,

    /// Spacing between predicted positions.
    pub step: usize,

    /// Half-width of the error band.
    pub error_band: T,
}

impl<T: Float> Default for PredictionPlan<T> {
    fn default() -> Self {
        Self {
            count: DEFAULT_PREDICTION_COUNT,
            step: DEFAULT_PREDICTION_STEP,
            error_band: T::from(DEFAULT_ERROR_BAND).unwrap_or(T::zero()),
        }
    }
}

impl<T: Float> PredictionPlan<T> {
    /// Positions `start, start + step, ...`.
    ///
    /// Stops early at the first position that does not fit in `usize`.
    pub fn positions(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map_while(move |k| {
            k.checked_mul(self.step)
                .and_then(|offset| start.checked_add(offset))
        })
    }

    /// Extrapolate `fit` from position `start`.
    ///
    /// `origin` is the clean-sequence position of the fit's x = 0.
    pub fn predict(&self, fit: &ModelFit<T>, origin: usize, start: usize, fallback: T) -> Vec<Prediction<T>> {
        self.positions(start)
            .map(|position| {
                let x = T::from(position - origin.min(position)).unwrap_or(T::zero());
                let raw = fit.evaluate(x);
                let finite = raw.is_finite();
                Prediction {
                    position,
                    value: if finite { raw } else { fallback },
                    error_band: self.error_band,
                    fallback: !finite,
                }
            })
            .collect()
    }
}
