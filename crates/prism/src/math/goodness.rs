//! Goodness-of-fit metrics.
//!
//! ## Purpose
//!
//! This module scores how well a fitted curve explains the observed samples
//! using the coefficient of determination (R²), computed the same way for
//! every model family against that model's own predictions.
//!
//! ## Design notes
//!
//! * **Bounded**: R² is clamped into `[0, 1]`; fits worse than the mean score 0.
//! * **Constant data**: With `SS_tot == 0` the score is 1 when the residuals
//!   vanish (up to a relative tolerance) and 0 otherwise.
//! * **Overflow**: Non-finite residual sums (e.g. an exploding exponential)
//!   score 0.
//!
//! ## Invariants
//!
//! * `0 <= r_squared <= 1` for every input.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::descriptive;

/// Relative tolerance for treating residuals on constant data as zero.
const RESIDUAL_TOLERANCE: f64 = 1e-12;

/// Residual sum of squares `Σ(yᵢ - ŷᵢ)²`.
pub fn residual_sum_of_squares<T: Float>(y: &[T], predicted: &[T]) -> T {
    y.iter().zip(predicted.iter()).fold(T::zero(), |acc, (&yi, &pi)| {
        let r = yi - pi;
        acc + r * r
    })
}

/// Total sum of squares `Σ(yᵢ - ȳ)²`.
pub fn total_sum_of_squares<T: Float>(y: &[T], mean: T) -> T {
    y.iter().fold(T::zero(), |acc, &yi| {
        let d = yi - mean;
        acc + d * d
    })
}

/// Coefficient of determination of `predicted` against `y`.
pub fn r_squared<T: Float>(y: &[T], predicted: &[T]) -> T {
    if y.is_empty() || y.len() != predicted.len() {
        return T::zero();
    }

    let ss_res = residual_sum_of_squares(y, predicted);
    if !ss_res.is_finite() {
        return T::zero();
    }

    let ss_tot = total_sum_of_squares(y, descriptive::mean(y));
    if ss_tot == T::zero() {
        let scale = y.iter().fold(T::zero(), |acc, &yi| acc + yi * yi);
        let tol = T::from(RESIDUAL_TOLERANCE).unwrap_or(T::epsilon());
        return if ss_res <= tol * scale {
            T::one()
        } else {
            T::zero()
        };
    }

    (T::one() - ss_res / ss_tot).max(T::zero()).min(T::one())
}
