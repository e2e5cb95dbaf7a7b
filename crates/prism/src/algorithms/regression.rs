//! Ordinary least squares on a single predictor.
//!
//! ## Purpose
//!
//! This module provides the closed-form OLS line fit that both the linear
//! candidate and the log-transformed exponential candidate are built on.
//!
//! ## Design notes
//!
//! * **Centered sums**: Slope is `Σ(xᵢ-x̄)(yᵢ-ȳ) / Σ(xᵢ-x̄)²`, which is
//!   numerically kinder than the raw normal equations.
//! * **Degenerate fallback**: When `Σ(xᵢ-x̄)² == 0` (fewer than two distinct
//!   x values) the fit is flat through the mean and flagged as degenerate.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::descriptive;

// ============================================================================
// Line Fit
// ============================================================================

/// Result of a least-squares line fit `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit<T> {
    /// Fitted slope.
    pub slope: T,

    /// Fitted intercept.
    pub intercept: T,

    /// True if x had no spread and the fallback `slope = 0, intercept = ȳ` was used.
    pub degenerate: bool,
}

impl<T: Float> LineFit<T> {
    /// Evaluate the line at `x`.
    #[inline]
    pub fn evaluate(&self, x: T) -> T {
        self.slope * x + self.intercept
    }
}

/// The sample positions `0, 1, ..., n-1` as floats.
pub fn index_axis<T: Float>(n: usize) -> Vec<T> {
    (0..n).map(|i| T::from(i).unwrap_or(T::zero())).collect()
}

/// Fit `y = slope·x + intercept` by ordinary least squares.
///
/// `x` and `y` are paired element-wise; extra elements of the longer slice
/// are ignored.
pub fn fit_line<T: Float>(x: &[T], y: &[T]) -> LineFit<T> {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);

    let x_mean = descriptive::mean(x);
    let y_mean = descriptive::mean(y);

    let (num, den) = x
        .iter()
        .zip(y.iter())
        .fold((T::zero(), T::zero()), |(num, den), (&xi, &yi)| {
            let dx = xi - x_mean;
            (num + dx * (yi - y_mean), den + dx * dx)
        });

    if den == T::zero() {
        return LineFit {
            slope: T::zero(),
            intercept: y_mean,
            degenerate: true,
        };
    }

    let slope = num / den;
    LineFit {
        slope,
        intercept: y_mean - slope * x_mean,
        degenerate: false,
    }
}
