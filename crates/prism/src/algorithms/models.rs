//! Candidate model families and best-fit selection.
//!
//! ## Purpose
//!
//! This module fits the three parametric families (linear, quadratic,
//! exponential) to a sample sequence indexed `0..n-1`, scores each with R²
//! and picks the one that explains the data best.
//!
//! ## Design notes
//!
//! * **Linear**: Ordinary least squares via [`fit_line`].
//! * **Quadratic**: Closed-form second-difference estimate, not a
//!   least-squares parabola: `a = mean(d2) / 2`, `b = d1[0] - a`, `c = y[0]`.
//!   Exact for noiseless parabolas, approximate otherwise. Needs 3 samples.
//! * **Exponential**: OLS on `(x, ln y)`, only when every sample is
//!   strictly positive; otherwise the family is skipped, not scored.
//! * **Scoring**: R² against each model's predictions in the original y space.
//! * **Selection**: Highest R² wins; ties go to the simpler family
//!   (LINEAR > QUADRATIC > EXPONENTIAL), then to the earlier candidate.
//!
//! ## Invariants
//!
//! * Every returned fit has `0 <= r_squared <= 1`.
//! * A sequence with a non-positive sample never produces an exponential fit.
//! * Empty input produces no candidates.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::algorithms::regression::{LineFit, fit_line, index_axis};
use crate::math::goodness::r_squared;

// ============================================================================
// Model Types
// ============================================================================

/// Parametric family of a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModelKind {
    /// `y = a·x + b`
    Linear,
    /// `y = a·x² + b·x + c`
    Quadratic,
    /// `y = a·e^(b·x)`
    Exponential,
}

impl ModelKind {
    /// Tie-break preference; lower is simpler and preferred.
    #[inline]
    pub fn preference(self) -> u8 {
        match self {
            Self::Linear => 0,
            Self::Quadratic => 1,
            Self::Exponential => 2,
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Linear => write!(f, "LINEAR"),
            Self::Quadratic => write!(f, "QUADRATIC"),
            Self::Exponential => write!(f, "EXPONENTIAL"),
        }
    }
}

/// A model with concrete coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Model<T> {
    /// `y = a·x + b`
    Linear {
        /// Slope.
        a: T,
        /// Intercept.
        b: T,
    },
    /// `y = a·x² + b·x + c`
    Quadratic {
        /// Curvature term.
        a: T,
        /// Linear term.
        b: T,
        /// Constant term.
        c: T,
    },
    /// `y = a·e^(b·x)`
    Exponential {
        /// Scale.
        a: T,
        /// Growth rate.
        b: T,
    },
}

impl<T: Float> Model<T> {
    /// The model family.
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Linear { .. } => ModelKind::Linear,
            Self::Quadratic { .. } => ModelKind::Quadratic,
            Self::Exponential { .. } => ModelKind::Exponential,
        }
    }

    /// Coefficients in formula order (`[a, b]` or `[a, b, c]`).
    pub fn coefficients(&self) -> Vec<T> {
        match *self {
            Self::Linear { a, b } | Self::Exponential { a, b } => vec![a, b],
            Self::Quadratic { a, b, c } => vec![a, b, c],
        }
    }

    /// Evaluate the model at `x`.
    #[inline]
    pub fn evaluate(&self, x: T) -> T {
        match *self {
            Self::Linear { a, b } => a * x + b,
            Self::Quadratic { a, b, c } => (a * x + b) * x + c,
            Self::Exponential { a, b } => a * (b * x).exp(),
        }
    }

    /// Evaluate the model at positions `0..n`.
    pub fn predict_indexed(&self, n: usize) -> Vec<T> {
        index_axis::<T>(n)
            .into_iter()
            .map(|x| self.evaluate(x))
            .collect()
    }

    /// Human-readable formula with six decimals, e.g. `y = 3.000000*x +2.000000`.
    pub fn formula(&self) -> String {
        let f = |v: T| v.to_f64().unwrap_or(f64::NAN);
        match *self {
            Self::Linear { a, b } => format!("y = {:.6}*x {:+.6}", f(a), f(b)),
            Self::Quadratic { a, b, c } => {
                format!("y = {:.6}*x^2 {:+.6}*x {:+.6}", f(a), f(b), f(c))
            }
            Self::Exponential { a, b } => format!("y = {:.6} * e^({:.6}*x)", f(a), f(b)),
        }
    }
}

/// A fitted model and its goodness of fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelFit<T> {
    /// The fitted model.
    pub model: Model<T>,

    /// Coefficient of determination in `[0, 1]`.
    pub r_squared: T,
}

impl<T: Float> ModelFit<T> {
    /// The model family.
    pub fn kind(&self) -> ModelKind {
        self.model.kind()
    }

    /// Coefficients in formula order.
    pub fn coefficients(&self) -> Vec<T> {
        self.model.coefficients()
    }

    /// Evaluate the model at `x`.
    pub fn evaluate(&self, x: T) -> T {
        self.model.evaluate(x)
    }

    /// Human-readable formula.
    pub fn formula(&self) -> String {
        self.model.formula()
    }

    /// True if `self` should be preferred over `other` by the selection rule.
    pub fn beats(&self, other: &ModelFit<T>) -> bool {
        self.r_squared > other.r_squared
            || (self.r_squared == other.r_squared
                && self.kind().preference() < other.kind().preference())
    }
}

impl<T: Float> Display for ModelFit<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} {} (R^2 = {:.6})",
            self.kind(),
            self.formula(),
            self.r_squared.to_f64().unwrap_or(f64::NAN)
        )
    }
}

// ============================================================================
// Candidate Fitting
// ============================================================================

/// Fit `y = a·x + b`. Returns `None` for empty input.
pub fn fit_linear<T: Float>(y: &[T]) -> Option<ModelFit<T>> {
    if y.is_empty() {
        return None;
    }
    let line = fit_line(&index_axis::<T>(y.len()), y);
    let model = Model::Linear {
        a: line.slope,
        b: line.intercept,
    };
    Some(score(model, y, &line))
}

/// Fit `y = a·x² + b·x + c` by second differences. Returns `None` for fewer
/// than three samples.
pub fn fit_quadratic<T: Float>(y: &[T]) -> Option<ModelFit<T>> {
    if y.len() < 3 {
        return None;
    }

    let d1: Vec<T> = y.windows(2).map(|w| w[1] - w[0]).collect();
    let d2: Vec<T> = d1.windows(2).map(|w| w[1] - w[0]).collect();

    let two = T::one() + T::one();
    let d2_len = T::from(d2.len()).unwrap_or(T::one());
    let a = d2.iter().fold(T::zero(), |acc, &v| acc + v) / d2_len / two;

    // Back-substitute through the first sample: y(0) = c, y(1) - y(0) = a + b
    let b = d1[0] - a;
    let c = y[0];

    let model = Model::Quadratic { a, b, c };
    let predicted = model.predict_indexed(y.len());
    Some(ModelFit {
        model,
        r_squared: r_squared(y, &predicted),
    })
}

/// Fit `y = a·e^(b·x)` on the log scale. Returns `None` unless every sample
/// is strictly positive.
pub fn fit_exponential<T: Float>(y: &[T]) -> Option<ModelFit<T>> {
    if y.is_empty() || y.iter().any(|&v| v <= T::zero()) {
        return None;
    }

    let log_y: Vec<T> = y.iter().map(|v| v.ln()).collect();
    let line = fit_line(&index_axis::<T>(y.len()), &log_y);
    let model = Model::Exponential {
        a: line.intercept.exp(),
        b: line.slope,
    };
    Some(score(model, y, &line))
}

fn score<T: Float>(model: Model<T>, y: &[T], line: &LineFit<T>) -> ModelFit<T> {
    let r_squared = if line.degenerate {
        T::zero()
    } else {
        r_squared(y, &model.predict_indexed(y.len()))
    };
    ModelFit { model, r_squared }
}

/// Every applicable candidate, in preference order.
pub fn fit_candidates<T: Float>(y: &[T]) -> Vec<ModelFit<T>> {
    [fit_linear(y), fit_quadratic(y), fit_exponential(y)]
        .into_iter()
        .flatten()
        .collect()
}

/// Pick the best fit by R², then family preference, then first occurrence.
pub fn select_best<'a, T, I>(fits: I) -> Option<&'a ModelFit<T>>
where
    T: Float + 'a,
    I: IntoIterator<Item = &'a ModelFit<T>>,
{
    let mut best: Option<&ModelFit<T>> = None;
    for fit in fits {
        if best.map_or(true, |b| fit.beats(b)) {
            best = Some(fit);
        }
    }
    best
}
