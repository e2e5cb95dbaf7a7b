//! Descriptive statistics over clean samples.
//!
//! ## Purpose
//!
//! This module computes the central tendency and dispersion measures of a
//! sample sequence ([`StatSummary`]) and pools per-batch summaries into a
//! run-level summary.
//!
//! ## Design notes
//!
//! * **Population moments**: Variance divides by `n`, matching the z-score
//!   thresholds which are defined against population sigma.
//! * **Exact degenerate cases**: A constant sequence yields its value as the
//!   mean and exactly zero variance, so downstream `std_dev == 0` checks hold.
//! * **Bounded mean**: The mean is clamped into `[min, max]` to absorb
//!   floating-point rounding. Sums that overflow are recomputed from scaled
//!   terms, so values near `T::max_value()` still give a finite mean and,
//!   when representable, a finite standard deviation.
//! * **Median selection**: Quickselect on a scratch copy instead of a full sort.
//!
//! ## Invariants
//!
//! * `std_dev >= 0` and `variance >= 0`.
//! * For non-empty input, `min <= median <= max` and `min <= mean <= max`.
//! * Fewer than two samples give zero variance and standard deviation.
//! * Empty input gives an all-zero summary.
//!
//! ## Non-goals
//!
//! * This module does not filter non-finite values (the sanitizer does).
//! * Pooled medians and modes are approximations, not recomputed from raw data.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// Summary Structure
// ============================================================================

/// Central tendency and dispersion of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary<T> {
    /// Number of samples summarized.
    pub count: usize,

    /// Arithmetic mean.
    pub mean: T,

    /// Middle value (average of the two middle values for even counts).
    pub median: T,

    /// Most frequent value; ties go to the value seen first.
    pub mode: T,

    /// Population standard deviation.
    pub std_dev: T,

    /// Population variance.
    pub variance: T,

    /// Smallest sample.
    pub min: T,

    /// Largest sample.
    pub max: T,

    /// `max - min`.
    pub range: T,

    /// `std_dev / mean`, or 0 when the mean is 0.
    pub coefficient_of_variation: T,
}

impl<T: Float> Default for StatSummary<T> {
    fn default() -> Self {
        Self {
            count: 0,
            mean: T::zero(),
            median: T::zero(),
            mode: T::zero(),
            std_dev: T::zero(),
            variance: T::zero(),
            min: T::zero(),
            max: T::zero(),
            range: T::zero(),
            coefficient_of_variation: T::zero(),
        }
    }
}

impl<T: Float> StatSummary<T> {
    // ========================================================================
    // Main Computation
    // ========================================================================

    /// Summarize a sample sequence.
    pub fn compute(samples: &[T]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let (min, max) = min_max(samples);
        let mean = bounded_mean(samples, min, max);
        let (variance, std_dev) = if samples.len() < 2 || min == max {
            (T::zero(), T::zero())
        } else {
            dispersion(samples, mean)
        };

        Self {
            count: samples.len(),
            mean,
            median: median(samples),
            mode: mode(samples),
            std_dev,
            variance,
            min,
            max,
            range: max - min,
            coefficient_of_variation: coefficient_of_variation(std_dev, mean),
        }
    }

    /// Combine per-batch summaries into one run-level summary.
    ///
    /// Count, mean, variance, extrema and range are exact for the union of
    /// the batches. The median is the count-weighted median of the batch
    /// medians and the mode is taken from the largest batch (earliest on
    /// ties). Empty summaries are ignored; a single summary is returned as is.
    pub fn pool(parts: &[StatSummary<T>]) -> Self {
        let parts: Vec<&StatSummary<T>> = parts.iter().filter(|p| p.count > 0).collect();
        match parts.len() {
            0 => return Self::default(),
            1 => return *parts[0],
            _ => {}
        }

        let total: usize = parts.iter().map(|p| p.count).sum();
        let n = T::from(total).unwrap_or(T::one());

        let min = parts.iter().map(|p| p.min).fold(T::infinity(), T::min);
        let max = parts.iter().map(|p| p.max).fold(T::neg_infinity(), T::max);

        let share = |p: &StatSummary<T>| T::from(p.count).unwrap_or(T::zero()) / n;
        let weighted_sum = parts.iter().fold(T::zero(), |acc, p| {
            acc + T::from(p.count).unwrap_or(T::zero()) * p.mean
        });
        let mean = if weighted_sum.is_finite() {
            weighted_sum / n
        } else {
            parts.iter().fold(T::zero(), |acc, p| acc + share(*p) * p.mean)
        }
        .max(min)
        .min(max);

        // Within-batch plus between-batch sums of squares
        let (variance, std_dev) = if min == max {
            (T::zero(), T::zero())
        } else {
            let ss = parts.iter().fold(T::zero(), |acc, p| {
                let w = T::from(p.count).unwrap_or(T::zero());
                let shift = p.mean - mean;
                acc + w * (p.variance + shift * shift)
            });
            let variance = (ss / n).max(T::zero());
            if variance.is_finite() {
                (variance, variance.sqrt())
            } else {
                // Rescale by the largest spread so the standard deviation
                // stays finite whenever it is representable
                let two = T::one() + T::one();
                let shift = |p: &StatSummary<T>| (p.mean / two - mean / two).abs();
                let scale = parts
                    .iter()
                    .fold(T::zero(), |acc, p| acc.max(p.std_dev / two).max(shift(*p)));
                let r = parts.iter().fold(T::zero(), |acc, p| {
                    let a = p.std_dev / two / scale;
                    let b = shift(*p) / scale;
                    acc + share(*p) * (a * a + b * b)
                });
                let std_dev = two * scale * r.sqrt();
                (std_dev * std_dev, std_dev)
            }
        };

        Self {
            count: total,
            mean,
            median: weighted_median(&parts, total),
            mode: largest_part_mode(&parts),
            std_dev,
            variance,
            min,
            max,
            range: max - min,
            coefficient_of_variation: coefficient_of_variation(std_dev, mean),
        }
    }
}

// ============================================================================
// Building Blocks
// ============================================================================

/// Smallest and largest value. Returns zeros for empty input.
pub fn min_max<T: Float>(values: &[T]) -> (T, T) {
    let Some(&first) = values.first() else {
        return (T::zero(), T::zero());
    };
    values
        .iter()
        .skip(1)
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Arithmetic mean, clamped into the data range. Returns 0 for empty input.
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let (min, max) = min_max(values);
    bounded_mean(values, min, max)
}

#[inline]
fn bounded_mean<T: Float>(values: &[T], min: T, max: T) -> T {
    if min == max {
        return min;
    }
    let n = T::from(values.len()).unwrap_or(T::one());
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    let mean = if sum.is_finite() {
        sum / n
    } else {
        // The raw sum overflowed; divide before adding
        values.iter().fold(T::zero(), |acc, &v| acc + v / n)
    };
    mean.max(min).min(max)
}

/// Population variance around a precomputed mean.
pub fn population_variance<T: Float>(values: &[T], mean: T) -> T {
    if values.len() < 2 {
        return T::zero();
    }
    let n = T::from(values.len()).unwrap_or(T::one());
    let ss = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - mean;
        acc + d * d
    });
    ss / n
}

/// Population variance and standard deviation around `mean`.
///
/// When the sum of squares overflows, the deviations are rescaled so the
/// standard deviation stays finite if it is representable; the variance is
/// then its square and may be infinite.
fn dispersion<T: Float>(values: &[T], mean: T) -> (T, T) {
    let variance = population_variance(values, mean);
    if variance.is_finite() {
        return (variance, variance.sqrt());
    }

    let two = T::one() + T::one();
    let n = T::from(values.len()).unwrap_or(T::one());
    let half = |v: T| v / two - mean / two;
    let scale = values.iter().fold(T::zero(), |acc, &v| acc.max(half(v).abs()));
    if scale == T::zero() {
        return (T::zero(), T::zero());
    }
    let r = values.iter().fold(T::zero(), |acc, &v| {
        let d = half(v) / scale;
        acc + d * d
    });
    let std_dev = two * scale * (r / n).sqrt();
    (std_dev * std_dev, std_dev)
}

/// Median of the values. Returns 0 for empty input.
pub fn median<T: Float>(values: &[T]) -> T {
    let n = values.len();
    if n == 0 {
        return T::zero();
    }

    let mut scratch = values.to_vec();
    let mid = n / 2;
    scratch.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = scratch[mid];

    if n % 2 == 1 {
        return upper;
    }

    // Even length: the lower middle is the largest value left of `mid`
    let lower = scratch[..mid]
        .iter()
        .copied()
        .fold(T::neg_infinity(), T::max);
    (lower + upper) / T::from(2.0).unwrap_or(T::one() + T::one())
}

/// Most frequent value; among equally frequent values the first seen wins.
/// Returns 0 for empty input.
pub fn mode<T: Float>(values: &[T]) -> T {
    let Some(&first) = values.first() else {
        return T::zero();
    };

    let mut counts: HashMap<u64, usize> = HashMap::with_capacity(values.len());
    for &v in values {
        *counts.entry(value_key(v)).or_insert(0) += 1;
    }

    let best = counts.values().copied().max().unwrap_or(1);
    values
        .iter()
        .copied()
        .find(|&v| counts.get(&value_key(v)).copied() == Some(best))
        .unwrap_or(first)
}

/// Hash key for exact value equality (`-0.0` and `0.0` share a key).
#[inline]
fn value_key<T: Float>(v: T) -> u64 {
    if v == T::zero() {
        0.0f64.to_bits()
    } else {
        v.to_f64().unwrap_or(0.0).to_bits()
    }
}

#[inline]
fn coefficient_of_variation<T: Float>(std_dev: T, mean: T) -> T {
    if mean == T::zero() {
        T::zero()
    } else {
        std_dev / mean
    }
}

fn weighted_median<T: Float>(parts: &[&StatSummary<T>], total: usize) -> T {
    let mut medians: Vec<(T, usize)> = parts.iter().map(|p| (p.median, p.count)).collect();
    medians.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Equal));

    let mut cumulative = 0;
    for &(m, count) in &medians {
        cumulative += count;
        if cumulative * 2 >= total {
            return m;
        }
    }
    medians.last().map(|&(m, _)| m).unwrap_or(T::zero())
}

fn largest_part_mode<T: Float>(parts: &[&StatSummary<T>]) -> T {
    let mut best: Option<&StatSummary<T>> = None;
    for &p in parts {
        if best.map_or(true, |b| p.count > b.count) {
            best = Some(p);
        }
    }
    best.map(|p| p.mode).unwrap_or(T::zero())
}
