//! Token sanitizing and parse accounting.
//!
//! ## Purpose
//!
//! This module turns raw tokens into the ordered sequence of clean samples
//! that every later stage reads, and keeps a [`ParseReport`] of what was
//! accepted and what was thrown away.
//!
//! ## Design notes
//!
//! * **Never fails**: Bad tokens are counted and dropped; empty input gives an
//!   empty series with zero counts.
//! * **Null markers first**: Missing-value markers are rejected before any
//!   numeric conversion is attempted.
//! * **Slots**: Each discarded token records how many samples were accepted
//!   before it, so discards can later be attributed to batches.
//!
//! ## Key concepts
//!
//! * **Missing**: Empty tokens and markers such as `NULL`, `NA`, `NaN`, `N/A`.
//! * **Malformed**: Tokens that do not parse as a real number.
//! * **Non-finite**: Tokens parsing to NaN or an infinity (`inf`, `1e999`).
//! * **Out of range**: Finite values beyond the optional magnitude limit.
//!
//! ## Invariants
//!
//! * `valid_count + discarded_count == input_count`.
//! * `valid_count` equals the number of clean samples.
//! * The discard breakdown sums to `discarded_count`.
//! * Every clean sample is finite.

// External dependencies
use num_traits::Float;
use serde::Serialize;

// Internal dependencies
use crate::primitives::tokens::Tokenizer;

/// Case-insensitive tokens treated as missing values.
pub const NULL_MARKERS: [&str; 6] = ["NULL", "NA", "NAN", "NONE", "N/A", "-"];

// ============================================================================
// Parse Report
// ============================================================================

/// Why a token was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiscardReason {
    /// Empty token or null marker.
    Missing,
    /// Not a real number.
    Malformed,
    /// NaN or infinite.
    NonFinite,
    /// Finite, but larger in magnitude than the configured limit.
    OutOfRange,
}

/// A dropped token and its position relative to the accepted samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discard {
    /// Number of samples accepted before this token.
    pub slot: usize,

    /// Why the token was dropped.
    pub reason: DiscardReason,
}

/// Counts of accepted and discarded tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ParseReport {
    /// Number of tokens examined.
    pub input_count: usize,

    /// Number of tokens accepted as clean samples.
    pub valid_count: usize,

    /// Number of tokens dropped.
    pub discarded_count: usize,

    /// Dropped as empty or null markers.
    pub missing_count: usize,

    /// Dropped because they failed numeric conversion.
    pub malformed_count: usize,

    /// Dropped because they converted to NaN or an infinity.
    pub non_finite_count: usize,

    /// Dropped by the magnitude limit.
    pub out_of_range_count: usize,
}

impl ParseReport {
    /// Count one accepted token.
    pub fn record_valid(&mut self) {
        self.input_count += 1;
        self.valid_count += 1;
    }

    /// Count one dropped token.
    pub fn record_discard(&mut self, reason: DiscardReason) {
        self.input_count += 1;
        self.discarded_count += 1;
        match reason {
            DiscardReason::Missing => self.missing_count += 1,
            DiscardReason::Malformed => self.malformed_count += 1,
            DiscardReason::NonFinite => self.non_finite_count += 1,
            DiscardReason::OutOfRange => self.out_of_range_count += 1,
        }
    }

    /// Add another report's counts to this one.
    pub fn merge(&mut self, other: &ParseReport) {
        self.input_count += other.input_count;
        self.valid_count += other.valid_count;
        self.discarded_count += other.discarded_count;
        self.missing_count += other.missing_count;
        self.malformed_count += other.malformed_count;
        self.non_finite_count += other.non_finite_count;
        self.out_of_range_count += other.out_of_range_count;
    }

    /// Check the counting invariants.
    pub fn is_consistent(&self) -> bool {
        self.valid_count + self.discarded_count == self.input_count
            && self.missing_count
                + self.malformed_count
                + self.non_finite_count
                + self.out_of_range_count
                == self.discarded_count
    }
}

// ============================================================================
// Sanitized Series
// ============================================================================

/// Clean samples together with their parse accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedSeries<T> {
    /// Accepted samples in order of appearance.
    pub samples: Vec<T>,

    /// Token counts.
    pub report: ParseReport,

    /// Every discarded token, in order of appearance.
    pub discards: Vec<Discard>,
}

impl<T: Float> Default for SanitizedSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SanitizedSeries<T> {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            report: ParseReport::default(),
            discards: Vec::new(),
        }
    }

    /// Record the outcome of sanitizing one token.
    pub fn push(&mut self, outcome: Result<T, DiscardReason>) {
        match outcome {
            Ok(value) => {
                self.samples.push(value);
                self.report.record_valid();
            }
            Err(reason) => {
                self.discards.push(Discard {
                    slot: self.samples.len(),
                    reason,
                });
                self.report.record_discard(reason);
            }
        }
    }

    /// Number of clean samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample was accepted.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ============================================================================
// Sanitizer
// ============================================================================

/// Converts raw tokens into clean samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sanitizer<T> {
    /// Optional bound on `|value|`; larger values are discarded.
    magnitude_limit: Option<T>,
}

impl<T: Float> Default for Sanitizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Sanitizer<T> {
    /// Create a sanitizer without a magnitude limit.
    pub fn new() -> Self {
        Self {
            magnitude_limit: None,
        }
    }

    /// Create a sanitizer with an optional magnitude limit.
    pub fn with_magnitude_limit(magnitude_limit: Option<T>) -> Self {
        Self { magnitude_limit }
    }

    /// The configured magnitude limit.
    pub fn magnitude_limit(&self) -> Option<T> {
        self.magnitude_limit
    }

    /// Returns true if the token is empty or a null marker.
    pub fn is_missing(token: &str) -> bool {
        token.is_empty()
            || NULL_MARKERS
                .iter()
                .any(|marker| marker.eq_ignore_ascii_case(token))
    }

    /// Classify a single raw token.
    pub fn classify(&self, token: &str) -> Result<T, DiscardReason> {
        let token = token.trim();
        if Self::is_missing(token) {
            return Err(DiscardReason::Missing);
        }

        let parsed: f64 = token.parse().map_err(|_| DiscardReason::Malformed)?;
        if !parsed.is_finite() {
            return Err(DiscardReason::NonFinite);
        }

        // Narrowing casts (f64 -> f32) may overflow
        let value = T::from(parsed).ok_or(DiscardReason::NonFinite)?;
        self.classify_value(value)
    }

    /// Classify an already numeric value.
    pub fn classify_value(&self, value: T) -> Result<T, DiscardReason> {
        if !value.is_finite() {
            return Err(DiscardReason::NonFinite);
        }
        match self.magnitude_limit {
            Some(limit) if value.abs() > limit => Err(DiscardReason::OutOfRange),
            _ => Ok(value),
        }
    }

    /// Tokenize and sanitize a complete text.
    pub fn sanitize_text(&self, text: &str) -> SanitizedSeries<T> {
        let mut series = SanitizedSeries::new();
        Tokenizer::split(text, |token| series.push(self.classify(token)));
        series
    }

    /// Sanitize a pre-tokenized sequence; each element is one token.
    pub fn sanitize_tokens<I, S>(&self, tokens: I) -> SanitizedSeries<T>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut series = SanitizedSeries::new();
        for token in tokens {
            series.push(self.classify(token.as_ref()));
        }
        series
    }

    /// Sanitize numeric values, dropping non-finite and out-of-range entries.
    pub fn sanitize_values(&self, values: &[T]) -> SanitizedSeries<T> {
        let mut series = SanitizedSeries::new();
        for &value in values {
            series.push(self.classify_value(value));
        }
        series
    }
}
