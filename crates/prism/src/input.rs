//! Accepted input shapes.
//!
//! A single string is tokenized on whitespace, commas and brackets. A
//! sequence of strings is taken as already tokenized: every element is one
//! token and is never split further. Numeric slices go through
//! `analyze_samples` instead.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::sanitizer::{SanitizedSeries, Sanitizer};

/// Raw input that can be turned into a sanitized series.
pub trait PrismInput {
    /// Sanitize this input with `sanitizer`.
    fn sanitize<T: Float>(&self, sanitizer: &Sanitizer<T>) -> SanitizedSeries<T>;
}

impl PrismInput for str {
    fn sanitize<T: Float>(&self, sanitizer: &Sanitizer<T>) -> SanitizedSeries<T> {
        sanitizer.sanitize_text(self)
    }
}

impl PrismInput for String {
    fn sanitize<T: Float>(&self, sanitizer: &Sanitizer<T>) -> SanitizedSeries<T> {
        sanitizer.sanitize_text(self)
    }
}

impl<S: AsRef<str>> PrismInput for [S] {
    fn sanitize<T: Float>(&self, sanitizer: &Sanitizer<T>) -> SanitizedSeries<T> {
        sanitizer.sanitize_tokens(self)
    }
}

impl<S: AsRef<str>, const N: usize> PrismInput for [S; N] {
    fn sanitize<T: Float>(&self, sanitizer: &Sanitizer<T>) -> SanitizedSeries<T> {
        sanitizer.sanitize_tokens(self)
    }
}

impl<S: AsRef<str>> PrismInput for Vec<S> {
    fn sanitize<T: Float>(&self, sanitizer: &Sanitizer<T>) -> SanitizedSeries<T> {
        sanitizer.sanitize_tokens(self)
    }
}
