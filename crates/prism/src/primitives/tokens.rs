//! Incremental tokenizer for raw numeric text.
//!
//! ## Purpose
//!
//! This module splits raw text into tokens. Whitespace, commas and the
//! bracket characters `[` / `]` delimit tokens. A comma-separated field with
//! nothing in it yields one empty token, which downstream code counts as a
//! missing value.
//!
//! ## Design notes
//!
//! * **Incremental**: Text may arrive in arbitrary chunks; a token cut by a
//!   chunk boundary is carried over and completed by the next feed.
//! * **Callback-based**: Tokens are handed to a closure as `&str`, so no
//!   per-token allocation is needed for whole-text input.
//!
//! ## Invariants
//!
//! * Feeding `a` then `b` and finishing emits exactly the tokens of `a + b`.
//! * Text without commas and without non-delimiter characters emits nothing.
//! * Emitted tokens never contain delimiters.

// ============================================================================
// Tokenizer
// ============================================================================

/// Stateful splitter turning text chunks into raw tokens.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// Characters of the token currently being read.
    pending: String,

    /// Tokens emitted since the last comma.
    field_tokens: usize,

    /// Whether at least one comma has been seen.
    seen_comma: bool,
}

impl Tokenizer {
    /// Create an empty tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for characters that separate tokens inside a field.
    #[inline]
    fn is_separator(c: char) -> bool {
        c.is_whitespace() || c == '[' || c == ']'
    }

    /// Feed a chunk of text, emitting every token completed by it.
    pub fn feed<F: FnMut(&str)>(&mut self, chunk: &str, mut emit: F) {
        for c in chunk.chars() {
            if c == ',' {
                self.flush_pending(&mut emit);
                if self.field_tokens == 0 {
                    emit("");
                }
                self.field_tokens = 0;
                self.seen_comma = true;
            } else if Self::is_separator(c) {
                self.flush_pending(&mut emit);
            } else {
                self.pending.push(c);
            }
        }
    }

    /// Flush the trailing token (and trailing empty field) and reset the state.
    pub fn finish<F: FnMut(&str)>(&mut self, mut emit: F) {
        self.flush_pending(&mut emit);
        if self.seen_comma && self.field_tokens == 0 {
            emit("");
        }
        *self = Self::default();
    }

    /// Tokenize a complete text in one call.
    pub fn split<F: FnMut(&str)>(text: &str, mut emit: F) {
        let mut tokenizer = Self::new();
        tokenizer.feed(text, &mut emit);
        tokenizer.finish(&mut emit);
    }

    fn flush_pending<F: FnMut(&str)>(&mut self, emit: &mut F) {
        if !self.pending.is_empty() {
            emit(self.pending.as_str());
            self.pending.clear();
            self.field_tokens += 1;
        }
    }
}
