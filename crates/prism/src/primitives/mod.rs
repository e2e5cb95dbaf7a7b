//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive abstractions, data structures, and
//! utility functions used throughout the crate: tokenizing raw text,
//! sanitizing tokens into clean samples, batch partitioning and the shared
//! error type. It has zero internal dependencies outside this layer.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Incremental text tokenizer.
pub mod tokens;

/// Token sanitizing and parse accounting.
pub mod sanitizer;

/// Batch partitioning.
pub mod partition;

/// Shared error types.
pub mod errors;
