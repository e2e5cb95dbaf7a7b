//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the analysis:
//! - Configuration validation
//! - Per-batch execution and run-level aggregation
//! - Report types and their text rendering
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch execution and aggregation.
pub mod executor;

/// Report types.
pub mod output;

/// Configuration validation.
pub mod validator;
