//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns fitted batches into diagnostic figures:
//! - Z-score anomaly classification
//! - The composite stability score and risk level
//! - Forward predictions from the winning model
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Z-score anomaly detection.
pub mod anomaly;

/// Stability score and risk level.
pub mod stability;

/// Forward predictions.
pub mod prediction;
