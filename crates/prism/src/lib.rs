//! # PRISM: Numeric Stream Diagnostics for Rust
//!
//! PRISM ingests a bounded stream of numeric samples, cleans it, fits the
//! best-matching curve (linear, quadratic or exponential), flags statistical
//! outliers, condenses everything into a stability score, and extrapolates a
//! few values ahead.
//!
//! ## What does an analysis do?
//!
//! 1. **Tokenize and sanitize**: Raw text is split on whitespace, commas and
//!    brackets. Null markers (`NULL`, `NA`, `NaN`, ...), malformed and
//!    non-finite tokens are counted and dropped.
//! 2. **Batch**: The clean samples are cut into batches (1000 by default);
//!    each batch is analyzed independently.
//! 3. **Per batch**: Descriptive statistics, three candidate model fits scored
//!    by R², z-score anomaly classification and a stability score.
//! 4. **Aggregate**: Pooled statistics, the best model of the run, summed
//!    anomaly counts, a run-level stability score and forward predictions.
//!
//! ## Quick Start
//!
//! ```rust
//! use prism::prelude::*;
//!
//! let model = Prism::<f64>::new()
//!     .batch_size(1000)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let report = model.analyze("2, 5, 8, 11, 14, NaN, 17");
//!
//! assert_eq!(report.parse_report.valid_count, 6);
//! assert_eq!(report.model.map(|m| m.kind()), Some(ModelKind::Linear));
//! println!("{}", report);
//! # Result::<(), PrismError>::Ok(())
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use prism::prelude::*;
//!
//! let model = Prism::<f64>::new()
//!     .batch_size(500)                 // Samples per batch
//!     .anomaly_high_threshold(3.0)     // z > 3 is HIGH
//!     .anomaly_critical_threshold(5.0) // z > 5 is CRITICAL
//!     .prediction_count(3)             // Three forward predictions
//!     .prediction_step(5)              // At N, N+5, N+10
//!     .prediction_error_band(2.5)      // Fixed heuristic band
//!     .magnitude_limit(1e15)           // Drop absurdly large values
//!     .return_anomalies()              // List flagged samples
//!     .adapter(Batch)
//!     .build()?;
//!
//! let samples: Vec<f64> = (0..1200).map(|i| (i as f64 * 0.1).sin()).collect();
//! let report = model.analyze_samples(&samples);
//!
//! assert_eq!(report.batch_count(), 3);
//! assert!(report.stability.value >= 0.0 && report.stability.value <= 100.0);
//! # Result::<(), PrismError>::Ok(())
//! ```
//!
//! ### Streaming
//!
//! ```rust
//! use prism::prelude::*;
//!
//! let mut stream = Prism::<f64>::new()
//!     .batch_size(4)
//!     .adapter(Streaming)
//!     .build()?;
//!
//! stream.process_chunk("1 2 3 4 5 ");
//! stream.process_chunk("0 6 7 8");
//! let report = stream.finalize();
//!
//! assert_eq!(report.parse_report.valid_count, 9);
//! assert_eq!(report.batch_count(), 3);
//! # Result::<(), PrismError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Configuration is validated by `build()`, which returns
//! `Result<_, PrismError>`. Analysis itself never fails: bad tokens are
//! counted in the [`ParseReport`](prelude::ParseReport), and degenerate
//! batches resolve to documented fallbacks (zero variance, R² of 0, no
//! anomalies).
//!
//! ```rust
//! use prism::prelude::*;
//!
//! let err = Prism::<f64>::new().batch_size(0).adapter(Batch).build().unwrap_err();
//! assert_eq!(err, PrismError::InvalidBatchSize(0));
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (per-batch `debug!`, run summary
//! `info!`, fallbacks as `warn!`). Install a subscriber to see them.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - model fitting and selection.
mod algorithms;

// Layer 4: Evaluation - anomalies, stability and predictions.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API.
mod api;

// Accepted input shapes.
mod input;

// Standard PRISM prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Streaming},
        AnomalyRecord, AnomalySummary, BatchReport, DiscardReason, Model, ModelFit, ModelKind,
        ParseReport, Prediction, PrismBuilder as Prism, PrismError, PrismInput, PrismReport,
        RiskLevel, Severity, StabilityScore, StatSummary,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for extension crates and the
// integration tests.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
