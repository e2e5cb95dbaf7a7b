//! # Fast PRISM: Parallel Numeric Stream Diagnostics
//!
//! `fastPrism` runs the [`prism`] analysis pipeline with batches analyzed
//! concurrently via `rayon`. Batches are independent, so the reports are
//! identical to the sequential engine; only wall-clock time changes.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastPrism::prelude::*;
//!
//! let samples: Vec<f64> = (0..5000).map(|i| 2.0 * i as f64 + 1.0).collect();
//!
//! let model = Prism::<f64>::new()
//!     .batch_size(1000)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let report = model.analyze_samples(&samples);
//!
//! assert_eq!(report.batch_count(), 5);
//! assert_eq!(report.model.map(|m| m.kind()), Some(ModelKind::Linear));
//! # Result::<(), PrismError>::Ok(())
//! ```
//!
//! ### Sequential Execution
//!
//! Parallelism is on by default and can be switched off per analyzer:
//!
//! ```rust
//! use fastPrism::prelude::*;
//!
//! let model = Prism::<f64>::new()
//!     .adapter(Batch)
//!     .parallel(false)
//!     .build()?;
//!
//! assert!(!model.is_parallel());
//! # Result::<(), PrismError>::Ok(())
//! ```
//!
//! ## Features
//!
//! - **`cpu`** (default): multi-threaded batch execution via `rayon`.
//!   Without it, batch analyses run sequentially.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel batch pass.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API.
mod api;

// Standard fastPrism prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Streaming},
        AnomalyRecord, AnomalySummary, BatchReport, DiscardReason, Model, ModelFit, ModelKind,
        ParseReport, Prediction, PrismBuilder as Prism, PrismError, PrismInput, PrismReport,
        RiskLevel, Severity, StabilityScore, StatSummary,
    };
}

// Internal modules for development and testing.
#[doc(hidden)]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
