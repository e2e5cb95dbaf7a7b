//! Layer 6: Adapters
//!
//! This layer provides user-facing APIs that adapt the engine layer for
//! parallel execution:
//!
//! - **Batch**: Unified adapter for parallel/sequential execution
//!
//! Streaming input is analyzed batch by batch as it arrives and uses the
//! `prism` streaming adapter unchanged.

// Unified batch adapter for PRISM analyses.
pub mod batch;
