//! Layer 5: Engine
//!
//! This layer provides the parallel batch pass for PRISM analyses. It
//! distributes independent batches across CPU cores.

// Parallel execution engine using CPU threads
pub mod executor;
