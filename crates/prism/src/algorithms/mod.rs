//! Layer 3: Algorithms
//!
//! This layer fits the candidate model families to a batch and selects the
//! winner. It contains the curve-fitting logic of the pipeline but is
//! orchestrated by the engine layer.

// Single-predictor least squares.
pub mod regression;

// Linear, quadratic and exponential candidates and best-fit selection.
pub mod models;
