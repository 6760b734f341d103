//! Strategy selection and post-processing of the premium series.

/// Fill, classify and summarize the winning series.
pub mod postprocess;
/// Choose and run exactly one premium strategy.
pub mod selector;
