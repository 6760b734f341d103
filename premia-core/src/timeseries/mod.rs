//! Time-series utilities shared by connectors and orchestrator.
//!
//! Modules include:
//! - `align`: inner join of named series on exact dates
//! - `fill`: forward/backward propagation over missing values
//! - `rolling`: rolling mean, median and range checks
/// Exact-date inner join into an `AlignedFrame`.
pub mod align;
/// Forward and backward gap filling.
pub mod fill;
/// Rolling statistics.
pub mod rolling;
