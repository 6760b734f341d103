//! premia-core
//!
//! Traits and pure computations shared across the premia workspace.
//!
//! - `connector`: the `PremiaConnector` trait, its capability role traits and
//!   the code-spelling helper used by connectors whose vendors expect
//!   exchange-decorated symbols.
//! - `timeseries`: exact-date alignment, gap filling, rolling statistics.
//! - `premium`: the three premium formulas, free of any selection policy.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Connector traits are `async_trait` based and the orchestrator drives them on
//! Tokio 1.x. Provider calls are awaited one at a time; nothing here spawns.
#![warn(missing_docs)]

/// Connector capability traits and the primary `PremiaConnector` interface.
pub mod connector;
/// Premium formulas over aligned price columns.
pub mod premium;
/// Time-series utilities for alignment, filling, and rolling statistics.
pub mod timeseries;

pub use connector::{
    NavProvider, PremiaConnector, PriceProvider, SessionProvider, Spelled, first_matching_spelling,
};
pub use premia_types::*;
pub use timeseries::align::align;
pub use timeseries::fill::{backward_fill, fill_both_ways, forward_fill};
pub use timeseries::rolling::{max_abs, median, rolling_mean};
