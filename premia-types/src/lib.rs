//! Shared data transfer objects, errors, and configuration for premia.
#![warn(missing_docs)]

mod config;
mod error;
mod frame;
mod instrument;
mod outcome;
mod reports;
mod routing;
mod series;

pub use config::{
    PlausibilityLimits, PremiaConfig, RatioWindows, SHORT_WINDOW_BOUNDS, Thresholds,
};
pub use error::PremiaError;
pub use frame::{AlignedFrame, BENCHMARK_PRICE, ETF_PRICE, NAV};
pub use instrument::{DateWindow, Instrument, Market};
pub use outcome::{PremiumStrategy, Reliability, StrategyFallback, StrategyOutcome};
pub use reports::{IndicatorReport, IndicatorSummary, PremiumPoint, PremiumSeries, Resolution};
pub use routing::{ConnectorKey, DataNeed};
pub use series::TimeSeries;
