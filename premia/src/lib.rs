//! Premia computes a daily premium sentiment indicator for a China-listed ETF
//! that tracks a US index.
//!
//! Overview
//! - Routes three data needs (ETF price, benchmark price, NAV) across
//!   registered connectors implementing the `premia_core` contracts.
//! - Candidates are tried one at a time in priority order; the first
//!   qualifying answer wins and its provenance is recorded.
//! - Picks one premium strategy: NAV-based when NAV is available, otherwise
//!   the return spread or the rolling price/benchmark ratio, guarded by
//!   plausibility ceilings.
//! - Fills gaps in the winning series, flags high/low regimes and emits a
//!   summary.
//!
//! Key behaviors and trade-offs
//! - Sequential fallback: no candidate is called once an earlier one
//!   qualified. Slower than racing providers, but deterministic and frugal.
//! - NAV coverage: a NAV series starting more than 30 days (configurable)
//!   after the required start is rejected in favor of the next source.
//! - Price needs are required; NAV is optional and its absence only
//!   downgrades the result to an estimated proxy, which the report says.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use premia::{DataNeed, DateWindow, IndicatorRequest, Instrument, Premia};
//!
//! let premia = Premia::builder()
//!     .with_connector(Arc::new(premia_eastmoney::EmConnector::try_new()?))
//!     .with_connector(Arc::new(premia_yfinance::YfConnector::try_new()?))
//!     .short_window(30)
//!     .build()?;
//!
//! let req = IndicatorRequest::new(
//!     Instrument::china("159941")?,
//!     Instrument::us("QQQ")?,
//!     DateWindow::new(start, end)?,
//! );
//! let report = premia.indicator(&req).await?;
//! println!("{} via {}", report.summary.latest_value, report.outcome.strategy);
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
/// Strategy selection and post-processing.
pub mod premium;
mod router;

pub use core::{Premia, PremiaBuilder};
pub use premia_core::*;
pub use premium::postprocess::{classify, finalize, summarize};
pub use premium::selector::{Selection, select_premium};
pub use router::indicator::IndicatorRequest;
pub use router::util::collapse_errors;
