//! premia-yfinance
//!
//! Price connector over the `yfinance-rs` client. Serves daily closes for
//! China-listed ETFs (`.SZ` / `.SS` suffixes) and US listings.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;

use std::sync::Arc;

use adapter::{RealAdapter, YfHistory};
use async_trait::async_trait;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use paft::market::requests::history::Interval;
use premia_core::{
    ConnectorKey, DateWindow, Instrument, Market, PremiaError, TimeSeries,
    connector::{PremiaConnector, PriceProvider},
    first_matching_spelling,
};
use rust_decimal::prelude::ToPrimitive;
use yfinance_rs as yf;

pub(crate) const NAME: &str = "premia-yfinance";

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = Arc<RealAdapter>;

/// Public connector type. Production users construct it with `YfConnector::try_new()`.
pub struct YfConnector {
    history: HistoryAdapter,
}

impl YfConnector {
    /// Static connector key for per-need priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client cannot be built.
    pub fn try_new() -> Result<Self, PremiaError> {
        Ok(Self::from_real(RealAdapter::try_new()?))
    }

    /// Build from a provided `reqwest::Client` (should enable a cookie store).
    ///
    /// # Errors
    /// Returns `Connector` if the internal `YfClient` cannot be built.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, PremiaError> {
        Ok(Self::from_real(RealAdapter::try_with_http(http)?))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yf::YfClient) -> Self {
        Self::from_real(RealAdapter::new(client))
    }

    fn from_real(adapter: RealAdapter) -> Self {
        Self {
            history: Arc::new(adapter),
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(history: Arc<dyn YfHistory>) -> Self {
        Self { history }
    }

    /// Yahoo symbols to try for `instrument`, most likely first.
    ///
    /// Shanghai codes start with 5 or 6; everything else is tried on Shenzhen
    /// first. The bare code comes last.
    #[must_use]
    pub fn spellings(instrument: &Instrument) -> Vec<String> {
        let code = instrument.symbol();
        match instrument.market() {
            Market::Us => vec![code.to_string()],
            Market::China => {
                let (first, second) = if code.starts_with(['5', '6']) {
                    ("SS", "SZ")
                } else {
                    ("SZ", "SS")
                };
                vec![
                    format!("{code}.{first}"),
                    format!("{code}.{second}"),
                    code.to_string(),
                ]
            }
        }
    }

    fn request(window: &DateWindow) -> yf::core::services::HistoryRequest {
        let start = midnight_utc(window.start());
        let end = window
            .end()
            .checked_add_days(Days::new(1))
            .map_or(i64::MAX, midnight_utc);
        yf::core::services::HistoryRequest {
            range: None,
            period: Some((start, end)),
            interval: Interval::D1,
            include_prepost: false,
            include_actions: false,
            auto_adjust: false,
            keepna: false,
        }
    }

    async fn closes(&self, symbol: String, window: &DateWindow) -> Result<TimeSeries, PremiaError> {
        let raw = self
            .history
            .fetch_full(&symbol, Self::request(window))
            .await?;
        let series = closes_by_local_date(&raw);
        Ok(series.clipped(window))
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}

/// Exchange-local trading date of a candle timestamp.
///
/// Uses the IANA zone from the response when present, then the fixed UTC
/// offset, then UTC.
fn local_date(ts: DateTime<Utc>, meta: Option<&yf::HistoryMeta>) -> NaiveDate {
    if let Some(m) = meta {
        if let Some(tz) = m.timezone {
            return ts.with_timezone(&tz).date_naive();
        }
        if let Some(off) = m
            .utc_offset_seconds
            .and_then(|s| i32::try_from(s).ok())
            .and_then(FixedOffset::east_opt) {
            return ts.with_timezone(&off).date_naive();
        }
    }
    ts.date_naive()
}

/// Daily closes keyed by exchange-local date; unparsable closes are dropped.
fn closes_by_local_date(raw: &yf::HistoryResponse) -> TimeSeries {
    let meta = raw.meta.as_ref();
    TimeSeries::from_optional(
        raw.candles
            .iter()
            .map(|c| (local_date(c.ts, meta), c.close.amount().to_f64())),
    )
}

#[async_trait]
impl PriceProvider for YfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia_yfinance::price_history",
            skip(self, instrument, window),
            fields(instrument = %instrument, window = %window),
        )
    )]
    async fn price_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let spellings = Self::spellings(instrument);
        let hit = first_matching_spelling(&spellings, |s| self.closes(s, window)).await?;
        #[cfg(feature = "tracing")]
        tracing::info!(spelling = %hit.spelling, rows = hit.series.len(), "yahoo closes");
        Ok(hit.series)
    }
}

impl PremiaConnector for YfConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn supports_market(&self, _market: Market) -> bool {
        true
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }
}
