//! premia-eastmoney
//!
//! Connectors over Eastmoney's public endpoints:
//! - [`EmConnector`]: exchange daily closes (`qt/stock/kline/get`) and the
//!   paged unit NAV history (`f10/lsjz`);
//! - [`EmTrendConnector`]: unit NAV from the `pingzhongdata` fund script, a
//!   second NAV source with its own failure modes.
//!
//! Both serve China listings only.
#![warn(missing_docs)]

/// Payload decoders.
pub mod parse;
/// HTTP transport seam.
pub mod transport;
mod trend;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use premia_core::{
    ConnectorKey, DateWindow, Instrument, Market, PremiaError, TimeSeries,
    connector::{NavProvider, PremiaConnector, PriceProvider},
    first_matching_spelling,
};
use transport::{EmTransport, RealTransport};
pub use trend::EmTrendConnector;
use url::Url;

const NAME: &str = "premia-eastmoney";
const LSJZ_REFERER: &str = "https://fundf10.eastmoney.com/";
/// Rows per `lsjz` request. The endpoint honors pages this large only when a
/// date range is sent, which every request here does. A five-year window
/// fits in four requests, well inside one provider timeout.
pub const LSJZ_PAGE_SIZE: usize = 500;
/// Hard stop for paging.
const LSJZ_MAX_PAGES: usize = 40;

/// Endpoint URLs, overridable for tests against a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmEndpoints {
    /// Daily k-line endpoint.
    pub kline: Url,
    /// Paged historical NAV endpoint.
    pub lsjz: Url,
    /// Directory holding `<code>.js` fund scripts.
    pub pingzhong: Url,
}

impl EmEndpoints {
    /// Production hosts.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a built-in URL fails to parse.
    pub fn real() -> Result<Self, PremiaError> {
        Self::from_parts(
            "https://push2his.eastmoney.com/api/qt/stock/kline/get",
            "https://api.fund.eastmoney.com/f10/lsjz",
            "https://fund.eastmoney.com/pingzhongdata/",
        )
    }

    /// Every endpoint under one base URL, keeping the production paths.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base` is not a valid URL.
    pub fn with_base(base: &str) -> Result<Self, PremiaError> {
        let base = base.trim_end_matches('/');
        Self::from_parts(
            &format!("{base}/api/qt/stock/kline/get"),
            &format!("{base}/f10/lsjz"),
            &format!("{base}/pingzhongdata/"),
        )
    }

    fn from_parts(kline: &str, lsjz: &str, pingzhong: &str) -> Result<Self, PremiaError> {
        let parse =
            |s: &str| Url::parse(s).map_err(|e| PremiaError::InvalidArg(format!("{s}: {e}")));
        Ok(Self {
            kline: parse(kline)?,
            lsjz: parse(lsjz)?,
            pingzhong: parse(pingzhong)?,
        })
    }
}

/// Eastmoney k-line closes plus `lsjz` unit NAV.
pub struct EmConnector {
    transport: Arc<dyn EmTransport>,
    endpoints: EmEndpoints,
}

impl EmConnector {
    /// Static connector key for per-need priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Real transport against the production hosts.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client cannot be built.
    pub fn try_new() -> Result<Self, PremiaError> {
        Self::with_endpoints(EmEndpoints::real()?)
    }

    /// Real transport against custom endpoints.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client cannot be built.
    pub fn with_endpoints(endpoints: EmEndpoints) -> Result<Self, PremiaError> {
        Ok(Self::from_transport(
            Arc::new(RealTransport::try_new(NAME)?),
            endpoints,
        ))
    }

    /// Inject a transport.
    #[must_use]
    pub fn from_transport(transport: Arc<dyn EmTransport>, endpoints: EmEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Eastmoney `secid` spellings for `instrument`: `1.` is Shanghai, `0.` Shenzhen.
    #[must_use]
    pub fn secids(instrument: &Instrument) -> Vec<String> {
        let code = instrument.symbol();
        let order = if code.starts_with(['5', '6']) {
            ["1", "0"]
        } else {
            ["0", "1"]
        };
        order.iter().map(|m| format!("{m}.{code}")).collect()
    }

    fn kline_url(&self, secid: &str, window: &DateWindow) -> Url {
        let mut url = self.endpoints.kline.clone();
        url.query_pairs_mut()
            .append_pair("secid", secid)
            .append_pair("fields1", "f1,f2,f3,f4,f5,f6")
            .append_pair("fields2", "f51,f52,f53,f54,f55,f56")
            .append_pair("klt", "101")
            .append_pair("fqt", "0")
            .append_pair("beg", &compact(window.start()))
            .append_pair("end", &compact(window.end()));
        url
    }

    fn lsjz_url(&self, code: &str, page: usize, window: &DateWindow) -> Url {
        let mut url = self.endpoints.lsjz.clone();
        url.query_pairs_mut()
            .append_pair("fundCode", code)
            .append_pair("pageIndex", &page.to_string())
            .append_pair("pageSize", &LSJZ_PAGE_SIZE.to_string())
            .append_pair("startDate", &window.start().to_string())
            .append_pair("endDate", &window.end().to_string());
        url
    }

    async fn kline(&self, secid: String, window: &DateWindow) -> Result<TimeSeries, PremiaError> {
        let body = self
            .transport
            .get_text(&self.kline_url(&secid, window), None)
            .await?;
        Ok(parse::kline_closes(&body, &secid)?.clipped(window))
    }
}

fn compact(d: NaiveDate) -> String {
    d.format("%Y%m%d").to_string()
}

#[async_trait]
impl PriceProvider for EmConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia_eastmoney::price_history",
            skip(self, instrument, window),
            fields(instrument = %instrument, window = %window),
        )
    )]
    async fn price_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let secids = Self::secids(instrument);
        let hit = first_matching_spelling(&secids, |s| self.kline(s, window)).await?;
        #[cfg(feature = "tracing")]
        tracing::info!(secid = %hit.spelling, rows = hit.series.len(), "eastmoney closes");
        Ok(hit.series)
    }
}

#[async_trait]
impl NavProvider for EmConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia_eastmoney::nav_history",
            skip(self, instrument, window),
            fields(instrument = %instrument, window = %window),
        )
    )]
    async fn nav_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let code = instrument.symbol();
        let mut rows = Vec::new();
        for page in 1..=LSJZ_MAX_PAGES {
            let url = self.lsjz_url(code, page, window);
            let body = self.transport.get_text(&url, Some(LSJZ_REFERER)).await?;
            let chunk = parse::lsjz_page(&body, NAME)?;
            let done = chunk.rows.is_empty()
                || chunk
                    .rows
                    .last()
                    .is_some_and(|(date, _)| *date <= window.start());
            rows.extend(chunk.rows);
            if done || rows.len() >= chunk.total {
                break;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::info!(rows = rows.len(), "eastmoney lsjz");
        Ok(TimeSeries::from_optional(rows).clipped(window))
    }
}

impl PremiaConnector for EmConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Eastmoney"
    }

    fn supports_market(&self, market: Market) -> bool {
        market == Market::China
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }

    fn as_nav_provider(&self) -> Option<&dyn NavProvider> {
        Some(self as &dyn NavProvider)
    }
}
