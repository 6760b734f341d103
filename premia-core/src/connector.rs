use std::future::Future;

use async_trait::async_trait;

use premia_types::{
    ConnectorKey, DataNeed, DateWindow, Instrument, Market, PremiaError, TimeSeries,
};

/// Focused role trait for connectors that serve daily closing prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily closes for `instrument` inside `window`.
    ///
    /// Implementations return whatever rows the vendor has; an empty series is
    /// a valid answer and is judged by the router, not here.
    async fn price_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError>;
}

/// Focused role trait for connectors that serve published unit NAV.
#[async_trait]
pub trait NavProvider: Send + Sync {
    /// Fetch the published NAV history for `instrument` inside `window`.
    async fn nav_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError>;
}

/// Role trait for vendors that require a login before querying.
///
/// The router pairs every successful or failed `login` with exactly one
/// `logout`, also when the query in between fails or times out.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Open a session.
    async fn login(&self) -> Result<(), PremiaError>;

    /// Close the session. Must tolerate being called after a failed login.
    async fn logout(&self);
}

/// Main connector trait implemented by every provider adapter.
///
/// Capabilities are advertised through the `as_*_provider` accessors; a
/// connector answering `None` is never asked for that data need.
pub trait PremiaConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "premia-yfinance").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector can serve instruments listed on `market`.
    ///
    /// Default: `false`. Connectors must declare their markets explicitly.
    fn supports_market(&self, market: Market) -> bool {
        let _ = market;
        false
    }

    /// Advertise price capability.
    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        None
    }

    /// Advertise NAV capability.
    fn as_nav_provider(&self) -> Option<&dyn NavProvider> {
        None
    }

    /// Advertise a login/logout lifecycle around queries.
    fn as_session_provider(&self) -> Option<&dyn SessionProvider> {
        None
    }

    /// Whether this connector can serve `need` for `instrument`.
    fn serves(&self, need: DataNeed, instrument: &Instrument) -> bool {
        let capable = match need {
            DataNeed::EtfPrice | DataNeed::BenchmarkPrice => self.as_price_provider().is_some(),
            DataNeed::Nav => self.as_nav_provider().is_some(),
        };
        capable && self.supports_market(instrument.market())
    }
}

/// A non-empty series together with the vendor spelling that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spelled {
    /// Vendor-specific code that answered, e.g. `159941.SZ`.
    pub spelling: String,
    /// Rows served for that spelling.
    pub series: TimeSeries,
}

/// Try vendor code spellings in order and keep the first non-empty answer.
///
/// Empty answers and `NotFound` move on silently. Any other failure is
/// remembered; when no spelling yields rows the first such failure is
/// returned, otherwise a `NotFound` naming every spelling tried.
///
/// # Errors
/// Returns the first non-benign failure, or `NotFound` when every spelling
/// was empty or unknown to the vendor.
pub async fn first_matching_spelling<S, F, Fut>(
    spellings: &[S],
    mut fetch: F,
) -> Result<Spelled, PremiaError>
where
    S: AsRef<str>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<TimeSeries, PremiaError>>,
{
    let mut first_failure: Option<PremiaError> = None;
    for spelling in spellings {
        let spelling = spelling.as_ref().to_string();
        match fetch(spelling.clone()).await {
            Ok(series) if !series.is_empty() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(spelling = %spelling, rows = series.len(), "spelling matched");
                return Ok(Spelled { spelling, series });
            }
            Ok(_) | Err(PremiaError::NotFound { .. }) => {}
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(spelling = %spelling, error = %e, "spelling failed");
                first_failure.get_or_insert(e);
            }
        }
    }
    Err(first_failure.unwrap_or_else(|| {
        let tried: Vec<&str> = spellings.iter().map(AsRef::as_ref).collect();
        PremiaError::not_found(format!("no rows for any of {}", tried.join(", ")))
    }))
}
