use std::sync::Arc;

use async_trait::async_trait;
use premia_core::{
    ConnectorKey, DateWindow, Instrument, Market, PremiaError, TimeSeries,
    connector::{NavProvider, PremiaConnector},
};

use crate::EmEndpoints;
use crate::parse;
use crate::transport::{EmTransport, RealTransport};

const NAME: &str = "premia-eastmoney-trend";

/// Unit NAV from the `pingzhongdata` fund script.
///
/// The script carries the fund's whole history, so one request serves any
/// window.
pub struct EmTrendConnector {
    transport: Arc<dyn EmTransport>,
    endpoints: EmEndpoints,
}

impl EmTrendConnector {
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
}

#[async_trait]
impl NavProvider for EmTrendConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia_eastmoney::trend_nav",
            skip(self, instrument, window),
            fields(instrument = %instrument, window = %window),
        )
    )]
    async fn nav_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let script = format!("{}.js", instrument.symbol());
        let url = self
            .endpoints
            .pingzhong
            .join(&script)
            .map_err(|e| PremiaError::InvalidArg(format!("{script}: {e}")))?;
        let body = self.transport.get_text(&url, None).await?;
        Ok(parse::net_worth_trend(&body)?.clipped(window))
    }
}

impl PremiaConnector for EmTrendConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Eastmoney"
    }

    fn supports_market(&self, market: Market) -> bool {
        market == Market::China
    }

    fn as_nav_provider(&self) -> Option<&dyn NavProvider> {
        Some(self as &dyn NavProvider)
    }
}
