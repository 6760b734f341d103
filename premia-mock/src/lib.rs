//! Deterministic connectors for CI-safe tests and examples.
//!
//! - [`MockConnector`]: static fixtures for `159941`/`513100` (China) and
//!   `QQQ` (US), plus the special symbols `FAIL`, `TIMEOUT` and `EMPTY`.
//! - [`DynamicMockConnector`]: behavior scripted per symbol at runtime.

use async_trait::async_trait;
use premia_core::connector::{NavProvider, PremiaConnector, PriceProvider};
use premia_core::{DateWindow, Instrument, Market, PremiaError, TimeSeries};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Static name used in priority lists.
    pub const NAME: &'static str = "premia-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn special(symbol: &str, need: &'static str) -> Result<Option<TimeSeries>, PremiaError> {
        match symbol {
            "FAIL" => Err(PremiaError::connector(
                Self::NAME,
                format!("forced failure: {need}"),
            )),
            "TIMEOUT" => {
                // short enough for tests, longer than any test timeout
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(Some(TimeSeries::default()))
            }
            "EMPTY" => Ok(Some(TimeSeries::default())),
            _ => Ok(None),
        }
    }
}

impl PremiaConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_market(&self, _market: Market) -> bool {
        true
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }

    fn as_nav_provider(&self) -> Option<&dyn NavProvider> {
        Some(self as &dyn NavProvider)
    }
}

#[async_trait]
impl PriceProvider for MockConnector {
    async fn price_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let s = instrument.symbol();
        if let Some(out) = Self::special(s, "price").await? {
            return Ok(out);
        }
        fixtures::prices::by_symbol(s)
            .map(|series| series.clipped(window))
            .ok_or_else(|| PremiaError::not_found(format!("prices for {s}")))
    }
}

#[async_trait]
impl NavProvider for MockConnector {
    async fn nav_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let s = instrument.symbol();
        if let Some(out) = Self::special(s, "nav").await? {
            return Ok(out);
        }
        fixtures::nav::by_symbol(s)
            .map(|series| series.clipped(window))
            .ok_or_else(|| PremiaError::not_found(format!("nav for {s}")))
    }
}
