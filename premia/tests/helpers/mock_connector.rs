#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;

use async_trait::async_trait;
use premia::connector::{NavProvider, PremiaConnector, PriceProvider, SessionProvider};
use premia::{DateWindow, Instrument, Market, PremiaError, TimeSeries};
use tokio::time::{Duration, sleep};

use super::CallLog;

type SeriesFn =
    Arc<dyn Fn(&Instrument, &DateWindow) -> Result<TimeSeries, PremiaError> + Send + Sync>;

/// Scripted login behavior for session-based connectors.
#[derive(Clone, Copy, Default)]
pub struct SessionScript {
    pub login_fails: bool,
    pub login_delay: Duration,
}

/// Simple in-memory connector used by integration tests.
///
/// Every call is appended to the shared `log` as `name:kind[:SYMBOL]`, so tests
/// can assert call order across connectors.
pub struct MockConnector {
    pub name: &'static str,
    pub markets: Option<Vec<Market>>,
    pub delay: Duration,
    pub price_fn: Option<SeriesFn>,
    pub nav_fn: Option<SeriesFn>,
    pub session: Option<SessionScript>,
    pub log: CallLog,
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(format!("{}:{entry}", self.name));
    }

    async fn serve(
        &self,
        kind: &str,
        f: Option<&SeriesFn>,
        i: &Instrument,
        w: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        self.record(format!("{kind}:{}", i.symbol()));
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        match f {
            Some(f) => (f)(i, w),
            None => Err(PremiaError::unsupported(kind.to_string())),
        }
    }
}

impl PremiaConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_market(&self, market: Market) -> bool {
        self.markets.as_ref().is_none_or(|m| m.contains(&market))
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        self.price_fn.as_ref().map(|_| self as &dyn PriceProvider)
    }

    fn as_nav_provider(&self) -> Option<&dyn NavProvider> {
        self.nav_fn.as_ref().map(|_| self as &dyn NavProvider)
    }

    fn as_session_provider(&self) -> Option<&dyn SessionProvider> {
        self.session.as_ref().map(|_| self as &dyn SessionProvider)
    }
}

#[async_trait]
impl PriceProvider for MockConnector {
    async fn price_history(
        &self,
        i: &Instrument,
        w: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        self.serve("price", self.price_fn.as_ref(), i, w).await
    }
}

#[async_trait]
impl NavProvider for MockConnector {
    async fn nav_history(&self, i: &Instrument, w: &DateWindow) -> Result<TimeSeries, PremiaError> {
        self.serve("nav", self.nav_fn.as_ref(), i, w).await
    }
}

#[async_trait]
impl SessionProvider for MockConnector {
    async fn login(&self) -> Result<(), PremiaError> {
        self.record("login".into());
        let script = self.session.unwrap_or_default();
        if !script.login_delay.is_zero() {
            sleep(script.login_delay).await;
        }
        if script.login_fails {
            return Err(PremiaError::Other("bad credentials".into()));
        }
        Ok(())
    }

    async fn logout(&self) {
        self.record("logout".into());
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    markets: Option<Vec<Market>>,
    delay: Duration,
    price_fn: Option<SeriesFn>,
    nav_fn: Option<SeriesFn>,
    session: Option<SessionScript>,
    log: CallLog,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            markets: None,
            delay: Duration::ZERO,
            price_fn: None,
            nav_fn: None,
            session: None,
            log: CallLog::default(),
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn markets(mut self, markets: &[Market]) -> Self {
        self.markets = Some(markets.to_vec());
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay = d;
        self
    }

    pub fn log(mut self, log: &CallLog) -> Self {
        self.log = Arc::clone(log);
        self
    }

    pub fn with_price_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instrument, &DateWindow) -> Result<TimeSeries, PremiaError> + Send + Sync + 'static,
    {
        self.price_fn = Some(Arc::new(f));
        self
    }

    /// Serve `series` (clipped to the window) for every instrument.
    pub fn returns_price_ok(self, series: TimeSeries) -> Self {
        self.with_price_fn(move |_, w| Ok(series.clipped(w)))
    }

    pub fn fails_price(self, err: PremiaError) -> Self {
        self.with_price_fn(move |_, _| Err(err.clone()))
    }

    pub fn with_nav_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instrument, &DateWindow) -> Result<TimeSeries, PremiaError> + Send + Sync + 'static,
    {
        self.nav_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_nav_ok(self, series: TimeSeries) -> Self {
        self.with_nav_fn(move |_, w| Ok(series.clipped(w)))
    }

    pub fn fails_nav(self, err: PremiaError) -> Self {
        self.with_nav_fn(move |_, _| Err(err.clone()))
    }

    pub fn with_session(mut self) -> Self {
        self.session = Some(SessionScript::default());
        self
    }

    pub fn login_fails(mut self) -> Self {
        self.session = Some(SessionScript {
            login_fails: true,
            ..self.session.unwrap_or_default()
        });
        self
    }

    pub fn login_delay(mut self, d: Duration) -> Self {
        self.session = Some(SessionScript {
            login_delay: d,
            ..self.session.unwrap_or_default()
        });
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            markets: self.markets,
            delay: self.delay,
            price_fn: self.price_fn,
            nav_fn: self.nav_fn,
            session: self.session,
            log: self.log,
        })
    }
}

/// Price-only connector serving `series` for every instrument.
pub fn m_price(name: &'static str, series: TimeSeries) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_price_ok(series)
        .build()
}

/// NAV-only connector serving `series` for every instrument.
pub fn m_nav(name: &'static str, series: TimeSeries) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_nav_ok(series)
        .build()
}
