use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use premia_core::connector::{NavProvider, PremiaConnector, PriceProvider, SessionProvider};
use premia_core::{DateWindow, Instrument, Market, PremiaError, TimeSeries};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PremiaError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self, unset: PremiaError) -> Result<T, PremiaError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                Err(unset)
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    price_rules: HashMap<String, MockBehavior<TimeSeries>>,
    nav_rules: HashMap<String, MockBehavior<TimeSeries>>,
    login: Option<MockBehavior<()>>,
    calls: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    session: Arc<AtomicBool>,
}

impl DynamicMockController {
    /// Set the behavior for price calls for a specific symbol.
    pub async fn set_price_behavior(&self, symbol: &str, behavior: MockBehavior<TimeSeries>) {
        let mut guard = self.state.lock().await;
        guard.price_rules.insert(symbol.to_ascii_uppercase(), behavior);
    }

    /// Set the behavior for NAV calls for a specific symbol.
    pub async fn set_nav_behavior(&self, symbol: &str, behavior: MockBehavior<TimeSeries>) {
        let mut guard = self.state.lock().await;
        guard.nav_rules.insert(symbol.to_ascii_uppercase(), behavior);
    }

    /// Require a login before queries; `behavior` decides how login answers.
    pub async fn require_session(&self, behavior: MockBehavior<()>) {
        let mut guard = self.state.lock().await;
        guard.login = Some(behavior);
        self.session.store(true, Ordering::SeqCst);
    }

    /// Calls received so far, e.g. `["login", "price:QQQ", "logout"]`.
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
        self.session.store(false, Ordering::SeqCst);
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a rule answer `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    session: Arc<AtomicBool>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PremiaConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let session = Arc::new(AtomicBool::new(false));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            session: Arc::clone(&session),
        };
        let me = Arc::new(Self {
            name,
            state,
            session,
        });
        (me as Arc<dyn PremiaConnector>, controller)
    }

    async fn answer(
        &self,
        kind: &str,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        let symbol = instrument.symbol();
        // Snapshot the rule without holding the lock across the behavior
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(format!("{kind}:{symbol}"));
            let rules = if kind == "nav" {
                &guard.nav_rules
            } else {
                &guard.price_rules
            };
            rules.get(symbol).cloned()
        };
        let unset = PremiaError::not_found(format!("{kind} for {symbol}"));
        match behavior {
            Some(b) => b.run(unset).await.map(|s| s.clipped(window)),
            None => Err(unset),
        }
    }
}

impl PremiaConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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

    fn as_session_provider(&self) -> Option<&dyn SessionProvider> {
        if self.session.load(Ordering::SeqCst) {
            Some(self as &dyn SessionProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl PriceProvider for DynamicMockConnector {
    async fn price_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        self.answer("price", instrument, window).await
    }
}

#[async_trait]
impl NavProvider for DynamicMockConnector {
    async fn nav_history(
        &self,
        instrument: &Instrument,
        window: &DateWindow,
    ) -> Result<TimeSeries, PremiaError> {
        self.answer("nav", instrument, window).await
    }
}

#[async_trait]
impl SessionProvider for DynamicMockConnector {
    async fn login(&self) -> Result<(), PremiaError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push("login".into());
            guard.login.clone()
        };
        match behavior {
            Some(b) => b.run(PremiaError::session(self.name, "login hung")).await,
            None => Ok(()),
        }
    }

    async fn logout(&self) {
        self.state.lock().await.calls.push("logout".into());
    }
}
