#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use premia_core::PremiaError;
use yf::core::HistoryService;
use yfinance_rs as yf;

use crate::NAME;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch daily history for a Yahoo symbol.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, PremiaError>;
}

/// Production adapter backed by a `yfinance_rs::YfClient`.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a client with a cookie store (needed for the crumb flow) and a
    /// browser user agent.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client or the `YfClient` cannot be built.
    pub fn try_new() -> Result<Self, PremiaError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| PremiaError::connector(NAME, e.to_string()))?;
        Self::try_with_http(http)
    }

    /// Build from a caller-provided `reqwest::Client`.
    ///
    /// The client should enable a cookie store for Yahoo's auth flow.
    ///
    /// # Errors
    /// Returns `Connector` if the `YfClient` cannot be built.
    pub fn try_with_http(http: reqwest::Client) -> Result<Self, PremiaError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PremiaError::connector(NAME, e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

pub(crate) fn map_yf_err(e: &yf::YfError, context: &str) -> PremiaError {
    match e {
        yf::YfError::NotFound { .. } => PremiaError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            PremiaError::connector(NAME, format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => {
            PremiaError::connector(NAME, format!("server error {status}: {context}"))
        }
        yf::YfError::Status { status, .. } => {
            PremiaError::connector(NAME, format!("status {status}: {context}"))
        }
        other => PremiaError::connector(NAME, other.to_string()),
    }
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, PremiaError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                String,
                yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, PremiaError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, PremiaError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, PremiaError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}
