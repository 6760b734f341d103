//! HTTP transport seam so connector logic can be exercised without the network.

#[cfg(feature = "test-adapters")]
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use premia_core::PremiaError;
use url::Url;

/// Fetches a page body as text.
#[async_trait]
pub trait EmTransport: Send + Sync {
    /// GET `url`, sending `referer` when the endpoint checks it.
    ///
    /// Implementations map HTTP 404 to `NotFound` and any other failure to
    /// `Connector`.
    async fn get_text(&self, url: &Url, referer: Option<&str>) -> Result<String, PremiaError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct RealTransport {
    client: reqwest::Client,
    connector: &'static str,
}

impl RealTransport {
    /// Build a client with a browser user agent and a request timeout.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client cannot be built.
    pub fn try_new(connector: &'static str) -> Result<Self, PremiaError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36")
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PremiaError::connector(connector, e.to_string()))?;
        Ok(Self::with_client(client, connector))
    }

    /// Wrap a caller-provided client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, connector: &'static str) -> Self {
        Self { client, connector }
    }
}

#[async_trait]
impl EmTransport for RealTransport {
    async fn get_text(&self, url: &Url, referer: Option<&str>) -> Result<String, PremiaError> {
        let mut req = self.client.get(url.clone());
        if let Some(r) = referer {
            req = req.header(reqwest::header::REFERER, r);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| PremiaError::connector(self.connector, e.to_string()))?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PremiaError::not_found(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(PremiaError::connector(
                self.connector,
                format!("status {status}: {}", url.path()),
            ));
        }
        resp.text()
            .await
            .map_err(|e| PremiaError::connector(self.connector, e.to_string()))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn EmTransport {
    /// Build an `EmTransport` from a closure over the full URL (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn EmTransport>
    where
        F: Fn(&Url) -> Result<String, PremiaError> + Send + Sync + 'static,
    {
        struct FnTransport<F>(F);
        #[async_trait]
        impl<F> EmTransport for FnTransport<F>
        where
            F: Fn(&Url) -> Result<String, PremiaError> + Send + Sync + 'static,
        {
            async fn get_text(
                &self,
                url: &Url,
                _referer: Option<&str>,
            ) -> Result<String, PremiaError> {
                (self.0)(url)
            }
        }
        Arc::new(FnTransport(f))
    }
}
