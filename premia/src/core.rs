use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use premia_core::{
    ConnectorKey, DataNeed, PlausibilityLimits, PremiaConfig, PremiaConnector, PremiaError,
    RatioWindows, Thresholds,
};

/// Orchestrator that routes data needs across registered providers and
/// turns the resolved series into a premium indicator.
pub struct Premia {
    pub(crate) connectors: Vec<Arc<dyn PremiaConnector>>,
    pub(crate) cfg: PremiaConfig,
}

/// Builder for constructing a `Premia` orchestrator with custom configuration.
pub struct PremiaBuilder {
    connectors: Vec<Arc<dyn PremiaConnector>>,
    cfg: PremiaConfig,
}

impl Default for PremiaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PremiaBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Starts with no connectors; register at least one via [`Self::with_connector`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: PremiaConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the candidate order for every need without an
    /// explicit preference.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn PremiaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the preferred connector order for one data need.
    ///
    /// Listed connectors go first in the given order; capable but unlisted
    /// connectors follow in registration order.
    #[must_use]
    pub fn prefer_for_need(
        mut self,
        need: DataNeed,
        connectors_desc: &[Arc<dyn PremiaConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc.iter().map(|c| c.key()).collect();
        self.cfg.per_need_priority.insert(need, keys);
        self
    }

    /// Same as [`Self::prefer_for_need`] but with connector keys.
    #[must_use]
    pub fn prefer_keys_for_need(mut self, need: DataNeed, keys: &[ConnectorKey]) -> Self {
        self.cfg.per_need_priority.insert(need, keys.to_vec());
        self
    }

    /// Per-provider call timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Maximum days between the required start and the first NAV row.
    #[must_use]
    pub const fn nav_max_coverage_gap_days(mut self, days: i64) -> Self {
        self.cfg.nav_max_coverage_gap_days = days;
        self
    }

    /// Short rolling window for the ratio proxy (validated to 10..=120 on build).
    #[must_use]
    pub const fn short_window(mut self, observations: usize) -> Self {
        self.cfg.windows.short = observations;
        self
    }

    /// Replace all rolling-ratio window sizes.
    #[must_use]
    pub const fn ratio_windows(mut self, windows: RatioWindows) -> Self {
        self.cfg.windows = windows;
        self
    }

    /// High/low regime thresholds in percent.
    #[must_use]
    pub const fn thresholds(mut self, high: f64, low: f64) -> Self {
        self.cfg.thresholds = Thresholds { high, low };
        self
    }

    /// Plausibility ceilings of the proxy strategies.
    #[must_use]
    pub const fn plausibility_limits(mut self, limits: PlausibilityLimits) -> Self {
        self.cfg.limits = limits;
        self
    }

    /// Build the `Premia` orchestrator.
    ///
    /// Priority lists are filtered against the registered connectors: unknown
    /// keys are dropped and duplicates keep their first position.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector is registered or a configuration
    /// value is out of range.
    pub fn build(mut self) -> Result<Premia, PremiaError> {
        if self.connectors.is_empty() {
            return Err(PremiaError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        self.cfg.validate()?;

        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        for keys in self.cfg.per_need_priority.values_mut() {
            let mut seen = HashSet::new();
            keys.retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));
        }

        Ok(Premia {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute a provider failure to `connector` unless it already names one.
pub(crate) fn tag_err(connector: &str, e: PremiaError) -> PremiaError {
    match e {
        e @ (PremiaError::NotFound { .. }
        | PremiaError::ProviderTimeout { .. }
        | PremiaError::Connector { .. }
        | PremiaError::Empty { .. }
        | PremiaError::InsufficientCoverage { .. }
        | PremiaError::Session { .. }
        | PremiaError::AllProvidersTimedOut { .. }
        | PremiaError::AllProvidersFailed(_)) => e,
        other => PremiaError::connector(connector, other.to_string()),
    }
}

impl Premia {
    /// Start building a new `Premia` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use premia::{DataNeed, Premia};
    ///
    /// let em = Arc::new(EmConnector::try_new()?);
    /// let yf = Arc::new(YfConnector::try_new()?);
    ///
    /// let premia = Premia::builder()
    ///     .with_connector(yf.clone())
    ///     .with_connector(em.clone())
    ///     .prefer_for_need(DataNeed::EtfPrice, &[em, yf])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PremiaBuilder {
        PremiaBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PremiaConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                need = %need,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        need: DataNeed,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, PremiaError>
    where
        Fut: core::future::Future<Output = Result<T, PremiaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(PremiaError::provider_timeout(connector_name, need.as_str())))
    }

    /// Run `query` inside the connector's session, if it has one.
    ///
    /// `logout` runs exactly once after `login` was attempted, whether login,
    /// the query, or either timeout failed. Logout itself is bounded by the
    /// provider timeout and its outcome is ignored.
    pub(crate) async fn scoped<T, Fut>(
        &self,
        connector: &dyn PremiaConnector,
        need: DataNeed,
        query: Fut,
    ) -> Result<T, PremiaError>
    where
        Fut: core::future::Future<Output = Result<T, PremiaError>>,
    {
        let name = connector.name();
        let timeout = self.cfg.provider_timeout;
        let Some(session) = connector.as_session_provider() else {
            return Self::provider_call_with_timeout(name, need, timeout, query).await;
        };

        let out = match Self::provider_call_with_timeout(name, need, timeout, session.login()).await
        {
            Ok(()) => Self::provider_call_with_timeout(name, need, timeout, query).await,
            Err(e @ PremiaError::ProviderTimeout { .. }) => Err(e),
            Err(e) => Err(PremiaError::session(name, e.to_string())),
        };

        if tokio::time::timeout(timeout, session.logout()).await.is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!(connector = name, "logout timed out");
        }
        out
    }

    /// Registered connectors in candidate order for `need`.
    pub(crate) fn ordered(&self, need: DataNeed) -> Vec<Arc<dyn PremiaConnector>> {
        let mut out: Vec<(usize, Arc<dyn PremiaConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if let Some(pref) = self.cfg.per_need_priority.get(&need) {
            out.sort_by_key(|(orig_i, c)| {
                let rank = pref.iter().position(|k| k.as_str() == c.name());
                (rank.unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }
}
