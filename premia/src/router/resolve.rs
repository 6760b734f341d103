use std::future::Future;
use std::pin::Pin;

use crate::Premia;
use crate::core::tag_err;
use crate::router::util::collapse_errors;
use premia_core::{
    DataNeed, DateWindow, Instrument, PremiaConnector, PremiaError, Resolution, TimeSeries,
};

type SeriesFuture<'a> = Pin<Box<dyn Future<Output = Result<TimeSeries, PremiaError>> + Send + 'a>>;

impl Premia {
    /// Resolve one data need by walking its candidate list in priority order.
    ///
    /// Behavior:
    /// - Connectors lacking the capability or the instrument's market are
    ///   skipped without counting as an attempt.
    /// - Each attempt runs inside the connector's session (if any) and is
    ///   bounded by the provider timeout.
    /// - Served rows outside `window` are dropped. An empty result is a failure.
    /// - For NAV, a series whose first row lies more than the configured gap
    ///   after `window.start()` is rejected and the next candidate is tried.
    /// - The first qualifying answer wins; later candidates are never called.
    ///
    /// # Errors
    /// Returns the collapsed failure of every attempted candidate, or
    /// `Unsupported` when no connector could serve the need.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia::router::resolve",
            skip(self),
            fields(need = %need, instrument = %inst, window = %window),
        )
    )]
    pub async fn resolve(
        &self,
        need: DataNeed,
        inst: &Instrument,
        window: &DateWindow,
    ) -> Result<(TimeSeries, Resolution), PremiaError> {
        let mut attempted_any = false;
        let mut errors: Vec<PremiaError> = Vec::new();

        for c in self.ordered(need) {
            if !c.serves(need, inst) {
                continue;
            }
            let Some(fut) = Self::fetch_for(c.as_ref(), need, inst, window) else {
                continue;
            };
            attempted_any = true;

            let served = self
                .scoped(c.as_ref(), need, fut)
                .await
                .map_err(|e| tag_err(c.name(), e))
                .and_then(|s| self.qualify(c.name(), need, window, &s));

            match served {
                Ok(series) => {
                    let (Some(first), Some(last)) = (series.first_date(), series.last_date())
                    else {
                        errors.push(PremiaError::empty(c.name(), need.as_str()));
                        continue;
                    };
                    #[cfg(feature = "tracing")]
                    tracing::info!(
                        connector = c.name(),
                        rows = series.len(),
                        %first,
                        %last,
                        skipped = errors.len(),
                        "resolved"
                    );
                    let resolution = Resolution {
                        need,
                        connector: c.name().to_string(),
                        rows: series.len(),
                        first,
                        last,
                        skipped: errors,
                    };
                    return Ok((series, resolution));
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = c.name(), error = %e, "candidate rejected");
                    errors.push(e);
                }
            }
        }

        Err(collapse_errors(
            need,
            attempted_any,
            errors,
            format!("{need} for {inst}"),
        ))
    }

    fn fetch_for<'a>(
        c: &'a dyn PremiaConnector,
        need: DataNeed,
        inst: &'a Instrument,
        window: &'a DateWindow,
    ) -> Option<SeriesFuture<'a>> {
        match need {
            DataNeed::EtfPrice | DataNeed::BenchmarkPrice => c
                .as_price_provider()
                .map(|p| p.price_history(inst, window)),
            DataNeed::Nav => c.as_nav_provider().map(|p| p.nav_history(inst, window)),
        }
    }

    /// Trim a served series to `window` and apply the quality rules.
    fn qualify(
        &self,
        connector: &str,
        need: DataNeed,
        window: &DateWindow,
        served: &TimeSeries,
    ) -> Result<TimeSeries, PremiaError> {
        let series = served.clipped(window);
        let Some(first) = series.first_date() else {
            return Err(PremiaError::empty(connector, need.as_str()));
        };
        if need == DataNeed::Nav {
            let gap_days = (first - window.start()).num_days();
            let max_gap_days = self.cfg.nav_max_coverage_gap_days;
            if gap_days > max_gap_days {
                return Err(PremiaError::InsufficientCoverage {
                    connector: connector.to_string(),
                    gap_days,
                    max_gap_days,
                });
            }
        }
        Ok(series)
    }
}
