use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Premia;
use crate::premium::postprocess::{finalize, summarize};
use crate::premium::selector::select_premium;
use premia_core::{
    BENCHMARK_PRICE, DataNeed, DateWindow, ETF_PRICE, IndicatorReport, Instrument, NAV,
    PremiaError, Resolution, TimeSeries, align,
};

/// Inputs of one indicator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    /// China-listed ETF whose premium is computed.
    pub etf: Instrument,
    /// US-listed ETF tracking the same index.
    pub benchmark: Instrument,
    /// Requested date range.
    pub window: DateWindow,
}

impl IndicatorRequest {
    /// Bundle the run inputs.
    #[must_use]
    pub const fn new(etf: Instrument, benchmark: Instrument, window: DateWindow) -> Self {
        Self {
            etf,
            benchmark,
            window,
        }
    }
}

impl Premia {
    /// Compute the premium indicator end to end.
    ///
    /// Steps run strictly in order: ETF price, benchmark price, NAV, alignment,
    /// strategy selection, post-processing. Any fatal condition returns before
    /// a report exists, so nothing half-computed can be rendered.
    ///
    /// NAV is requested from the later of the window start and the first ETF
    /// price date. Failing to resolve or align NAV is recorded in
    /// `IndicatorReport::warnings` and the run continues on the proxies.
    ///
    /// # Errors
    /// - `RequiredDataUnavailable` when either price need exhausts its candidates.
    /// - `MissingRequired` / `AlignmentEmpty` when the prices share no date.
    /// - `ComputationFailed` when no strategy yields a value.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "premia::router::indicator",
            skip(self, req),
            fields(etf = %req.etf, benchmark = %req.benchmark, window = %req.window),
        )
    )]
    pub async fn indicator(&self, req: &IndicatorRequest) -> Result<IndicatorReport, PremiaError> {
        let (etf, etf_res) = self
            .resolve_required(DataNeed::EtfPrice, &req.etf, &req.window)
            .await?;
        let (benchmark, bench_res) = self
            .resolve_required(DataNeed::BenchmarkPrice, &req.benchmark, &req.window)
            .await?;
        let mut resolutions = vec![etf_res, bench_res];
        let mut warnings = Vec::new();

        let nav_window = etf
            .first_date()
            .map_or(req.window, |first| req.window.starting_no_earlier_than(first));
        let nav = match self.resolve(DataNeed::Nav, &req.etf, &nav_window).await {
            Ok((series, res)) => {
                let source = res.connector.clone();
                resolutions.push(res);
                Some((series, source))
            }
            Err(cause) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %cause, "NAV unavailable; using proxy strategies");
                warnings.push(optional_nav(cause));
                None
            }
        };

        let mut inputs: BTreeMap<String, TimeSeries> = BTreeMap::new();
        inputs.insert(ETF_PRICE.to_string(), etf);
        inputs.insert(BENCHMARK_PRICE.to_string(), benchmark);
        let prices = align(&inputs, &[ETF_PRICE, BENCHMARK_PRICE])?;

        let (frame, nav_source) = match nav {
            Some((series, source)) => {
                inputs.insert(NAV.to_string(), series);
                match align(&inputs, &[ETF_PRICE, BENCHMARK_PRICE, NAV]) {
                    Ok(frame) => (frame, Some(source)),
                    Err(cause) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %cause, "NAV shares no date with prices");
                        warnings.push(optional_nav(cause));
                        (prices, None)
                    }
                }
            }
            None => (prices, None),
        };

        let selection = select_premium(&frame, nav_source.as_deref(), &self.cfg)?;
        let premium = finalize(frame.dates(), selection.values, self.cfg.thresholds)?;
        let summary = summarize(&premium, &frame, &selection.outcome)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            strategy = %selection.outcome.strategy,
            rows = frame.len(),
            latest = summary.latest_value,
            "indicator computed"
        );

        Ok(IndicatorReport {
            etf: req.etf.clone(),
            benchmark: req.benchmark.clone(),
            window: req.window,
            frame,
            premium,
            outcome: selection.outcome,
            resolutions,
            summary,
            warnings,
        })
    }

    async fn resolve_required(
        &self,
        need: DataNeed,
        inst: &Instrument,
        window: &DateWindow,
    ) -> Result<(TimeSeries, Resolution), PremiaError> {
        self.resolve(need, inst, window)
            .await
            .map_err(|cause| PremiaError::RequiredDataUnavailable {
                need: need.to_string(),
                cause: Box::new(cause),
            })
    }
}

fn optional_nav(cause: PremiaError) -> PremiaError {
    PremiaError::OptionalDataUnavailable {
        need: DataNeed::Nav.to_string(),
        cause: Box::new(cause),
    }
}
