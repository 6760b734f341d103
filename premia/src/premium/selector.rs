use premia_core::premium::{baseline_window, nav_premium, return_spread, rolling_ratio_deviation};
use premia_core::{
    AlignedFrame, BENCHMARK_PRICE, ETF_PRICE, NAV, PremiaConfig, PremiaError, PremiumStrategy,
    StrategyFallback, StrategyOutcome, max_abs,
};

/// Raw output of the winning strategy, one slot per aligned row.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Premium values; `None` marks rows the strategy left undefined.
    pub values: Vec<Option<f64>>,
    /// Which strategy won and what was discarded before it.
    pub outcome: StrategyOutcome,
}

fn has_value(values: &[Option<f64>]) -> bool {
    values.iter().any(Option::is_some)
}

/// Compute the premium with the best method `frame` allows.
///
/// Precedence:
/// 1. NAV-based, when `nav_source` is set and the frame has a NAV column.
/// 2. Return spread, unless its largest absolute value exceeds the limit.
///    Stricter than a magnitude-only guard: the spread is also rejected when
///    a zero price leaves any daily return undefined.
/// 3. Rolling-ratio deviation; recomputed once with the short window when
///    its largest absolute value exceeds the limit.
///
/// A strategy with no defined value at all falls through to the next one.
///
/// # Errors
/// - `MissingRequired` when a price column is absent from `frame`.
/// - `ComputationFailed` when every strategy leaves every row undefined.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "premia::premium::select",
        skip(frame, cfg),
        fields(rows = frame.len(), nav_source = ?nav_source),
    )
)]
pub fn select_premium(
    frame: &AlignedFrame,
    nav_source: Option<&str>,
    cfg: &PremiaConfig,
) -> Result<Selection, PremiaError> {
    let price = frame
        .column(ETF_PRICE)
        .ok_or_else(|| PremiaError::MissingRequired {
            name: ETF_PRICE.to_string(),
        })?;
    let benchmark = frame
        .column(BENCHMARK_PRICE)
        .ok_or_else(|| PremiaError::MissingRequired {
            name: BENCHMARK_PRICE.to_string(),
        })?;
    let mut fallbacks = Vec::new();

    if let Some(source) = nav_source
        && let Some(nav) = frame.column(NAV)
    {
        let values = nav_premium(price, nav);
        if has_value(&values) {
            let mut outcome = StrategyOutcome::new(PremiumStrategy::NavBased);
            outcome.nav_source = Some(source.to_string());
            return Ok(Selection { values, outcome });
        }
        fallbacks.push(StrategyFallback {
            from: PremiumStrategy::NavBased,
            max_abs: None,
            reason: "NAV premium undefined on every row".into(),
        });
    }

    let spread = return_spread(price, benchmark);
    let limit = cfg.limits.return_spread_max_abs;
    let undefined = spread.iter().filter(|v| v.is_none()).count();
    match max_abs(&spread) {
        Some(m) if m <= limit && undefined == 0 => {
            let mut outcome = StrategyOutcome::new(PremiumStrategy::ReturnSpread);
            outcome.fallbacks = fallbacks;
            return Ok(Selection {
                values: spread,
                outcome,
            });
        }
        observed => {
            #[cfg(feature = "tracing")]
            tracing::warn!(max_abs = ?observed, limit, undefined, "return spread implausible");
            let reason = match observed {
                Some(m) if m > limit => format!("max |premium| {m:.2} exceeds {limit}"),
                _ => format!("daily return undefined on {undefined} rows"),
            };
            fallbacks.push(StrategyFallback {
                from: PremiumStrategy::ReturnSpread,
                max_abs: observed,
                reason,
            });
        }
    }

    let w = &cfg.windows;
    let mut window = baseline_window(price.len(), w);
    let mut values = rolling_ratio_deviation(price, benchmark, window, w.reference_observations);
    let limit = cfg.limits.rolling_ratio_max_abs;
    if let Some(m) = max_abs(&values)
        && m > limit
        && window != w.short
    {
        #[cfg(feature = "tracing")]
        tracing::warn!(max_abs = m, limit, window, short = w.short, "rolling ratio recomputed");
        fallbacks.push(StrategyFallback {
            from: PremiumStrategy::RollingRatio,
            max_abs: Some(m),
            reason: format!(
                "max |premium| {m:.2} exceeds {limit} with window {window}; using window {}",
                w.short
            ),
        });
        window = w.short;
        values = rolling_ratio_deviation(price, benchmark, window, w.reference_observations);
    }

    if !has_value(&values) {
        return Err(PremiaError::ComputationFailed {
            reason: format!(
                "no strategy produced a value over {} aligned rows",
                frame.len()
            ),
        });
    }

    let mut outcome = StrategyOutcome::new(PremiumStrategy::RollingRatio);
    outcome.baseline_window = Some(window);
    outcome.fallbacks = fallbacks;
    Ok(Selection { values, outcome })
}
