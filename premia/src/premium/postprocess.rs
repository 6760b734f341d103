use chrono::NaiveDate;
use premia_core::{
    AlignedFrame, IndicatorSummary, NAV, PremiaError, PremiumPoint, PremiumSeries,
    PremiumStrategy, StrategyOutcome, Thresholds, fill_both_ways,
};

/// Regime flags `(is_high, is_low)` for one value. Both bounds are strict.
#[must_use]
pub fn classify(value: f64, thresholds: &Thresholds) -> (bool, bool) {
    (value > thresholds.high, value < thresholds.low)
}

/// Fill gaps in `values` and attach regime flags.
///
/// Gaps take the closest earlier value, leading gaps the closest later one.
///
/// # Errors
/// Returns `ComputationFailed` when lengths differ or no value is defined.
pub fn finalize(
    dates: &[NaiveDate],
    mut values: Vec<Option<f64>>,
    thresholds: Thresholds,
) -> Result<PremiumSeries, PremiaError> {
    if dates.len() != values.len() {
        return Err(PremiaError::ComputationFailed {
            reason: format!("{} premium values for {} dates", values.len(), dates.len()),
        });
    }
    fill_both_ways(&mut values);

    let points = dates
        .iter()
        .zip(values)
        .map(|(date, v)| {
            let value = v.ok_or_else(|| PremiaError::ComputationFailed {
                reason: "premium series has no value to fill from".into(),
            })?;
            let (is_high, is_low) = classify(value, &thresholds);
            Ok(PremiumPoint {
                date: *date,
                value,
                is_high,
                is_low,
            })
        })
        .collect::<Result<Vec<_>, PremiaError>>()?;

    Ok(PremiumSeries { points, thresholds })
}

/// Headline figures for a finalized series.
///
/// # Errors
/// Returns `ComputationFailed` for an empty series.
pub fn summarize(
    premium: &PremiumSeries,
    frame: &AlignedFrame,
    outcome: &StrategyOutcome,
) -> Result<IndicatorSummary, PremiaError> {
    let Some(latest) = premium.latest() else {
        return Err(PremiaError::ComputationFailed {
            reason: "premium series is empty".into(),
        });
    };
    let previous = premium
        .points
        .len()
        .checked_sub(2)
        .map(|i| premium.points[i].value);
    let latest_nav = match outcome.strategy {
        PremiumStrategy::NavBased => frame.column(NAV).and_then(|c| c.last().copied()),
        PremiumStrategy::ReturnSpread | PremiumStrategy::RollingRatio => None,
    };

    let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
    for v in premium.values() {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / premium.points.len() as f64;

    Ok(IndicatorSummary {
        latest_date: latest.date,
        latest_value: latest.value,
        delta: previous.map(|p| latest.value - p),
        latest_nav,
        high_days: premium.points.iter().filter(|p| p.is_high).count(),
        low_days: premium.points.iter().filter(|p| p.is_low).count(),
        min,
        max,
        mean,
    })
}
