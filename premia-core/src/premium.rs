//! Premium formulas.
//!
//! Every function takes aligned, equally long columns and returns one slot
//! per row. `None` marks an undefined value (division by zero, non-finite
//! intermediate); filling those is the post-processor's job.

use premia_types::RatioWindows;

use crate::timeseries::fill::backward_fill;
use crate::timeseries::rolling::{median, rolling_mean};

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

fn ratio_of(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 { None } else { finite(num / den) }
}

/// Premium against published NAV: `(price - nav) / nav * 100`.
#[must_use]
pub fn nav_premium(price: &[f64], nav: &[f64]) -> Vec<Option<f64>> {
    price
        .iter()
        .zip(nav)
        .map(|(p, n)| ratio_of(p - n, *n).map(|r| r * 100.0))
        .collect()
}

/// Percentage change between consecutive rows, with the first row at 0.
#[must_use]
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(Some(0.0));
    }
    out.extend(
        values
            .windows(2)
            .map(|w| ratio_of(w[1], w[0]).map(|r| (r - 1.0) * 100.0)),
    );
    out
}

/// Daily return of the ETF minus daily return of the benchmark, in points.
#[must_use]
pub fn return_spread(price: &[f64], benchmark: &[f64]) -> Vec<Option<f64>> {
    pct_change(price)
        .into_iter()
        .zip(pct_change(benchmark))
        .map(|(p, b)| Some(p? - b?))
        .collect()
}

/// Baseline window for a ratio series of `len` observations.
///
/// The long window when the series is long enough, else half the series
/// when that still reaches the minimum long window, else the short window.
#[must_use]
pub const fn baseline_window(len: usize, windows: &RatioWindows) -> usize {
    if len >= windows.long {
        return windows.long;
    }
    let half = len / 2;
    if half >= windows.min_long {
        half
    } else {
        windows.short
    }
}

/// Deviation of the price/benchmark ratio from its rolling mean, in percent.
///
/// Warm-up slots of the rolling mean take the nearest later mean. Slots still
/// empty after that take the median ratio of the first
/// `reference_observations` rows when the series is longer than that, or the
/// median of the whole series otherwise.
#[must_use]
pub fn rolling_ratio_deviation(
    price: &[f64],
    benchmark: &[f64],
    window: usize,
    reference_observations: usize,
) -> Vec<Option<f64>> {
    let ratio: Vec<Option<f64>> = price
        .iter()
        .zip(benchmark)
        .map(|(p, b)| ratio_of(*p, *b))
        .collect();

    let mut baseline = rolling_mean(&ratio, window);
    backward_fill(&mut baseline);
    if baseline.iter().any(Option::is_none) {
        let reference = if ratio.len() > reference_observations {
            &ratio[..reference_observations]
        } else {
            &ratio[..]
        };
        let fallback = median(reference.iter().flatten().copied())
            .or_else(|| median(ratio.iter().flatten().copied()));
        for slot in baseline.iter_mut().filter(|s| s.is_none()) {
            *slot = fallback;
        }
    }

    ratio
        .iter()
        .zip(&baseline)
        .map(|(r, m)| ratio_of((*r)?, (*m)?).map(|q| (q - 1.0) * 100.0))
        .collect()
}
