use chrono::NaiveDate;
use premia_core::TimeSeries;

use super::{model_index, model_premium, quote, trading_days};

/// NAV per share relative to the index level.
const NAV_PER_INDEX_POINT: f64 = 0.004;

/// Daily closes for a fixture symbol.
///
/// The China listing skips every 41st trading day and the US listing every
/// 37th, so the two calendars never match exactly.
pub fn by_symbol(s: &str) -> Option<TimeSeries> {
    match s {
        "159941" | "513100" => Some(
            trading_days()
                .filter(|(i, _)| i % 41 != 40)
                .map(|(i, d)| (d, etf_close(i)))
                .collect(),
        ),
        "QQQ" => Some(
            trading_days()
                .filter(|(i, _)| i % 37 != 36)
                .map(|(i, d)| (d, quote(model_index(i))))
                .collect(),
        ),
        _ => None,
    }
}

pub(crate) fn nav_value(i: usize) -> f64 {
    quote(model_index(i) * NAV_PER_INDEX_POINT)
}

fn etf_close(i: usize) -> f64 {
    quote(nav_value(i) * (1.0 + model_premium(i) / 100.0))
}

/// Dates of the China listing, used by the NAV fixture.
pub(crate) fn etf_dates() -> impl Iterator<Item = (usize, NaiveDate)> {
    trading_days().filter(|(i, _)| i % 41 != 40)
}
