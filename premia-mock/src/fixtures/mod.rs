pub mod nav;
pub mod prices;

use chrono::{Datelike, NaiveDate, Weekday};

/// First fixture date.
pub const FIXTURE_START: (i32, u32, u32) = (2023, 1, 2);
/// Number of calendar days covered by the fixtures.
pub const FIXTURE_DAYS: u64 = 730;

/// Weekdays of the fixture span with their running index.
pub fn trading_days() -> impl Iterator<Item = (usize, NaiveDate)> {
    let (y, m, d) = FIXTURE_START;
    NaiveDate::from_ymd_opt(y, m, d)
        .into_iter()
        .flat_map(|start| start.iter_days().take(FIXTURE_DAYS as usize))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .enumerate()
}

/// Model premium in percent on trading day `i`; swings between about -1 and 9.
pub fn model_premium(i: usize) -> f64 {
    let t = i as f64;
    4.0 + 5.0 * (t / 23.0).sin()
}

/// Model index level (in benchmark units) on trading day `i`.
pub fn model_index(i: usize) -> f64 {
    let t = i as f64;
    300.0 + 0.25 * t + 8.0 * (t / 9.0).sin()
}

/// Round to three decimals, like exchange quotes and published NAV.
pub fn quote(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
