// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
pub use mock_connector::{MockConnector, m_nav, m_price};
use premia::{DateWindow, Instrument, TimeSeries};

/// Shared, ordered call log across connectors.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// One row per consecutive calendar day starting at `start`.
pub fn daily(start: NaiveDate, values: &[f64]) -> TimeSeries {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + chrono::Days::new(i as u64), *v))
        .collect()
}

/// `n` rows of `value` from `start`.
pub fn flat(start: NaiveDate, n: usize, value: f64) -> TimeSeries {
    daily(start, &vec![value; n])
}

pub fn window(start: NaiveDate, end: NaiveDate) -> DateWindow {
    DateWindow::new(start, end).unwrap()
}

/// Calendar year 2024.
pub fn year() -> DateWindow {
    window(d(2024, 1, 1), d(2024, 12, 31))
}

pub fn etf() -> Instrument {
    Instrument::china("159941").unwrap()
}

pub fn qqq() -> Instrument {
    Instrument::us("QQQ").unwrap()
}
