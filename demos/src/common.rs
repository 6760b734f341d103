use std::sync::Arc;

use chrono::{Local, NaiveDate};
use premia::connector::PremiaConnector;
use premia::{DataNeed, DateWindow, IndicatorRequest, Instrument, Premia, PremiaError};
use premia_eastmoney::{EmConnector, EmTrendConnector};
use premia_yfinance::YfConnector;

/// Set to run every example against the deterministic fixtures.
pub const USE_MOCK_ENV: &str = "PREMIA_EXAMPLES_USE_MOCK";

/// Whether the examples run offline.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var_os(USE_MOCK_ENV).is_some()
}

/// Orchestrator over the real providers, or the fixture mock in CI.
///
/// Real mode prefers Eastmoney for the ETF price and NAV, Yahoo for the
/// benchmark, and keeps the pingzhongdata script as the last NAV source.
///
/// # Errors
/// Returns an error if an HTTP client cannot be built.
pub fn premia() -> Result<Premia, PremiaError> {
    if use_mock() {
        println!("--- (Using Mock Connector for CI) ---");
        return Premia::builder()
            .with_connector(Arc::new(premia_mock::MockConnector::new()))
            .build();
    }
    let em: Arc<dyn PremiaConnector> = Arc::new(EmConnector::try_new()?);
    let yf: Arc<dyn PremiaConnector> = Arc::new(YfConnector::try_new()?);
    let trend: Arc<dyn PremiaConnector> = Arc::new(EmTrendConnector::try_new()?);
    Premia::builder()
        .with_connector(Arc::clone(&em))
        .with_connector(Arc::clone(&yf))
        .with_connector(Arc::clone(&trend))
        .prefer_for_need(DataNeed::EtfPrice, &[Arc::clone(&em), Arc::clone(&yf)])
        .prefer_for_need(DataNeed::BenchmarkPrice, &[yf])
        .prefer_for_need(DataNeed::Nav, &[em, trend])
        .build()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_date(key: &str, default: NaiveDate) -> Result<NaiveDate, PremiaError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
            .map_err(|e| PremiaError::InvalidArg(format!("{key}={v}: {e}"))),
        _ => Ok(default),
    }
}

/// Run inputs from `PREMIA_ETF`, `PREMIA_BENCHMARK`, `PREMIA_START` and
/// `PREMIA_END`, defaulting to 159941 vs QQQ from 2020-01-01 to today.
///
/// # Errors
/// Returns `InvalidArg` for a bad symbol, date, or a reversed window.
pub fn request_from_env() -> Result<IndicatorRequest, PremiaError> {
    let etf = Instrument::china(&env_or("PREMIA_ETF", "159941"))?;
    let benchmark = Instrument::us(&env_or("PREMIA_BENCHMARK", "QQQ"))?;
    let default_start = NaiveDate::from_ymd_opt(2020, 1, 1)
        .ok_or_else(|| PremiaError::InvalidArg("default start date".into()))?;
    let start = env_date("PREMIA_START", default_start)?;
    let end = env_date("PREMIA_END", Local::now().date_naive())?;
    Ok(IndicatorRequest::new(
        etf,
        benchmark,
        DateWindow::new(start, end)?,
    ))
}
