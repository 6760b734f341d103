//! Decoders for the Eastmoney payloads.

use chrono::{DateTime, NaiveDate, TimeDelta};
use premia_core::{PremiaError, TimeSeries};
use serde::Deserialize;

#[derive(Deserialize)]
struct KlineEnvelope {
    data: Option<KlineData>,
}

#[derive(Deserialize)]
struct KlineData {
    #[serde(default)]
    klines: Vec<String>,
}

/// Daily closes from a `qt/stock/kline/get` response.
///
/// Each kline is `date,open,close,high,low,...`. A `null` data block means the
/// market id does not list the code.
///
/// # Errors
/// `NotFound` for a null data block, `Data` for malformed JSON or rows.
pub fn kline_closes(body: &str, secid: &str) -> Result<TimeSeries, PremiaError> {
    let env: KlineEnvelope = serde_json::from_str(body)
        .map_err(|e| PremiaError::Data(format!("kline payload for {secid}: {e}")))?;
    let Some(data) = env.data else {
        return Err(PremiaError::not_found(format!("kline for {secid}")));
    };
    let mut rows = Vec::with_capacity(data.klines.len());
    for line in &data.klines {
        let mut cols = line.split(',');
        let (Some(date), Some(_open), Some(close)) = (cols.next(), cols.next(), cols.next()) else {
            return Err(PremiaError::Data(format!("short kline row: {line}")));
        };
        rows.push((parse_date(date)?, close.trim().parse::<f64>().ok()));
    }
    Ok(TimeSeries::from_optional(rows))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsjzEnvelope {
    data: Option<LsjzData>,
    #[serde(default)]
    err_code: i64,
    err_msg: Option<String>,
    #[serde(default)]
    total_count: usize,
}

#[derive(Deserialize)]
struct LsjzData {
    #[serde(rename = "LSJZList", default)]
    rows: Vec<LsjzRow>,
}

#[derive(Deserialize)]
struct LsjzRow {
    #[serde(rename = "FSRQ")]
    date: String,
    #[serde(rename = "DWJZ", default)]
    unit_nav: Option<String>,
}

/// One page of the `f10/lsjz` NAV history.
#[derive(Debug, Clone, PartialEq)]
pub struct NavPage {
    /// Rows on this page; blank NAV cells are kept as `None`.
    pub rows: Vec<(NaiveDate, Option<f64>)>,
    /// Rows across every page, as reported by the server.
    pub total: usize,
}

/// Decode one `f10/lsjz` page.
///
/// # Errors
/// `Connector` when the server reports an error code, `Data` for malformed JSON.
pub fn lsjz_page(body: &str, connector: &str) -> Result<NavPage, PremiaError> {
    let env: LsjzEnvelope = serde_json::from_str(body)
        .map_err(|e| PremiaError::Data(format!("lsjz payload: {e}")))?;
    if env.err_code != 0 {
        return Err(PremiaError::connector(
            connector,
            format!(
                "lsjz error {}: {}",
                env.err_code,
                env.err_msg.unwrap_or_default()
            ),
        ));
    }
    let rows = env
        .data
        .map(|d| d.rows)
        .unwrap_or_default()
        .into_iter()
        .map(|r| {
            let nav = r.unit_nav.as_deref().and_then(|v| v.trim().parse::<f64>().ok());
            Ok((parse_date(&r.date)?, nav))
        })
        .collect::<Result<Vec<_>, PremiaError>>()?;
    Ok(NavPage {
        rows,
        total: env.total_count,
    })
}

#[derive(Deserialize)]
struct TrendPoint {
    x: i64,
    y: Option<f64>,
}

/// Unit NAV from the `Data_netWorthTrend` array of a `pingzhongdata/<code>.js`
/// script. Stamps are Beijing midnight expressed in UTC milliseconds.
///
/// # Errors
/// `Data` when the variable is absent or its array is malformed.
pub fn net_worth_trend(script: &str) -> Result<TimeSeries, PremiaError> {
    let array = script
        .find("Data_netWorthTrend")
        .map(|at| &script[at..])
        .and_then(|tail| {
            let open = tail.find('[')?;
            let close = tail.find("];")?;
            (open < close).then(|| &tail[open..=close])
        })
        .ok_or_else(|| PremiaError::Data("Data_netWorthTrend not found in script".into()))?;
    let points: Vec<TrendPoint> = serde_json::from_str(array)
        .map_err(|e| PremiaError::Data(format!("Data_netWorthTrend: {e}")))?;
    Ok(TimeSeries::from_optional(points.into_iter().filter_map(
        |p| {
            let ts = DateTime::from_timestamp_millis(p.x)? + TimeDelta::hours(8);
            Some((ts.date_naive(), p.y))
        },
    )))
}

fn parse_date(s: &str) -> Result<NaiveDate, PremiaError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| PremiaError::Data(format!("bad date {s:?}: {e}")))
}
