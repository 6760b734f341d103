use std::time::Duration;

use chrono::{Days, NaiveDate};
use premia::{
    DataNeed, DateWindow, IndicatorRequest, Instrument, Premia, PremiaError, TimeSeries,
};
use premia_mock::{DynamicMockConnector, MockBehavior};

fn daily(start: NaiveDate, values: &[f64]) -> TimeSeries {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Days::new(i as u64), *v))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or("bad date")?;

    // `flaky` hangs on the ETF and errors on NAV; `steady` serves everything.
    let (flaky, flaky_ctl) = DynamicMockConnector::new_with_controller("flaky");
    let (steady, steady_ctl) = DynamicMockConnector::new_with_controller("steady");

    flaky_ctl.set_price_behavior("159941", MockBehavior::Hang).await;
    flaky_ctl
        .set_price_behavior("QQQ", MockBehavior::Return(daily(start, &[400.0, 404.0, 402.0])))
        .await;
    flaky_ctl
        .set_nav_behavior(
            "159941",
            MockBehavior::Fail(PremiaError::Other("HTTP 503".into())),
        )
        .await;
    steady_ctl
        .set_price_behavior("159941", MockBehavior::Return(daily(start, &[1.05, 1.08, 1.12])))
        .await;
    steady_ctl
        .set_nav_behavior("159941", MockBehavior::Return(daily(start, &[1.0, 1.0, 1.0])))
        .await;
    steady_ctl.require_session(MockBehavior::Return(())).await;

    let premia = Premia::builder()
        .with_connector(flaky.clone())
        .with_connector(steady.clone())
        .prefer_for_need(DataNeed::Nav, &[flaky, steady])
        .provider_timeout(Duration::from_millis(200))
        .build()?;

    let req = IndicatorRequest::new(
        Instrument::china("159941")?,
        Instrument::us("QQQ")?,
        DateWindow::new(start, end)?,
    );
    let report = premia.indicator(&req).await?;

    for r in &report.resolutions {
        println!("{} <- {} ({} rows)", r.need, r.connector, r.rows);
        for e in &r.skipped {
            println!("    skipped: {e}");
        }
    }
    println!("strategy: {}", report.outcome.strategy);
    for p in &report.premium.points {
        println!("{} {:>6.2}% high={} low={}", p.date, p.value, p.is_high, p.is_low);
    }
    println!("steady calls: {:?}", steady_ctl.calls().await);
    Ok(())
}
