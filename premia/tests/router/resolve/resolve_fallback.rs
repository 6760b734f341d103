use premia::{DataNeed, Premia, PremiaError, TimeSeries};

use crate::helpers::{MockConnector, d, daily, entries, etf, flat, year};

#[tokio::test]
async fn falls_back_when_first_errors() {
    let log = Default::default();
    let broken = MockConnector::builder()
        .name("broken")
        .log(&log)
        .fails_price(PremiaError::Other("HTTP 502".into()))
        .build();
    let ok = MockConnector::builder()
        .name("ok")
        .log(&log)
        .returns_price_ok(daily(d(2024, 1, 2), &[10.0, 11.0]))
        .build();
    let never = MockConnector::builder()
        .name("never")
        .log(&log)
        .returns_price_ok(daily(d(2024, 1, 2), &[99.0]))
        .build();

    let p = Premia::builder()
        .with_connector(broken)
        .with_connector(ok)
        .with_connector(never)
        .build()
        .unwrap();

    let (series, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(res.connector, "ok");
    assert_eq!(res.rows, 2);
    assert_eq!(res.first, d(2024, 1, 2));
    assert_eq!(res.last, d(2024, 1, 3));
    // the failure was tagged with the connector that produced it
    assert_eq!(
        res.skipped,
        vec![PremiaError::connector("broken", "unknown error: HTTP 502")]
    );
    assert_eq!(
        entries(&log),
        vec!["broken:price:159941", "ok:price:159941"]
    );
}

#[tokio::test]
async fn empty_result_is_skipped() {
    let empty = MockConnector::builder()
        .name("empty")
        .returns_price_ok(TimeSeries::default())
        .build();
    let ok = MockConnector::builder()
        .name("ok")
        .returns_price_ok(flat(d(2024, 3, 1), 4, 5.0))
        .build();
    let p = Premia::builder()
        .with_connector(empty)
        .with_connector(ok)
        .build()
        .unwrap();

    let (_, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "ok");
    assert_eq!(res.skipped, vec![PremiaError::empty("empty", "etf-price")]);
}

#[tokio::test]
async fn rows_outside_the_window_do_not_count() {
    let stale = MockConnector::builder()
        .name("stale")
        .with_price_fn(|_, _| Ok(flat(d(2019, 1, 1), 10, 1.0)))
        .build();
    let ok = MockConnector::builder()
        .name("ok")
        .returns_price_ok(flat(d(2024, 6, 1), 3, 2.0))
        .build();
    let p = Premia::builder()
        .with_connector(stale)
        .with_connector(ok)
        .build()
        .unwrap();

    let (series, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "ok");
    assert!(series.iter().all(|(dt, _)| year().contains(dt)));
}

#[tokio::test]
async fn timed_out_candidate_falls_through() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(std::time::Duration::from_millis(300))
        .returns_price_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let fast = MockConnector::builder()
        .name("fast")
        .returns_price_ok(flat(d(2024, 1, 2), 3, 2.0))
        .build();
    let p = Premia::builder()
        .with_connector(slow)
        .with_connector(fast)
        .provider_timeout(std::time::Duration::from_millis(30))
        .build()
        .unwrap();

    let (_, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "fast");
    assert_eq!(
        res.skipped,
        vec![PremiaError::provider_timeout("slow", "etf-price")]
    );
}
