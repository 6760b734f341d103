use std::sync::Arc;

use premia::{Market, Premia, PremiaError};

use super::indicator_end_to_end::{china_prices, request, us_prices};
use crate::helpers::{CallLog, MockConnector, d, daily, entries, flat};

fn logged_nav(log: &CallLog) -> Arc<MockConnector> {
    MockConnector::builder()
        .name("nav")
        .markets(&[Market::China])
        .log(log)
        .returns_nav_ok(flat(d(2024, 1, 2), 5, 1.0))
        .build()
}

#[tokio::test]
async fn missing_etf_price_stops_before_nav() {
    let log = CallLog::default();
    let etf_down = MockConnector::builder()
        .name("cn")
        .markets(&[Market::China])
        .log(&log)
        .fails_price(PremiaError::Other("HTTP 503".into()))
        .build();
    let p = Premia::builder()
        .with_connector(etf_down)
        .with_connector(us_prices("us", flat(d(2024, 1, 2), 5, 400.0)))
        .with_connector(logged_nav(&log))
        .build()
        .unwrap();

    let err = p.indicator(&request()).await.unwrap_err();
    match &err {
        PremiaError::RequiredDataUnavailable { need, cause } => {
            assert_eq!(need, "etf-price");
            assert!(matches!(**cause, PremiaError::AllProvidersFailed(_)));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(err.is_fatal());
    assert_eq!(entries(&log), vec!["cn:price:159941".to_string()]);
}

#[tokio::test]
async fn missing_benchmark_price_is_fatal() {
    let log = CallLog::default();
    let p = Premia::builder()
        .with_connector(china_prices("cn", flat(d(2024, 1, 2), 5, 1.0)))
        .with_connector(logged_nav(&log))
        .build()
        .unwrap();

    let err = p.indicator(&request()).await.unwrap_err();
    assert_eq!(
        err,
        PremiaError::RequiredDataUnavailable {
            need: "benchmark-price".into(),
            cause: Box::new(PremiaError::unsupported("benchmark-price")),
        }
    );
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn prices_without_common_dates_fail_alignment() {
    let p = Premia::builder()
        .with_connector(china_prices("cn", flat(d(2024, 1, 2), 3, 1.0)))
        .with_connector(us_prices("us", flat(d(2024, 2, 2), 3, 400.0)))
        .build()
        .unwrap();

    let err = p.indicator(&request()).await.unwrap_err();
    assert!(matches!(err, PremiaError::AlignmentEmpty { .. }), "{err:?}");
    assert!(err.is_fatal());
}

#[tokio::test]
async fn zero_benchmark_without_nav_leaves_no_strategy() {
    let start = d(2024, 1, 2);
    let p = Premia::builder()
        .with_connector(china_prices("cn", daily(start, &[1.0, 1.1, 1.2])))
        .with_connector(us_prices("us", daily(start, &[0.0, 0.0, 0.0])))
        .build()
        .unwrap();

    let err = p.indicator(&request()).await.unwrap_err();
    assert!(
        matches!(err, PremiaError::ComputationFailed { .. }),
        "{err:?}"
    );
}
