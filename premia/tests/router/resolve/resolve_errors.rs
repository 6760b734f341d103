use std::time::Duration;

use premia::{DataNeed, Market, Premia, PremiaError};

use crate::helpers::{MockConnector, d, entries, etf, flat, m_price, year};

#[tokio::test]
async fn no_capable_connector_is_unsupported() {
    let price_only = m_price("p", flat(d(2024, 1, 2), 3, 1.0));
    let p = Premia::builder().with_connector(price_only).build().unwrap();
    let err = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap_err();
    assert_eq!(err, PremiaError::unsupported("nav"));
    assert!(!err.is_actionable());
}

#[tokio::test]
async fn wrong_market_only_is_unsupported() {
    let log = Default::default();
    let us = MockConnector::builder()
        .name("us")
        .log(&log)
        .markets(&[Market::Us])
        .returns_nav_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let p = Premia::builder().with_connector(us).build().unwrap();
    let err = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap_err();
    assert_eq!(err, PremiaError::unsupported("nav"));
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = MockConnector::builder()
        .name("a")
        .fails_price(PremiaError::not_found("159941.SZ"))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .fails_price(PremiaError::not_found("0.159941"))
        .build();
    let p = Premia::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();
    let err = p
        .resolve(DataNeed::EtfPrice, &etf(), &year())
        .await
        .unwrap_err();
    assert_eq!(err, PremiaError::not_found("etf-price for 159941@china"));
}

#[tokio::test]
async fn all_timeouts_collapse_to_all_timed_out() {
    let mk = |name| {
        MockConnector::builder()
            .name(name)
            .delay(Duration::from_millis(200))
            .returns_price_ok(flat(d(2024, 1, 2), 3, 1.0))
            .build()
    };
    let p = Premia::builder()
        .with_connector(mk("s1"))
        .with_connector(mk("s2"))
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let err = p
        .resolve(DataNeed::EtfPrice, &etf(), &year())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PremiaError::AllProvidersTimedOut {
            need: "etf-price".into()
        }
    );
}

#[tokio::test]
async fn mixed_failures_are_aggregated_in_order() {
    let a = MockConnector::builder()
        .name("a")
        .fails_nav(PremiaError::Data("bad row".into()))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .returns_nav_ok(flat(d(2024, 3, 1), 3, 1.0))
        .build();
    let c = MockConnector::builder()
        .name("c")
        .fails_nav(PremiaError::not_found("nav"))
        .build();
    let p = Premia::builder()
        .with_connector(a)
        .with_connector(b)
        .with_connector(c)
        .build()
        .unwrap();
    let err = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap_err();
    let flat_errs = err.flatten();
    assert_eq!(flat_errs.len(), 3);
    assert_eq!(
        flat_errs[0],
        PremiaError::connector("a", "data issue: bad row")
    );
    assert!(matches!(
        flat_errs[1],
        PremiaError::InsufficientCoverage { .. }
    ));
    assert!(matches!(flat_errs[2], PremiaError::NotFound { .. }));
}
