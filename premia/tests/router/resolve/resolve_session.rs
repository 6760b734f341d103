use std::time::Duration;

use premia::{DataNeed, Premia, PremiaError};

use crate::helpers::{MockConnector, d, entries, etf, flat, year};

#[tokio::test]
async fn session_wraps_successful_query() {
    let log = Default::default();
    let c = MockConnector::builder()
        .name("sess")
        .log(&log)
        .with_session()
        .returns_nav_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let p = Premia::builder().with_connector(c).build().unwrap();
    p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap();
    assert_eq!(
        entries(&log),
        vec!["sess:login", "sess:nav:159941", "sess:logout"]
    );
}

#[tokio::test]
async fn logout_runs_after_failed_query() {
    let log = Default::default();
    let c = MockConnector::builder()
        .name("sess")
        .log(&log)
        .with_session()
        .fails_nav(PremiaError::Other("query rejected".into()))
        .build();
    let p = Premia::builder().with_connector(c).build().unwrap();
    assert!(p.resolve(DataNeed::Nav, &etf(), &year()).await.is_err());
    assert_eq!(
        entries(&log),
        vec!["sess:login", "sess:nav:159941", "sess:logout"]
    );
}

#[tokio::test]
async fn logout_runs_after_failed_login_and_query_is_skipped() {
    let log = Default::default();
    let c = MockConnector::builder()
        .name("sess")
        .log(&log)
        .login_fails()
        .returns_nav_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let backup = MockConnector::builder()
        .name("backup")
        .log(&log)
        .returns_nav_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let p = Premia::builder()
        .with_connector(c)
        .with_connector(backup)
        .build()
        .unwrap();
    let (_, res) = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "backup");
    assert!(matches!(res.skipped[0], PremiaError::Session { .. }));
    assert_eq!(
        entries(&log),
        vec!["sess:login", "sess:logout", "backup:nav:159941"]
    );
}

#[tokio::test]
async fn logout_runs_after_query_timeout() {
    let log = Default::default();
    let c = MockConnector::builder()
        .name("sess")
        .log(&log)
        .with_session()
        .delay(Duration::from_millis(300))
        .returns_nav_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let p = Premia::builder()
        .with_connector(c)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let err = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap_err();
    assert_eq!(err, PremiaError::AllProvidersTimedOut { need: "nav".into() });
    assert_eq!(
        entries(&log),
        vec!["sess:login", "sess:nav:159941", "sess:logout"]
    );
}

#[tokio::test]
async fn logout_runs_after_login_timeout() {
    let log = Default::default();
    let c = MockConnector::builder()
        .name("sess")
        .log(&log)
        .login_delay(Duration::from_millis(300))
        .returns_nav_ok(flat(d(2024, 1, 2), 3, 1.0))
        .build();
    let p = Premia::builder()
        .with_connector(c)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let err = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap_err();
    assert_eq!(err, PremiaError::AllProvidersTimedOut { need: "nav".into() });
    assert_eq!(entries(&log), vec!["sess:login", "sess:logout"]);
}
