use premia::{DataNeed, Market, Premia, PremiaConnector};

use crate::helpers::{MockConnector, d, entries, etf, flat, qqq, year};

#[tokio::test]
async fn registration_order_without_preferences() {
    let log = Default::default();
    let first = MockConnector::builder()
        .name("first")
        .log(&log)
        .returns_price_ok(flat(d(2024, 1, 2), 5, 1.0))
        .build();
    let second = MockConnector::builder()
        .name("second")
        .log(&log)
        .returns_price_ok(flat(d(2024, 1, 2), 5, 2.0))
        .build();
    let p = Premia::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();

    let (_, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "first");
    assert_eq!(entries(&log), vec!["first:price:159941"]);
}

#[tokio::test]
async fn per_need_preference_reorders_only_that_need() {
    let log = Default::default();
    let a = MockConnector::builder()
        .name("a")
        .log(&log)
        .returns_price_ok(flat(d(2024, 1, 2), 5, 1.0))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .log(&log)
        .returns_price_ok(flat(d(2024, 1, 2), 5, 2.0))
        .build();
    let p = Premia::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .prefer_for_need(DataNeed::BenchmarkPrice, &[b as std::sync::Arc<dyn PremiaConnector>])
        .build()
        .unwrap();

    let (s, res) = p
        .resolve(DataNeed::BenchmarkPrice, &qqq(), &year())
        .await
        .unwrap();
    assert_eq!(res.connector, "b");
    assert_eq!(s.last().unwrap().1, 2.0);

    let (_, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "a");
}

#[tokio::test]
async fn connectors_outside_the_market_are_not_attempted() {
    let log = Default::default();
    let us_only = MockConnector::builder()
        .name("us")
        .log(&log)
        .markets(&[Market::Us])
        .returns_price_ok(flat(d(2024, 1, 2), 5, 1.0))
        .build();
    let cn_only = MockConnector::builder()
        .name("cn")
        .log(&log)
        .markets(&[Market::China])
        .returns_price_ok(flat(d(2024, 1, 2), 5, 2.0))
        .build();
    let p = Premia::builder()
        .with_connector(us_only)
        .with_connector(cn_only)
        .build()
        .unwrap();

    let (_, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "cn");
    assert!(res.skipped.is_empty());
    assert_eq!(entries(&log), vec!["cn:price:159941"]);
}
