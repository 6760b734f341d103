use premia::{DataNeed, Premia, PremiaError};

use crate::helpers::{MockConnector, d, entries, etf, flat, m_nav, year};

#[tokio::test]
async fn late_nav_is_rejected_for_the_next_source() {
    let log = Default::default();
    // first row 2024-02-15 is 45 days after the window start
    let late = MockConnector::builder()
        .name("late")
        .log(&log)
        .returns_nav_ok(flat(d(2024, 2, 15), 30, 1.0))
        .build();
    let full = MockConnector::builder()
        .name("full")
        .log(&log)
        .returns_nav_ok(flat(d(2024, 1, 2), 30, 1.1))
        .build();
    let p = Premia::builder()
        .with_connector(late)
        .with_connector(full)
        .build()
        .unwrap();

    let (series, res) = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "full");
    assert_eq!(series.first_date(), Some(d(2024, 1, 2)));
    assert_eq!(
        res.skipped,
        vec![PremiaError::InsufficientCoverage {
            connector: "late".into(),
            gap_days: 45,
            max_gap_days: 30,
        }]
    );
    assert_eq!(entries(&log), vec!["late:nav:159941", "full:nav:159941"]);
}

#[tokio::test]
async fn gap_of_exactly_thirty_days_is_accepted() {
    let edge = m_nav("edge", flat(d(2024, 1, 31), 5, 1.0));
    let p = Premia::builder().with_connector(edge).build().unwrap();
    let (_, res) = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap();
    assert_eq!(res.connector, "edge");

    let over = m_nav("over", flat(d(2024, 2, 1), 5, 1.0));
    let p = Premia::builder().with_connector(over).build().unwrap();
    let err = p.resolve(DataNeed::Nav, &etf(), &year()).await.unwrap_err();
    match err {
        PremiaError::AllProvidersFailed(v) => {
            assert!(matches!(
                v[0],
                PremiaError::InsufficientCoverage { gap_days: 31, .. }
            ));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn coverage_gap_is_configurable() {
    let late = m_nav("late", flat(d(2024, 1, 11), 5, 1.0));
    let p = Premia::builder()
        .with_connector(late)
        .nav_max_coverage_gap_days(5)
        .build()
        .unwrap();
    assert!(p.resolve(DataNeed::Nav, &etf(), &year()).await.is_err());
}

#[tokio::test]
async fn price_needs_have_no_coverage_rule() {
    let late = MockConnector::builder()
        .name("late")
        .returns_price_ok(flat(d(2024, 11, 1), 5, 1.0))
        .build();
    let p = Premia::builder().with_connector(late).build().unwrap();
    let (_, res) = p.resolve(DataNeed::EtfPrice, &etf(), &year()).await.unwrap();
    assert_eq!(res.first, d(2024, 11, 1));
}
