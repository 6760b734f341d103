use std::time::Duration;

use premia::{ConnectorKey, DataNeed, PlausibilityLimits, Premia, PremiaError, RatioWindows};

use crate::helpers::{d, flat, m_price};

#[test]
fn build_without_connectors_fails() {
    let err = Premia::builder().build().err().expect("must fail");
    assert!(matches!(err, PremiaError::InvalidArg(_)));
}

#[test]
fn build_validates_configuration() {
    let c = m_price("p", flat(d(2024, 1, 1), 3, 1.0));
    for builder in [
        Premia::builder().with_connector(c.clone()).short_window(5),
        Premia::builder().with_connector(c.clone()).short_window(121),
        Premia::builder().with_connector(c.clone()).thresholds(1.0, 8.0),
        Premia::builder()
            .with_connector(c.clone())
            .provider_timeout(Duration::ZERO),
        Premia::builder()
            .with_connector(c.clone())
            .plausibility_limits(PlausibilityLimits {
                return_spread_max_abs: 0.0,
                rolling_ratio_max_abs: 500.0,
            }),
        Premia::builder().with_connector(c.clone()).ratio_windows(RatioWindows {
            long: 40,
            ..RatioWindows::default()
        }),
    ] {
        assert!(matches!(builder.build(), Err(PremiaError::InvalidArg(_))));
    }
}

#[test]
fn builder_settings_reach_config() {
    let c = m_price("p", flat(d(2024, 1, 1), 3, 1.0));
    let p = Premia::builder()
        .with_connector(c)
        .short_window(45)
        .thresholds(10.0, -2.0)
        .nav_max_coverage_gap_days(7)
        .provider_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let cfg = p.config();
    assert_eq!(cfg.windows.short, 45);
    assert_eq!(cfg.windows.long, 250);
    assert!((cfg.thresholds.high - 10.0).abs() < f64::EPSILON);
    assert_eq!(cfg.nav_max_coverage_gap_days, 7);
    assert_eq!(cfg.provider_timeout, Duration::from_secs(2));
}

#[test]
fn unknown_and_duplicate_priority_keys_are_dropped() {
    let a = m_price("a", flat(d(2024, 1, 1), 3, 1.0));
    let b = m_price("b", flat(d(2024, 1, 1), 3, 1.0));
    let p = Premia::builder()
        .with_connector(a)
        .with_connector(b)
        .prefer_keys_for_need(
            DataNeed::Nav,
            &[
                ConnectorKey::new("ghost"),
                ConnectorKey::new("b"),
                ConnectorKey::new("a"),
                ConnectorKey::new("b"),
            ],
        )
        .build()
        .unwrap();
    let keys: Vec<&str> = p.config().per_need_priority[&DataNeed::Nav]
        .iter()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["b", "a"]);
}
