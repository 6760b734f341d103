use premia::{DataNeed, IndicatorReport};
use premia_examples::common::{premia, request_from_env};

/// Rows shown in the text table.
const TAIL: usize = 10;

fn print_text(report: &IndicatorReport) {
    println!(
        "{} vs {} over {}",
        report.etf, report.benchmark, report.window
    );
    for need in DataNeed::ALL {
        let label = need.as_str();
        match report.resolution(need) {
            Some(r) => println!(
                "  {label:<16} {:<24} {:>5} rows {}..={}",
                r.connector, r.rows, r.first, r.last
            ),
            None => println!("  {label:<16} unavailable"),
        }
    }
    for w in &report.warnings {
        println!("  warning: {w}");
    }

    let o = &report.outcome;
    println!("\nStrategy: {} [{:?}]", o.strategy, o.reliability);
    if let Some(window) = o.baseline_window {
        println!("  baseline window: {window} observations");
    }
    for fb in &o.fallbacks {
        println!("  skipped {}: {}", fb.from, fb.reason);
    }

    let s = &report.summary;
    println!("\nLatest {}: {:.2}%", s.latest_date, s.latest_value);
    if let Some(delta) = s.delta {
        println!("  change vs previous: {delta:+.2} pp");
    }
    if let Some(nav) = s.latest_nav {
        println!("  latest NAV: {nav:.4}");
    }
    println!(
        "  range {:.2}% .. {:.2}%, mean {:.2}%, {} high days (> {}), {} low days (< {})",
        s.min,
        s.max,
        s.mean,
        s.high_days,
        report.premium.thresholds.high,
        s.low_days,
        report.premium.thresholds.low
    );

    println!("\n{:<12} {:>9}  flag", "date", "premium");
    let skip = report.premium.points.len().saturating_sub(TAIL);
    for p in report.premium.points.iter().skip(skip) {
        let flag = if p.is_high {
            "HIGH"
        } else if p.is_low {
            "LOW"
        } else {
            ""
        };
        println!("{:<12} {:>8.2}%  {flag}", p.date, p.value);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = std::env::args().any(|a| a == "--json")
        || std::env::var("PREMIA_OUTPUT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let premia = premia()?;
    let req = request_from_env()?;
    let report = premia.indicator(&req).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}
