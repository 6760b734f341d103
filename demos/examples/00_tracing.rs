use premia_examples::common::{premia, request_from_env};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,premia=trace,premia_eastmoney=debug,premia_yfinance=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let premia = premia()?;
    let req = request_from_env()?;
    let report = premia.indicator(&req).await?;

    tracing::info!(
        strategy = %report.outcome.strategy,
        rows = report.frame.len(),
        warnings = report.warnings.len(),
        "done"
    );
    Ok(())
}
