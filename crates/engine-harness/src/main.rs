//! Load harness for the matching engine.

use engine_harness::{harness, HarnessConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = HarnessConfig::from_env()?;

    info!(
        symbol = %config.symbol,
        base_price = config.base_price,
        price_range = config.price_range,
        report_every = config.report_every,
        "Starting engine-harness"
    );

    harness::run(config).await?;
    Ok(())
}
