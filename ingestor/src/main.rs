use anyhow::Result;
use shared::{Config, Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod pipeline;

use pipeline::{MetricKind, Pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env();
    let config = Config::from_file(&settings.credentials_path)?;
    let metric = MetricKind::from_str(&settings.metric)
        .ok_or_else(|| anyhow::anyhow!("Unsupported metric kind: {}", settings.metric))?;

    info!(?metric, symbol = %settings.symbol, "starting ingestion");

    let pipeline = Pipeline::new(&config)?;
    let symbol = settings.symbol.as_str();
    let prefix = settings.index_prefix.as_str();
    let concurrency = settings.concurrency;

    match metric {
        MetricKind::Daily => {
            pipeline.ingest_daily(symbol, prefix, concurrency).await?;
        }
        MetricKind::Sma => {
            for window in [settings.short_window, settings.long_window] {
                let index_name = format!("{prefix}{window}");
                pipeline.ingest_sma(symbol, window, &index_name, concurrency).await?;
            }
        }
        MetricKind::Ema => {
            for window in [settings.short_window, settings.long_window] {
                let index_name = format!("{prefix}{window}");
                pipeline.ingest_ema(symbol, window, &index_name, concurrency).await?;
            }
        }
        MetricKind::Vwap => {
            pipeline.ingest_vwap(symbol, prefix, concurrency).await?;
        }
        MetricKind::Composite => {
            pipeline
                .ingest_composite(
                    symbol,
                    settings.short_window,
                    settings.long_window,
                    prefix,
                    concurrency,
                )
                .await?;
        }
    }

    info!("all records dispatched");
    Ok(())
}
