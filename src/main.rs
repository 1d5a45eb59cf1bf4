use anyhow::Context;
use clap::Parser;
use std::future::Future;
use std::io;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use feed_etl::config::{AppConfig, DEFAULT_CONFIG_PATH};
use feed_etl::etl::Registry;
use feed_etl::logging::init_logging;

#[derive(Debug, Parser)]
#[command(name = "feed-etl", version, about = "Polls datasources and loads the records into a store")]
struct Cli {
    /// Config file path, without the `.json` extension
    #[arg(short, long, env = "ETL_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log at debug level regardless of the configured level
    #[arg(short, long)]
    verbose: bool,
}

/// Cancels `cancel` once `signal` fires.
///
/// A signal handler that could not be installed leaves the pipeline running.
async fn cancel_on_signal<F>(signal: F, cancel: CancellationToken)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("shutdown signal received");
            cancel.cancel();
        }
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from '{}'", cli.config))?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.application.log_level.as_str()
    };
    init_logging(level).context("failed to initialize logging")?;

    info!(
        datasources = config.datasource.len(),
        database = %config.database.kind,
        "starting pipeline"
    );

    let registry = Registry::new(config.request_timeout())?;
    let sink = registry
        .connect_sink(&config.database)
        .await
        .context("failed to open store")?;
    let pipeline = registry.build_pipeline(&config, sink)?;

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), cancel.clone()));

    pipeline.run(&cancel).await.context("pipeline failed")?;
    info!("pipeline stopped");
    Ok(())
}
