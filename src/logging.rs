//! Tracing subscriber setup.
//!
//! `RUST_LOG`, when set, wins over the configured level so individual
//! modules can be turned up without touching the config file:
//!
//! ```text
//! RUST_LOG=feed_etl::bucket=trace,sea_orm=warn feed-etl
//! ```

use tracing::{error, Level};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps a configured level name to a tracing [`Level`].
///
/// Case-insensitive; `warning` is accepted as an alias of `warn`.
pub fn parse_level(level: &str) -> Option<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber.
///
/// An unknown `level` falls back to `info` and is reported once the
/// subscriber is live. Fails only if a global subscriber is already set.
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    let parsed = parse_level(level);
    let default_level = parsed.unwrap_or(Level::INFO);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;

    if parsed.is_none() {
        error!(level = %level, "invalid log level, falling back to info");
    }
    Ok(())
}
