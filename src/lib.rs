//! # feed-etl
//!
//! A concurrent ETL (Extract-Transform-Load) pipeline built on Tokio.
//!
//! ## Features
//!
//! - **One extraction loop per datasource**, polling with a randomized pause
//! - **Backpressure** via a single bounded channel
//! - **Size or interval batch flushing**, whichever comes first
//! - **Graceful cancellation** through a shared [`CancellationToken`](tokio_util::sync::CancellationToken)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feed_etl::config::AppConfig;
//! use feed_etl::etl::Registry;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = AppConfig::load("config")?;
//! let registry = Registry::new(config.request_timeout())?;
//!
//! // Store first, so a bad connection string fails before any fetch
//! let sink = registry.connect_sink(&config.database).await?;
//! let pipeline = registry.build_pipeline(&config, sink)?;
//!
//! pipeline.run(&CancellationToken::new()).await?;
//! ```
//!
//! ## Modules
//!
//! - [`bucket`] - The flush engine draining the pipeline channel
//! - [`extract`] - Sources and the extraction loop
//! - [`transform`] - Payload to record mapping
//! - [`load`] - Sinks
//! - [`etl`] - Pipeline orchestration and the config-driven registry

pub mod bucket;
pub mod config;
pub mod etl;
pub mod extract;
pub mod load;
pub mod logging;
pub mod transform;
