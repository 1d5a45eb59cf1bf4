//! Application configuration.
//!
//! Values are layered with the `config` crate: an optional JSON file first,
//! then `ETL_`-prefixed environment variables with `__` between nesting
//! levels, e.g. `ETL_APPLICATION__BULK_INSERT=true`.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::bucket::{self, ConfigBuilder, FlushMode};
use crate::etl::ETLError;

pub const DEFAULT_CONFIG_PATH: &str = "config";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_PIPELINE_SIZE: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DATABASE_TYPE: &str = "postgresql";

const ENV_PREFIX: &str = "ETL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub application: ApplicationConfig,
    #[serde(default)]
    pub datasource: Vec<DataSourceConfig>,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// trace, debug, info, warn/warning or error
    pub log_level: String,
    /// Capacity of the channel between extraction loops and the flush engine
    pub process_pipeline_size: usize,
    pub bulk_insert: bool,
    /// Records per batch, only read when `bulk_insert` is set
    pub bulk_insert_size: Option<usize>,
    /// Seconds a partial batch may wait, only read when `bulk_insert` is set
    pub bulk_insert_interval: Option<u64>,
    /// Seconds before an HTTP fetch gives up
    pub request_timeout: u64,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            process_pipeline_size: DEFAULT_PIPELINE_SIZE,
            bulk_insert: false,
            bulk_insert_size: None,
            bulk_insert_interval: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSourceConfig {
    pub name: String,
    /// `http` or `file`
    #[serde(rename = "type")]
    pub kind: String,
    pub transformer: String,
    /// URL or file path, depending on `kind`
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `postgresql` or `memory`
    #[serde(rename = "type")]
    pub kind: String,
    pub connection_string: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            kind: DEFAULT_DATABASE_TYPE.to_string(),
            connection_string: None,
        }
    }
}

impl AppConfig {
    /// Loads `<path>.json` if it exists, then applies environment overrides.
    pub fn load(path: &str) -> Result<Self, ETLError> {
        let layered = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = layered.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document without consulting the environment.
    pub fn from_json(raw: &str) -> Result<Self, ETLError> {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(raw, FileFormat::Json))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ETLError> {
        if self.application.process_pipeline_size == 0 {
            return Err(ETLError::Configuration(
                "process_pipeline_size must be at least 1".to_string(),
            ));
        }

        if self.application.request_timeout == 0 {
            return Err(ETLError::Configuration(
                "request_timeout must be at least 1 second".to_string(),
            ));
        }

        if self.database.kind == DEFAULT_DATABASE_TYPE
            && self
                .database
                .connection_string
                .as_deref()
                .map_or(true, str::is_empty)
        {
            return Err(ETLError::Configuration(
                "missing database connection string".to_string(),
            ));
        }

        self.bucket_config()?;
        Ok(())
    }

    /// Flush engine settings derived from the `application` section.
    pub fn bucket_config(&self) -> Result<Arc<bucket::Config>, ETLError> {
        let app = &self.application;
        let mut builder = ConfigBuilder::default();

        if app.bulk_insert {
            let size = app.bulk_insert_size.ok_or_else(|| {
                ETLError::Configuration("bulk_insert_size is required for bulk insert".to_string())
            })?;
            let interval = app.bulk_insert_interval.ok_or_else(|| {
                ETLError::Configuration(
                    "bulk_insert_interval is required for bulk insert".to_string(),
                )
            })?;

            builder
                .mode(FlushMode::Bulk)
                .batch_size(size)
                .flush_interval(Duration::from_secs(interval));
        }

        builder
            .build()
            .map(Arc::new)
            .map_err(|e| ETLError::Configuration(e.to_string()))
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.application.request_timeout)
    }
}
