use crate::bucket::BucketError;
use crate::load::SinkError;

/// Errors that can occur while building or running a pipeline
#[derive(Debug, thiserror::Error)]
pub enum ETLError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Datasource '{name}': type '{source_type}' with transformer '{transformer}' is not implemented")]
    UnsupportedSource {
        name: String,
        source_type: String,
        transformer: String,
    },

    #[error("Database type '{0}' is not implemented")]
    UnsupportedStore(String),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Sink setup failed")]
    Sink(#[from] SinkError),

    #[error("Flush engine failed")]
    Bucket(#[from] BucketError),

    #[error("Flush engine task failed")]
    Join(#[from] tokio::task::JoinError),
}
