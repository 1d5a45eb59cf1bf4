use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::pipeline::Pipeline;
use super::types::ETLError;
use crate::config::{AppConfig, DataSourceConfig, DatabaseConfig};
use crate::extract::{Extractor, FileSource, HttpSource, Source};
use crate::load::{MemorySink, PostgresSink, Sink};
use crate::transform::{RandomDataApiTransformer, Transformer, User};

pub const HTTP_SOURCE: &str = "http";
pub const FILE_SOURCE: &str = "file";
pub const POSTGRESQL_STORE: &str = "postgresql";
pub const MEMORY_STORE: &str = "memory";

/// Turns configuration entries into sources, transformers and sinks.
///
/// Every HTTP source built here shares one client.
#[derive(Debug, Clone)]
pub struct Registry {
    http_client: Client,
}

impl Registry {
    pub fn new(request_timeout: Duration) -> Result<Self, ETLError> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(ETLError::HttpClient)?;

        Ok(Self { http_client })
    }

    /// Builds the extraction loop for one datasource.
    ///
    /// Fails with [`ETLError::UnsupportedSource`] when either the source type
    /// or the transformer is unknown.
    pub fn extractor(&self, datasource: &DataSourceConfig) -> Result<Extractor<User>, ETLError> {
        let unsupported = || ETLError::UnsupportedSource {
            name: datasource.name.clone(),
            source_type: datasource.kind.clone(),
            transformer: datasource.transformer.clone(),
        };

        let source: Arc<dyn Source> = match datasource.kind.as_str() {
            HTTP_SOURCE => Arc::new(HttpSource::new(
                self.http_client.clone(),
                datasource.source.as_str(),
            )),
            FILE_SOURCE => Arc::new(FileSource::new(datasource.source.as_str())),
            _ => return Err(unsupported()),
        };

        let transformer: Arc<dyn Transformer<Output = User>> =
            match datasource.transformer.as_str() {
                RandomDataApiTransformer::NAME => Arc::new(RandomDataApiTransformer::new()),
                _ => return Err(unsupported()),
            };

        debug!(
            datasource = %datasource.name,
            source_type = %datasource.kind,
            transformer = %datasource.transformer,
            "datasource registered"
        );
        Ok(Extractor::new(datasource.name.as_str(), source, transformer))
    }

    /// Opens the configured store.
    ///
    /// PostgreSQL stores get their `users` table created on connect.
    pub async fn connect_sink(
        &self,
        database: &DatabaseConfig,
    ) -> Result<Arc<dyn Sink<User>>, ETLError> {
        match database.kind.as_str() {
            POSTGRESQL_STORE => {
                let connection_string = database.connection_string.as_deref().ok_or_else(|| {
                    ETLError::Configuration("missing database connection string".to_string())
                })?;
                let sink = PostgresSink::connect(connection_string).await?;
                sink.ensure_schema().await?;
                Ok(Arc::new(sink))
            }
            MEMORY_STORE => {
                info!("using in-memory store, records are not persisted");
                Ok(Arc::new(MemorySink::<User>::new()))
            }
            other => Err(ETLError::UnsupportedStore(other.to_string())),
        }
    }

    /// Assembles a pipeline with one extraction loop per datasource.
    pub fn build_pipeline(
        &self,
        config: &AppConfig,
        sink: Arc<dyn Sink<User>>,
    ) -> Result<Pipeline<User>, ETLError> {
        let mut pipeline = Pipeline::new(
            config.bucket_config()?,
            sink,
            config.application.process_pipeline_size,
        );

        for datasource in &config.datasource {
            pipeline.add_extractor(self.extractor(datasource)?);
        }

        info!(
            datasources = pipeline.extractor_count(),
            bulk_insert = config.application.bulk_insert,
            "pipeline assembled"
        );
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(Duration::from_secs(5)).unwrap()
    }

    fn datasource(kind: &str, transformer: &str) -> DataSourceConfig {
        DataSourceConfig {
            name: "users".to_string(),
            kind: kind.to_string(),
            transformer: transformer.to_string(),
            source: "http://localhost/users".to_string(),
        }
    }

    fn memory_config(datasource: Vec<DataSourceConfig>) -> AppConfig {
        AppConfig {
            datasource,
            database: DatabaseConfig {
                kind: MEMORY_STORE.to_string(),
                connection_string: None,
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_builds_known_datasources() {
        let registry = registry();

        let http = registry
            .extractor(&datasource(HTTP_SOURCE, RandomDataApiTransformer::NAME))
            .unwrap();
        assert_eq!(http.name(), "users");

        assert!(registry
            .extractor(&datasource(FILE_SOURCE, RandomDataApiTransformer::NAME))
            .is_ok());
    }

    #[test]
    fn test_unknown_source_type_rejected() {
        let result = registry().extractor(&datasource("ftp", RandomDataApiTransformer::NAME));

        match result {
            Err(ETLError::UnsupportedSource { source_type, .. }) => assert_eq!(source_type, "ftp"),
            other => panic!("expected UnsupportedSource, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unknown_transformer_rejected() {
        let result = registry().extractor(&datasource(HTTP_SOURCE, "random-data-api-v2"));

        match result {
            Err(ETLError::UnsupportedSource { transformer, .. }) => {
                assert_eq!(transformer, "random-data-api-v2")
            }
            other => panic!("expected UnsupportedSource, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_memory_store() {
        let database = DatabaseConfig {
            kind: MEMORY_STORE.to_string(),
            connection_string: None,
        };
        assert!(registry().connect_sink(&database).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_store_rejected() {
        let database = DatabaseConfig {
            kind: "mongodb".to_string(),
            connection_string: Some("mongodb://localhost".to_string()),
        };

        match registry().connect_sink(&database).await {
            Err(ETLError::UnsupportedStore(kind)) => assert_eq!(kind, "mongodb"),
            Err(other) => panic!("expected UnsupportedStore, got {other:?}"),
            Ok(_) => panic!("expected UnsupportedStore"),
        }
    }

    #[tokio::test]
    async fn test_postgresql_without_connection_string() {
        let database = DatabaseConfig {
            kind: POSTGRESQL_STORE.to_string(),
            connection_string: None,
        };

        assert!(matches!(
            registry().connect_sink(&database).await,
            Err(ETLError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_pipeline_registers_every_datasource() {
        let config = memory_config(vec![
            datasource(HTTP_SOURCE, RandomDataApiTransformer::NAME),
            datasource(FILE_SOURCE, RandomDataApiTransformer::NAME),
        ]);
        let sink: Arc<dyn Sink<User>> = Arc::new(MemorySink::<User>::new());

        let pipeline = registry().build_pipeline(&config, sink).unwrap();
        assert_eq!(pipeline.extractor_count(), 2);
    }

    #[test]
    fn test_build_pipeline_stops_at_unsupported_datasource() {
        let config = memory_config(vec![
            datasource(HTTP_SOURCE, RandomDataApiTransformer::NAME),
            datasource("queue", RandomDataApiTransformer::NAME),
        ]);
        let sink: Arc<dyn Sink<User>> = Arc::new(MemorySink::<User>::new());

        assert!(matches!(
            registry().build_pipeline(&config, sink),
            Err(ETLError::UnsupportedSource { .. })
        ));
    }

    #[tokio::test]
    async fn test_file_datasource_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        std::fs::write(
            &path,
            r#"{
                "first_name": "Ada",
                "last_name": "Lovelace",
                "date_of_birth": "1815-12-10",
                "address": {"city": "London", "country": "United Kingdom"}
            }"#,
        )
        .unwrap();

        let mut source = datasource(FILE_SOURCE, RandomDataApiTransformer::NAME);
        source.source = path.to_string_lossy().into_owned();
        let config = memory_config(vec![source]);

        let memory = Arc::new(MemorySink::<User>::new());
        let pipeline = registry()
            .build_pipeline(&config, memory.clone())
            .unwrap();

        let cancel = tokio_util::sync::CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(600)).await;
            stopper.cancel();
        });
        pipeline.run(&cancel).await.unwrap();

        let stored = memory.snapshot().await;
        assert!(!stored.is_empty());
        assert_eq!(stored[0].first_name, "Ada");
        assert_eq!(stored[0].address.city, "London");
    }
}
