use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use super::source::Source;
use super::types::FetchError;

/// Issues a GET against a fixed URL on every fetch.
///
/// The client is shared between sources, so timeouts are configured once on
/// the [`Client`] by the caller.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn request_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Request {
            url: self.url.clone(),
            source,
        }
    }
}

#[async_trait]
impl Source for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;
        trace!(url = %self.url, bytes = body.len(), "fetched payload");
        Ok(body.to_vec())
    }
}
