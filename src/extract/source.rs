use async_trait::async_trait;

use super::types::FetchError;

/// A place raw payloads are pulled from, one payload per call.
#[async_trait]
pub trait Source: Send + Sync {
    /// URL or path this source reads, for logging.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}
