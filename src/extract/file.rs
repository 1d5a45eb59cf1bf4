use async_trait::async_trait;
use std::path::PathBuf;

use super::source::Source;
use super::types::FetchError;

/// Re-reads a whole file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    location: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        let location = path.into();
        Self {
            path: PathBuf::from(&location),
            location,
        }
    }
}

#[async_trait]
impl Source for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
