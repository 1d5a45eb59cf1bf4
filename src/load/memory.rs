use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::sink::Sink;
use super::types::SinkError;

/// Keeps every written record in process memory.
///
/// Selected with `database.type = "memory"` for dry runs.
#[derive(Debug)]
pub struct MemorySink<T> {
    items: Mutex<Vec<T>>,
}

impl<T> Default for MemorySink<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T> MemorySink<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl<T> Sink<T> for MemorySink<T>
where
    T: Clone + Send + Sync,
{
    async fn write_one(&self, _cancel: &CancellationToken, item: &T) -> Result<(), SinkError> {
        self.items.lock().await.push(item.clone());
        debug!("stored 1 record in memory");
        Ok(())
    }

    async fn write_many(&self, _cancel: &CancellationToken, items: &[T]) -> Result<(), SinkError> {
        self.items.lock().await.extend_from_slice(items);
        debug!(count = items.len(), "stored records in memory");
        Ok(())
    }
}
