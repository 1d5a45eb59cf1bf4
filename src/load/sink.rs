use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::SinkError;

/// Durable write target for records leaving the pipeline.
///
/// Both operations are all-or-nothing: an `Err` means nothing from that call
/// was persisted. Implementations may refuse to start a write once `cancel`
/// has fired.
#[async_trait]
pub trait Sink<T>: Send + Sync {
    async fn write_one(&self, cancel: &CancellationToken, item: &T) -> Result<(), SinkError>;

    async fn write_many(&self, cancel: &CancellationToken, items: &[T]) -> Result<(), SinkError>;
}
