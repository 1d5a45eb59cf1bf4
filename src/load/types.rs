use thiserror::Error;

/// Errors returned by a [`Sink`](super::Sink) write.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying database rejected the statement or the connection failed.
    #[error("database error")]
    Database(#[from] sea_orm::DbErr),

    /// The sink refused the write without touching storage.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// Shutdown was requested before the write started.
    #[error("write cancelled")]
    Cancelled,
}
