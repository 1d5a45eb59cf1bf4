use thiserror::Error;

use crate::load::SinkError;

/// Errors that stop the flush engine.
///
/// Both are fatal: the engine returns and stops reading its input channel.
#[derive(Debug, Error)]
pub enum BucketError {
    /// A single-record write failed.
    #[error("single write failed")]
    WriteOne(#[source] SinkError),

    /// A batch write failed. The batch was already taken out of the buffer
    /// and is not retried.
    #[error("batch write of {count} record(s) failed")]
    WriteMany {
        count: usize,
        #[source]
        source: SinkError,
    },
}
