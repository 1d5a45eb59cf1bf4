use std::path::PathBuf;
use thiserror::Error;

use crate::transform::TransformError;

/// Errors returned by a [`Source`](super::Source) fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons an extraction loop stopped.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("fetch failed")]
    Fetch(#[from] FetchError),

    #[error("transform failed")]
    Transform(#[from] TransformError),

    /// The consumer side of the pipeline channel is gone.
    #[error("output channel closed")]
    ChannelClosed,
}
