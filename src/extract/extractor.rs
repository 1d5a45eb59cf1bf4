use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::source::Source;
use super::types::ExtractError;
use crate::etl::WaitGuard;
use crate::transform::Transformer;

/// Lower bound of the pause between two fetches.
pub const MIN_DELAY: Duration = Duration::from_millis(250);
/// Exclusive upper bound of the pause between two fetches.
pub const MAX_DELAY: Duration = Duration::from_millis(750);

/// Polls one source forever, publishing each transformed record.
///
/// The loop has no retry: the first fetch or transform error ends it.
pub struct Extractor<T> {
    name: String,
    source: Arc<dyn Source>,
    transformer: Arc<dyn Transformer<Output = T>>,
}

impl<T> Extractor<T>
where
    T: Send + 'static,
{
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn Source>,
        transformer: Arc<dyn Transformer<Output = T>>,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            transformer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the fetch → transform → publish → sleep cycle.
    ///
    /// `done` is held for the whole call and released on every exit path.
    /// Returns `Ok(())` only when `cancel` fires.
    pub async fn run(
        &self,
        cancel: &CancellationToken,
        output: mpsc::Sender<T>,
        done: WaitGuard,
    ) -> Result<(), ExtractError> {
        let _done = done;
        debug!(datasource = %self.name, source = %self.source.location(), "extraction started");

        loop {
            let raw = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                raw = self.source.fetch() => raw?,
            };

            let record = self.transformer.transform(&raw)?;

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                sent = output.send(record) => {
                    sent.map_err(|_| ExtractError::ChannelClosed)?;
                }
            }
            trace!(datasource = %self.name, "record published");

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = sleep(jitter()) => {}
            }
        }
    }
}

/// Uniform delay in `[MIN_DELAY, MAX_DELAY)`.
fn jitter() -> Duration {
    let min = MIN_DELAY.as_millis() as u64;
    let max = MAX_DELAY.as_millis() as u64;
    let millis = rand::thread_rng().gen_range(min..max);
    Duration::from_millis(millis)
}
