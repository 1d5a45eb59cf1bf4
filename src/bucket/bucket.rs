use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::config::{Config, FlushMode};
use super::types::BucketError;
use crate::load::Sink;

/// Single consumer of the pipeline channel.
///
/// Owns the batch buffer and the flush timer; nothing else touches them, so
/// neither needs a lock.
pub struct Bucket<T> {
    config: Arc<Config>,
    _marker: std::marker::PhantomData<fn(T)>,
}

impl<T> Bucket<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            _marker: std::marker::PhantomData,
        }
    }

    /// Drains `input` into `sink` until cancelled, the channel closes, or a
    /// write fails.
    ///
    /// Cancellation returns `Ok(())` and drops whatever is buffered. A closed
    /// channel flushes the remaining buffer first.
    pub async fn run<S>(
        &self,
        cancel: &CancellationToken,
        sink: &S,
        mut input: mpsc::Receiver<T>,
    ) -> Result<(), BucketError>
    where
        S: Sink<T> + ?Sized,
    {
        match self.config.mode {
            FlushMode::Single => Self::run_single(cancel, sink, &mut input).await,
            FlushMode::Bulk => self.run_bulk(cancel, sink, &mut input).await,
        }
    }

    async fn run_single<S>(
        cancel: &CancellationToken,
        sink: &S,
        input: &mut mpsc::Receiver<T>,
    ) -> Result<(), BucketError>
    where
        S: Sink<T> + ?Sized,
    {
        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("flush engine cancelled");
                    return Ok(());
                }

                item = input.recv() => {
                    match item {
                        Some(item) => {
                            sink.write_one(cancel, &item)
                                .await
                                .map_err(BucketError::WriteOne)?;
                        }
                        None => {
                            debug!("input channel closed");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn run_bulk<S>(
        &self,
        cancel: &CancellationToken,
        sink: &S,
        input: &mut mpsc::Receiver<T>,
    ) -> Result<(), BucketError>
    where
        S: Sink<T> + ?Sized,
    {
        let batch_size = self.config.batch_size;
        let period = self.config.flush_interval;

        let mut queue: Vec<T> = Vec::with_capacity(batch_size);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    if !queue.is_empty() {
                        warn!(dropped = queue.len(), "flush engine cancelled with unflushed records");
                    }
                    return Ok(());
                }

                _ = ticker.tick() => {
                    if !queue.is_empty() {
                        debug!(count = queue.len(), "interval flush");
                        Self::flush(cancel, sink, &mut queue).await?;
                    }
                }

                item = input.recv() => {
                    match item {
                        Some(item) => {
                            queue.push(item);

                            if queue.len() >= batch_size {
                                debug!(count = queue.len(), "batch size flush");
                                Self::flush(cancel, sink, &mut queue).await?;
                                ticker.reset();
                            }
                        }
                        None => {
                            debug!(count = queue.len(), "input channel closed, final flush");
                            return Self::flush(cancel, sink, &mut queue).await;
                        }
                    }
                }
            }
        }
    }

    // The buffer is cleared whether or not the write succeeds.
    async fn flush<S>(
        cancel: &CancellationToken,
        sink: &S,
        queue: &mut Vec<T>,
    ) -> Result<(), BucketError>
    where
        S: Sink<T> + ?Sized,
    {
        if queue.is_empty() {
            return Ok(());
        }

        let result = sink.write_many(cancel, queue.as_slice()).await;
        let count = queue.len();
        queue.clear();

        result.map_err(|source| BucketError::WriteMany { count, source })
    }
}
