use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::types::ETLError;
use super::wait_group::WaitGroup;
use crate::bucket::{Bucket, Config};
use crate::extract::Extractor;
use crate::load::Sink;

/// Wires N extraction loops to one flush engine through a bounded channel.
///
/// # Lifecycle
///
/// 1. The flush engine is spawned on the receiving end of the channel.
/// 2. One task per extractor is spawned, each holding a sender and a
///    [`WaitGroup`] slot.
/// 3. `run` waits until every extraction loop has stopped. The channel then
///    closes and the engine flushes what it still buffers.
///
/// A failing or panicking engine cancels `cancel` so the loops stop too, and
/// `run` returns only after they have.
pub struct Pipeline<T> {
    bucket: Bucket<T>,
    sink: Arc<dyn Sink<T>>,
    extractors: Vec<Extractor<T>>,
    channel_size: usize,
}

impl<T> Pipeline<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(config: Arc<Config>, sink: Arc<dyn Sink<T>>, channel_size: usize) -> Self {
        Pipeline {
            bucket: Bucket::new(config),
            sink,
            extractors: Vec::new(),
            channel_size: channel_size.max(1),
        }
    }

    pub fn add_extractor(&mut self, extractor: Extractor<T>) {
        self.extractors.push(extractor);
    }

    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    pub async fn run(self, cancel: &CancellationToken) -> Result<(), ETLError> {
        let Pipeline {
            bucket,
            sink,
            extractors,
            channel_size,
        } = self;

        if extractors.is_empty() {
            warn!("no datasource configured");
        }

        let (tx, rx) = mpsc::channel(channel_size);

        let engine_cancel = cancel.clone();
        let mut engine =
            tokio::spawn(async move { bucket.run(&engine_cancel, sink.as_ref(), rx).await });

        let wg = WaitGroup::new();
        for extractor in extractors {
            let guard = wg.add();
            let tx = tx.clone();
            let cancel = cancel.clone();

            info!(datasource = %extractor.name(), "datasource starting");
            tokio::spawn(async move {
                match extractor.run(&cancel, tx, guard).await {
                    Ok(()) => info!(datasource = %extractor.name(), "extraction cancelled"),
                    Err(e) => error!(
                        datasource = %extractor.name(),
                        error = &e as &(dyn std::error::Error + 'static),
                        "extraction stopped"
                    ),
                }
            });
        }
        drop(tx);

        tokio::select! {
            _ = wg.wait() => {
                info!("all extraction loops stopped, flushing pipeline");
                engine.await??;
                Ok(())
            }

            joined = &mut engine => {
                let result = match joined {
                    Ok(result) => result.map_err(ETLError::from),
                    Err(e) => Err(ETLError::from(e)),
                };
                if let Err(e) = &result {
                    error!(error = e as &(dyn std::error::Error + 'static), "flush engine stopped, halting extraction");
                    cancel.cancel();
                }
                wg.wait().await;
                result
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
