// src/bucket/config.rs

use derive_builder::Builder;
use std::time::Duration;

/// Longest interval a partial batch may wait in bulk mode.
pub const MAX_FLUSH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// How the flush engine hands records to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// One `write_one` per received record.
    #[default]
    Single,
    /// Accumulate and `write_many` on size or interval, whichever comes first.
    Bulk,
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    /// Flush strategy, fixed for the lifetime of a run
    #[builder(default)]
    pub(crate) mode: FlushMode,

    /// Number of buffered records that forces a flush in bulk mode
    #[builder(default = "1")]
    pub(crate) batch_size: usize,

    /// Maximum time a partial batch waits before it is flushed
    #[builder(default = "Duration::from_secs(5)")]
    pub(crate) flush_interval: Duration,
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.mode != Some(FlushMode::Bulk) {
            return Ok(());
        }
        if self.batch_size == Some(0) {
            return Err("batch_size must be at least 1 in bulk mode".to_string());
        }
        if self.flush_interval.is_some_and(|interval| interval.is_zero()) {
            return Err("flush_interval must be greater than zero in bulk mode".to_string());
        }
        if self
            .flush_interval
            .is_some_and(|interval| interval > MAX_FLUSH_INTERVAL)
        {
            return Err(format!(
                "flush_interval must not exceed {}s in bulk mode",
                MAX_FLUSH_INTERVAL.as_secs()
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Returns the flush strategy
    #[inline]
    pub fn mode(&self) -> FlushMode {
        self.mode
    }

    /// Returns the batch size for bulk flushing
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the interval after which a partial batch is flushed
    #[inline]
    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_single_mode() {
        let config = ConfigBuilder::default().build().unwrap();

        assert_eq!(config.mode(), FlushMode::Single);
        assert_eq!(config.batch_size(), 1);
        assert_eq!(config.flush_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_bulk_config() {
        let config = ConfigBuilder::default()
            .mode(FlushMode::Bulk)
            .batch_size(100usize)
            .flush_interval(Duration::from_secs(2))
            .build()
            .unwrap();

        assert_eq!(config.mode(), FlushMode::Bulk);
        assert_eq!(config.batch_size(), 100);
        assert_eq!(config.flush_interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_bulk_rejects_zero_batch_size() {
        let err = ConfigBuilder::default()
            .mode(FlushMode::Bulk)
            .batch_size(0usize)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_bulk_rejects_zero_interval() {
        let err = ConfigBuilder::default()
            .mode(FlushMode::Bulk)
            .flush_interval(Duration::ZERO)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("flush_interval"));
    }

    #[test]
    fn test_bulk_rejects_interval_above_max() {
        let err = ConfigBuilder::default()
            .mode(FlushMode::Bulk)
            .flush_interval(Duration::from_secs(u64::MAX))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("flush_interval"));

        let config = ConfigBuilder::default()
            .mode(FlushMode::Bulk)
            .flush_interval(MAX_FLUSH_INTERVAL)
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_single_mode_ignores_batch_settings() {
        let config = ConfigBuilder::default()
            .batch_size(0usize)
            .flush_interval(Duration::ZERO)
            .build();

        assert!(config.is_ok());
    }
}
