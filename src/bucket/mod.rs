pub mod bucket;
pub mod config;
pub mod types;

pub use bucket::Bucket;
pub use config::{Config, ConfigBuilder, ConfigBuilderError, FlushMode, MAX_FLUSH_INTERVAL};
pub use types::BucketError;
