pub mod entity;
pub mod memory;
pub mod postgres;
pub mod sink;
pub mod types;

pub use memory::MemorySink;
pub use postgres::PostgresSink;
pub use sink::Sink;
pub use types::SinkError;
