pub mod pipeline;
pub mod registry;
pub mod types;
pub mod wait_group;

pub use pipeline::Pipeline;
pub use registry::Registry;
pub use types::ETLError;
pub use wait_group::{WaitGroup, WaitGuard};
