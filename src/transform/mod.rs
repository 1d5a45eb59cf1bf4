pub mod random_data_api;
pub mod record;
pub mod transformer;
pub mod types;

pub use random_data_api::RandomDataApiTransformer;
pub use record::{Address, User};
pub use transformer::Transformer;
pub use types::TransformError;
