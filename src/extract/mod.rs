pub mod extractor;
pub mod file;
pub mod http;
pub mod source;
pub mod types;

pub use extractor::Extractor;
pub use file::FileSource;
pub use http::HttpSource;
pub use source::Source;
pub use types::{ExtractError, FetchError};
