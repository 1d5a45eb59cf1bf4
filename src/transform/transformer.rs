use super::types::TransformError;

/// Converts one raw payload into one record.
///
/// Implementations must be stateless: a single instance is shared by every
/// extraction loop that was configured with it and is called concurrently.
pub trait Transformer: Send + Sync {
    type Output;

    fn transform(&self, raw: &[u8]) -> Result<Self::Output, TransformError>;
}

impl<F, T> Transformer for F
where
    F: Fn(&[u8]) -> Result<T, TransformError> + Send + Sync,
{
    type Output = T;

    fn transform(&self, raw: &[u8]) -> Result<T, TransformError> {
        self(raw)
    }
}
