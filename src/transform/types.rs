use thiserror::Error;

/// Errors produced while turning a raw payload into a record.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The payload is not a JSON document of the expected shape.
    #[error("malformed payload")]
    Malformed(#[from] serde_json::Error),

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A date field does not match `YYYY-MM-DD`.
    #[error("invalid date {value:?} in field `{field}`")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
