/// Errors from constructing or validating metadata values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// Object names must be non-empty after trimming whitespace.
    #[error("object name must not be empty")]
    EmptyObjectName,

    /// A header key mapped to an empty value list.
    #[error("header key {0:?} has no values")]
    EmptyHeaderValues(String),

    /// The configured chunk size was zero.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    /// Bucket names must be non-empty after trimming whitespace.
    #[error("bucket name must not be empty")]
    EmptyBucketName,

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A decoded value had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
