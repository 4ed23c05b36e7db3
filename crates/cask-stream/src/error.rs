/// Errors from stream substrate operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
    /// The named stream does not exist.
    #[error("stream not found: {0}")]
    NotFound(String),

    /// A stream with this name already exists.
    #[error("stream already exists: {0}")]
    AlreadyExists(String),

    /// The stream is sealed; no further appends are accepted.
    #[error("stream is sealed: {0}")]
    Sealed(String),
}

/// Result alias for substrate operations.
pub type StreamResult<T> = Result<T, StreamError>;
