use cask_stream::StreamError;
use cask_types::TypeError;

use crate::keys;

/// Errors from object store operations.
///
/// All variants except `Io` signal a logical precondition violation; none
/// are retried by this layer. Transient substrate failures propagate
/// unchanged from the stream adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No current record exists for the object name.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The current record for the name is a tombstone.
    #[error("object is deleted: {0}")]
    ObjectIsDeleted(String),

    /// The name currently refers to a live, non-link object.
    #[error("object already exists: {0}")]
    ObjectAlreadyExists(String),

    /// Links may point only at non-link records.
    #[error("cannot link to another link: {0}")]
    CantLinkToLink(String),

    /// Bucket links carry no bytes and cannot be the target of a get.
    #[error("cannot get a bucket link: {0}")]
    CantGetBucketLink(String),

    /// Links are created through the link operations, never through put.
    #[error("link is not allowed on put: {0}")]
    LinkNotAllowedOnPut(String),

    /// Digest or size verification failed while reading an object back.
    #[error("integrity mismatch for {name}: expected {expected}, computed {computed}")]
    IntegrityMismatch {
        name: String,
        expected: String,
        computed: String,
    },

    /// Mutation attempted on a sealed bucket.
    #[error("bucket is sealed: {0}")]
    BucketSealed(String),

    /// No bucket with this name exists.
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    /// A bucket with this name already exists.
    #[error("bucket already exists: {0}")]
    BucketAlreadyExists(String),

    /// The object name collides with a reserved key prefix.
    #[error("object name is reserved: {0}")]
    ReservedObjectName(String),

    /// Supplied metadata failed validation.
    #[error("invalid metadata: {0}")]
    InvalidMeta(#[from] TypeError),

    /// A metadata record on the stream could not be encoded or decoded.
    #[error("metadata record error: {0}")]
    Record(String),

    /// I/O failure reading a put source or writing a get sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StreamError> for StoreError {
    fn from(err: StreamError) -> Self {
        // Substrate streams are named after buckets; report bucket-level
        // conditions in bucket terms.
        let bucket = |stream: String| {
            keys::bucket_of(&stream)
                .map(str::to_string)
                .unwrap_or(stream)
        };
        match err {
            StreamError::NotFound(stream) => StoreError::BucketNotFound(bucket(stream)),
            StreamError::AlreadyExists(stream) => StoreError::BucketAlreadyExists(bucket(stream)),
            StreamError::Sealed(stream) => StoreError::BucketSealed(bucket(stream)),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
