use serde::{Deserialize, Serialize};

/// Single-hop indirection record pointing at another object or bucket.
///
/// A link is never itself a valid link target; at most one level of
/// indirection exists by construction, so resolution can never loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Link {
    /// Points at a named object in a bucket (possibly another bucket).
    Object { bucket: String, name: String },
    /// Points at an entire bucket; carries no object name and no bytes.
    Bucket { bucket: String },
}

impl Link {
    /// Create an object link.
    pub fn object(bucket: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Object {
            bucket: bucket.into(),
            name: name.into(),
        }
    }

    /// Create a bucket link.
    pub fn bucket(bucket: impl Into<String>) -> Self {
        Self::Bucket {
            bucket: bucket.into(),
        }
    }

    /// Returns `true` if this link points at a single object.
    pub fn is_object_link(&self) -> bool {
        matches!(self, Self::Object { .. })
    }

    /// Returns `true` if this link points at an entire bucket.
    pub fn is_bucket_link(&self) -> bool {
        matches!(self, Self::Bucket { .. })
    }

    /// The bucket this link points into.
    pub fn bucket_name(&self) -> &str {
        match self {
            Self::Object { bucket, .. } | Self::Bucket { bucket } => bucket,
        }
    }

    /// The target object name, if this is an object link.
    pub fn object_name(&self) -> Option<&str> {
        match self {
            Self::Object { name, .. } => Some(name),
            Self::Bucket { .. } => None,
        }
    }
}
