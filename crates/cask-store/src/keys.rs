//! Key and stream naming conventions.
//!
//! Every bucket is backed by one stream named `OBJ_<bucket>`. Within a
//! stream, metadata records are keyed by object name under the `$O.M.`
//! prefix and chunk entries by generation nuid under `$O.C.`, so
//! latest-per-key queries on the metadata prefix give the catalog view
//! while chunk reads address one generation exactly.

use cask_types::Nuid;

use crate::error::{StoreError, StoreResult};

/// Prefix of backing stream names.
pub const STREAM_PREFIX: &str = "OBJ_";

/// Key prefix for metadata records, keyed by object name.
pub const META_PREFIX: &str = "$O.M.";

/// Key prefix for chunk entries, keyed by generation nuid.
pub const CHUNK_PREFIX: &str = "$O.C.";

/// Reserved prefix object names must not collide with.
const RESERVED: &str = "$O.";

/// Name of the stream backing `bucket`.
pub fn stream_name(bucket: &str) -> String {
    format!("{STREAM_PREFIX}{bucket}")
}

/// Bucket name for a backing stream, if it carries the store prefix.
pub fn bucket_of(stream: &str) -> Option<&str> {
    stream.strip_prefix(STREAM_PREFIX)
}

/// Metadata key for an object name.
pub fn meta_key(name: &str) -> String {
    format!("{META_PREFIX}{name}")
}

/// Chunk key for a generation nuid.
pub fn chunk_key(nuid: &Nuid) -> String {
    format!("{CHUNK_PREFIX}{nuid}")
}

/// Reject object names that collide with the reserved key space.
pub fn ensure_unreserved(name: &str) -> StoreResult<()> {
    if name.starts_with(RESERVED) {
        return Err(StoreError::ReservedObjectName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_name_roundtrip() {
        let stream = stream_name("photos");
        assert_eq!(stream, "OBJ_photos");
        assert_eq!(bucket_of(&stream), Some("photos"));
        assert_eq!(bucket_of("unrelated"), None);
    }

    #[test]
    fn meta_and_chunk_keys_are_disjoint() {
        let m = meta_key("x");
        let c = chunk_key(&Nuid::from("x"));
        assert!(m.starts_with(META_PREFIX));
        assert!(c.starts_with(CHUNK_PREFIX));
        assert_ne!(m, c);
    }

    #[test]
    fn reserved_names_rejected() {
        assert!(ensure_unreserved("$O.M.sneaky").is_err());
        assert!(ensure_unreserved("$O.anything").is_err());
        assert!(ensure_unreserved("ordinary").is_ok());
        assert!(ensure_unreserved("$other").is_ok());
    }
}
