use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::link::Link;
use crate::meta::ObjectMeta;
use crate::nuid::Nuid;

/// The persisted record of an object's current (or tombstoned) state.
///
/// Composes the caller-supplied [`ObjectMeta`] with the system-assigned
/// fields: bucket, nuid, size, chunk count, digest, modification time, and
/// the deleted flag. A fresh nuid is assigned at every put, so the nuid
/// identifies one specific generation of the logical name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub bucket: String,
    pub nuid: Nuid,
    pub size: u64,
    pub chunks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<Digest>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(flatten)]
    pub meta: ObjectMeta,
}

impl ObjectInfo {
    /// Compose a live record from supplied meta and system-assigned fields.
    pub fn compose(
        bucket: impl Into<String>,
        meta: ObjectMeta,
        nuid: Nuid,
        size: u64,
        chunks: u32,
        digest: Digest,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            nuid,
            size,
            chunks,
            digest: Some(digest),
            modified: Utc::now(),
            deleted: false,
            meta,
        }
    }

    /// Build a link record: no payload, no digest, a fresh nuid.
    pub fn link_record(bucket: impl Into<String>, name: impl Into<String>, link: Link) -> Self {
        let mut meta = ObjectMeta::new(name);
        meta.link = Some(link);
        Self {
            bucket: bucket.into(),
            nuid: Nuid::fresh(),
            size: 0,
            chunks: 0,
            digest: None,
            modified: Utc::now(),
            deleted: false,
            meta,
        }
    }

    /// Derive the tombstone for this record.
    ///
    /// The nuid and meta are retained; size, chunk count, and digest are
    /// cleared since the chunks are no longer reachable through this name.
    pub fn tombstone(&self) -> Self {
        Self {
            bucket: self.bucket.clone(),
            nuid: self.nuid.clone(),
            size: 0,
            chunks: 0,
            digest: None,
            modified: Utc::now(),
            deleted: true,
            meta: self.meta.clone(),
        }
    }

    /// The object name (unique key within the bucket).
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// The link carried by this record, if any.
    pub fn link(&self) -> Option<&Link> {
        self.meta.link.as_ref()
    }

    /// Returns `true` if this record is a link (object or bucket).
    pub fn is_link(&self) -> bool {
        self.meta.link.is_some()
    }
}

// Equality ignores the modification timestamp to tolerate clock skew between
// writer and reader; description and headers are likewise not part of object
// identity.
impl PartialEq for ObjectInfo {
    fn eq(&self, other: &Self) -> bool {
        self.bucket == other.bucket
            && self.meta.name == other.meta.name
            && self.nuid == other.nuid
            && self.size == other.size
            && self.chunks == other.chunks
            && self.digest == other.digest
            && self.deleted == other.deleted
            && self.meta.link == other.meta.link
    }
}

impl Eq for ObjectInfo {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> ObjectInfo {
        ObjectInfo::compose(
            "bkt",
            ObjectMeta::new("obj").description("d"),
            Nuid::fresh(),
            15,
            2,
            Digest::of(b"payload"),
        )
    }

    #[test]
    fn compose_sets_system_fields() {
        let info = sample();
        assert_eq!(info.bucket, "bkt");
        assert_eq!(info.name(), "obj");
        assert_eq!(info.size, 15);
        assert_eq!(info.chunks, 2);
        assert!(info.digest.is_some());
        assert!(!info.deleted);
        assert!(!info.is_link());
    }

    #[test]
    fn equality_ignores_modified() {
        let a = sample();
        let mut b = a.clone();
        b.modified += Duration::seconds(90);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_respects_nuid() {
        let a = sample();
        let mut b = a.clone();
        b.nuid = Nuid::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn tombstone_clears_payload_fields() {
        let info = sample();
        let ts = info.tombstone();
        assert!(ts.deleted);
        assert_eq!(ts.size, 0);
        assert_eq!(ts.chunks, 0);
        assert!(ts.digest.is_none());
        assert_eq!(ts.nuid, info.nuid);
        assert_eq!(ts.name(), info.name());
    }

    #[test]
    fn tombstone_is_stable() {
        let ts = sample().tombstone();
        assert_eq!(ts, ts.tombstone());
    }

    #[test]
    fn link_record_shape() {
        let info = ObjectInfo::link_record("bkt", "ln", Link::object("other", "target"));
        assert!(info.is_link());
        assert_eq!(info.size, 0);
        assert_eq!(info.chunks, 0);
        assert!(info.digest.is_none());
        assert_eq!(info.link().unwrap().object_name(), Some("target"));
    }

    #[test]
    fn serde_roundtrip() {
        let info = sample();
        let json = serde_json::to_string(&info).unwrap();
        let parsed: ObjectInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, parsed);
    }
}
