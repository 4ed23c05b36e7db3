//! The catalog and mutation engine: object operations against one bucket.
//!
//! A [`Bucket`] is bound to one backing stream. Every mutation becomes
//! visible the instant its terminal metadata record is appended: a put's
//! commit record, an update's replacement record, a delete's tombstone.
//! Readers resolve the current record once and then fetch chunks by nuid,
//! so a concurrent re-put (which writes under a fresh nuid) can never be
//! observed half-written.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use cask_stream::{EntryKind, StreamInfo, StreamSubstrate};
use cask_types::{Link, Nuid, ObjectInfo, ObjectMeta, StorageClass, TypeError};

use crate::chunks::{self, DEFAULT_CHUNK_SIZE};
use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::links;

/// Current status of a bucket, composed from its backing stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStatus {
    pub bucket: String,
    pub description: Option<String>,
    pub sealed: bool,
    /// Aggregate payload bytes retained on the backing stream.
    pub size: u64,
    pub ttl: Option<Duration>,
    pub storage: StorageClass,
    pub replicas: usize,
    pub placement: Option<String>,
    /// Raw metadata of the backing stream.
    pub stream: StreamInfo,
}

impl BucketStatus {
    fn from_stream(bucket: &str, stream: StreamInfo) -> Self {
        Self {
            bucket: bucket.to_string(),
            description: stream.config.description.clone(),
            sealed: stream.sealed,
            size: stream.bytes,
            ttl: stream.config.max_age,
            storage: stream.config.storage,
            replicas: stream.config.replicas,
            placement: stream.config.placement.clone(),
            stream,
        }
    }
}

/// Handle to one bucket, bound to its backing stream.
pub struct Bucket {
    pub(crate) name: String,
    pub(crate) stream: String,
    pub(crate) substrate: Arc<dyn StreamSubstrate>,
}

impl Bucket {
    pub(crate) fn bind(name: impl Into<String>, substrate: Arc<dyn StreamSubstrate>) -> Self {
        let name = name.into();
        let stream = keys::stream_name(&name);
        Self {
            name,
            stream,
            substrate,
        }
    }

    /// The bucket name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current record for `name`, tombstones included.
    fn lookup(&self, name: &str) -> StoreResult<Option<ObjectInfo>> {
        links::lookup(&*self.substrate, &self.name, name)
    }

    /// Append a metadata record, making it the current entry for its name.
    fn publish(&self, info: &ObjectInfo) -> StoreResult<u64> {
        let payload = serde_json::to_vec(info).map_err(|e| StoreError::Record(e.to_string()))?;
        let seq = self.substrate.append(
            &self.stream,
            &keys::meta_key(info.name()),
            EntryKind::Record,
            payload,
        )?;
        Ok(seq)
    }

    /// Fail fast with `BucketSealed` before writing anything.
    fn ensure_writable(&self) -> StoreResult<()> {
        if self.substrate.stream_info(&self.stream)?.sealed {
            return Err(StoreError::BucketSealed(self.name.clone()));
        }
        Ok(())
    }

    /// Store an object, reading its payload from `source`.
    ///
    /// Overwrites any current record at the name; each put is a new
    /// generation under a fresh nuid, so the previous generation's data
    /// becomes unreachable by name. Metas carrying a link are rejected:
    /// links are created only through [`add_link`](Self::add_link) and
    /// [`add_bucket_link`](Self::add_bucket_link).
    pub fn put<R: Read>(&self, meta: ObjectMeta, source: R) -> StoreResult<ObjectInfo> {
        meta.validate()?;
        keys::ensure_unreserved(&meta.name)?;
        if meta.link.is_some() {
            return Err(StoreError::LinkNotAllowedOnPut(meta.name));
        }
        self.ensure_writable()?;

        let nuid = Nuid::fresh();
        let chunk_size = meta.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        let (size, chunk_count, digest) =
            chunks::write_chunks(&*self.substrate, &self.stream, &nuid, chunk_size, source)?;

        let info = ObjectInfo::compose(&self.name, meta, nuid, size, chunk_count, digest);
        self.publish(&info)?;
        debug!(
            bucket = %self.name,
            object = info.name(),
            nuid = %info.nuid,
            size,
            chunks = chunk_count,
            "object committed"
        );
        Ok(info)
    }

    /// Store `bytes` under `name` with default options.
    pub fn put_bytes(&self, name: &str, bytes: &[u8]) -> StoreResult<ObjectInfo> {
        self.put(ObjectMeta::new(name), bytes)
    }

    /// Store a file's contents; the object is named after the file name.
    pub fn put_file(&self, path: &Path) -> StoreResult<ObjectInfo> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(StoreError::InvalidMeta(TypeError::EmptyObjectName))?;
        let file = std::fs::File::open(path)?;
        self.put(ObjectMeta::new(name), file)
    }

    /// Retrieve an object's payload into `sink`, following one link hop if
    /// the current record is an object link.
    pub fn get<W: Write>(&self, name: &str, sink: &mut W) -> StoreResult<ObjectInfo> {
        let info = links::resolve_for_get(&*self.substrate, &self.name, name)?;
        let stream = keys::stream_name(&info.bucket);
        chunks::read_chunks(&*self.substrate, &stream, &info, sink)?;
        Ok(info)
    }

    /// Retrieve an object's payload as a byte vector.
    pub fn get_bytes(&self, name: &str) -> StoreResult<Vec<u8>> {
        let mut out = Vec::new();
        self.get(name, &mut out)?;
        Ok(out)
    }

    /// Current record for `name`. Tombstones are reported as absent unless
    /// `include_deleted` is set. Link records are returned as-is; target
    /// liveness is never checked here.
    pub fn info(&self, name: &str, include_deleted: bool) -> StoreResult<Option<ObjectInfo>> {
        match self.lookup(name)? {
            Some(info) if info.deleted && !include_deleted => Ok(None),
            other => Ok(other),
        }
    }

    /// Update an object's name, description, and headers in place.
    ///
    /// The payload identity (nuid, size, chunks, digest) and any link are
    /// carried over untouched. Renaming onto a live, non-link object fails;
    /// renaming onto a deleted object's former name succeeds, and the old
    /// name becomes absent.
    pub fn update_meta(&self, name: &str, meta: ObjectMeta) -> StoreResult<ObjectInfo> {
        meta.validate()?;
        keys::ensure_unreserved(&meta.name)?;
        self.ensure_writable()?;

        let current = self
            .lookup(name)?
            .ok_or_else(|| StoreError::ObjectNotFound(name.to_string()))?;
        if current.deleted {
            return Err(StoreError::ObjectIsDeleted(name.to_string()));
        }

        let renaming = meta.name != name;
        if renaming {
            links::ensure_name_reusable(self.lookup(&meta.name)?.as_ref(), &meta.name)?;
        }

        let mut updated = current.clone();
        updated.meta.name = meta.name;
        updated.meta.description = meta.description;
        updated.meta.headers = meta.headers;
        updated.modified = chrono::Utc::now();
        self.publish(&updated)?;

        if renaming {
            // The old name must read as absent, not merely stale.
            self.substrate
                .purge_key(&self.stream, &keys::meta_key(name))?;
        }
        debug!(bucket = %self.name, object = updated.name(), renamed = renaming, "meta updated");
        Ok(updated)
    }

    /// Tombstone an object. Idempotent: deleting a tombstone returns the
    /// current tombstone unchanged. The chunks stay on the stream but are
    /// unreachable through this name.
    pub fn delete(&self, name: &str) -> StoreResult<ObjectInfo> {
        self.ensure_writable()?;
        let current = self
            .lookup(name)?
            .ok_or_else(|| StoreError::ObjectNotFound(name.to_string()))?;
        if current.deleted {
            return Ok(current);
        }
        let tombstone = current.tombstone();
        self.publish(&tombstone)?;
        debug!(bucket = %self.name, object = name, "object deleted");
        Ok(tombstone)
    }

    /// Create a link named `name` pointing at `target`.
    ///
    /// The target must be a live, non-link record; the name must be absent,
    /// deleted, or currently a link. Re-linking over a prior link or
    /// tombstone succeeds idempotently.
    pub fn add_link(&self, name: &str, target: &ObjectInfo) -> StoreResult<ObjectInfo> {
        self.prepare_link_name(name)?;
        links::ensure_link_target(target)?;
        let info = ObjectInfo::link_record(
            &self.name,
            name,
            Link::object(&target.bucket, target.name()),
        );
        self.publish(&info)?;
        debug!(bucket = %self.name, link = name, target = target.name(), "object link added");
        Ok(info)
    }

    /// Create a link named `name` pointing at an entire bucket.
    pub fn add_bucket_link(&self, name: &str, target_bucket: &str) -> StoreResult<ObjectInfo> {
        self.prepare_link_name(name)?;
        let info = ObjectInfo::link_record(&self.name, name, Link::bucket(target_bucket));
        self.publish(&info)?;
        debug!(bucket = %self.name, link = name, target = target_bucket, "bucket link added");
        Ok(info)
    }

    /// Shared validation for both link forms.
    fn prepare_link_name(&self, name: &str) -> StoreResult<()> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidMeta(TypeError::EmptyObjectName));
        }
        keys::ensure_unreserved(name)?;
        self.ensure_writable()?;
        links::ensure_name_reusable(self.lookup(name)?.as_ref(), name)
    }

    /// One record per object name at its most recent state, tombstones
    /// excluded, links included, in the order of each name's latest entry.
    pub fn list(&self) -> StoreResult<Vec<ObjectInfo>> {
        let entries = self
            .substrate
            .latest_per_key(&self.stream, keys::META_PREFIX)?;
        let mut infos = Vec::with_capacity(entries.len());
        for entry in &entries {
            let info = links::decode_info(entry)?;
            if !info.deleted {
                infos.push(info);
            }
        }
        Ok(infos)
    }

    /// Seal the bucket: put, delete, and update_meta fail from now on;
    /// get, list, and watch keep working.
    pub fn seal(&self) -> StoreResult<BucketStatus> {
        let stream = self.substrate.seal_stream(&self.stream)?;
        Ok(BucketStatus::from_stream(&self.name, stream))
    }

    /// Current status of this bucket and its backing stream.
    pub fn status(&self) -> StoreResult<BucketStatus> {
        let stream = self.substrate.stream_info(&self.stream)?;
        Ok(BucketStatus::from_stream(&self.name, stream))
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .field("stream", &self.stream)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ObjectStore;
    use cask_stream::MemoryStreams;
    use cask_types::{BucketConfig, Headers};
    use std::io::Write as _;

    fn store() -> ObjectStore {
        ObjectStore::new(Arc::new(MemoryStreams::new()))
    }

    fn bucket(store: &ObjectStore, name: &str) -> Bucket {
        store.create_bucket(BucketConfig::new(name)).unwrap()
    }

    // -----------------------------------------------------------------------
    // Put / get
    // -----------------------------------------------------------------------

    #[test]
    fn put_then_get_roundtrip() {
        let store = store();
        let os = bucket(&store, "b");

        let meta = ObjectMeta::new("obj")
            .description("desc")
            .headers(Headers::new().put("k1", "v1").add("k2", "a").add("k2", "b"))
            .chunk_size(4096);
        let data = vec![42u8; 4096 * 10];
        let put_info = os.put(meta, data.as_slice()).unwrap();
        assert_eq!(put_info.size, 40960);
        assert_eq!(put_info.chunks, 10);
        assert_eq!(put_info.bucket, "b");
        assert_eq!(put_info.meta.headers.len(), 2);

        let mut out = Vec::new();
        let get_info = os.get("obj", &mut out).unwrap();
        assert_eq!(out, data);
        assert_eq!(get_info, put_info);
    }

    #[test]
    fn get_missing_object() {
        let store = store();
        let os = bucket(&store, "b");
        let err = os.get_bytes("nope").unwrap_err();
        assert!(matches!(err, StoreError::ObjectNotFound(_)));
    }

    #[test]
    fn reput_same_name_gets_fresh_nuid() {
        let store = store();
        let os = bucket(&store, "b");

        let first = os.put_bytes("obj", b"generation one").unwrap();
        let second = os.put_bytes("obj", b"gen2").unwrap();
        assert_ne!(first.nuid, second.nuid);

        // The previous generation is unreachable by name.
        assert_eq!(os.get_bytes("obj").unwrap(), b"gen2");
        assert_eq!(os.info("obj", false).unwrap().unwrap().nuid, second.nuid);
    }

    #[test]
    fn put_rejects_embedded_link() {
        let store = store();
        let os = bucket(&store, "b");
        let mut meta = ObjectMeta::new("obj");
        meta.link = Some(Link::object("na", "na"));
        let err = os.put(meta, b"data".as_slice()).unwrap_err();
        assert!(matches!(err, StoreError::LinkNotAllowedOnPut(_)));
    }

    #[test]
    fn put_rejects_reserved_and_empty_names() {
        let store = store();
        let os = bucket(&store, "b");
        assert!(matches!(
            os.put_bytes("$O.M.x", b"d").unwrap_err(),
            StoreError::ReservedObjectName(_)
        ));
        assert!(matches!(
            os.put_bytes("", b"d").unwrap_err(),
            StoreError::InvalidMeta(TypeError::EmptyObjectName)
        ));
    }

    #[test]
    fn zero_byte_object() {
        let store = store();
        let os = bucket(&store, "b");
        let info = os.put_bytes("empty", b"").unwrap();
        assert_eq!(info.size, 0);
        assert_eq!(info.chunks, 0);
        assert_eq!(os.get_bytes("empty").unwrap(), b"");
    }

    #[test]
    fn put_file_uses_file_name() {
        let store = store();
        let os = bucket(&store, "b");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"file contents").unwrap();
        drop(f);

        let info = os.put_file(&path).unwrap();
        assert_eq!(info.name(), "payload.bin");
        assert_eq!(os.get_bytes("payload.bin").unwrap(), b"file contents");
    }

    // -----------------------------------------------------------------------
    // Info
    // -----------------------------------------------------------------------

    #[test]
    fn info_hides_tombstones_unless_asked() {
        let store = store();
        let os = bucket(&store, "b");
        os.put_bytes("obj", b"data").unwrap();
        os.delete("obj").unwrap();

        assert!(os.info("obj", false).unwrap().is_none());
        let ts = os.info("obj", true).unwrap().unwrap();
        assert!(ts.deleted);
    }

    // -----------------------------------------------------------------------
    // Update meta
    // -----------------------------------------------------------------------

    #[test]
    fn update_meta_replaces_name_desc_headers() {
        let store = store();
        let os = bucket(&store, "b");
        let original = os
            .put(
                ObjectMeta::new("obj").description("old").chunk_size(5),
                b"0123456789".as_slice(),
            )
            .unwrap();

        let updated = os
            .update_meta(
                "obj",
                ObjectMeta::new("obj-b")
                    .description("new")
                    .headers(Headers::new().put("nk", "nv")),
            )
            .unwrap();

        assert_eq!(updated.name(), "obj-b");
        assert_eq!(updated.meta.description.as_deref(), Some("new"));
        assert_eq!(updated.meta.headers.first("nk"), Some("nv"));
        // Payload identity carried over, chunk size included.
        assert_eq!(updated.nuid, original.nuid);
        assert_eq!(updated.size, original.size);
        assert_eq!(updated.digest, original.digest);
        assert_eq!(updated.meta.chunk_size, Some(5));

        // The old name is gone entirely; the new one serves the bytes.
        assert!(matches!(
            os.get_bytes("obj").unwrap_err(),
            StoreError::ObjectNotFound(_)
        ));
        assert_eq!(os.get_bytes("obj-b").unwrap(), b"0123456789");
    }

    #[test]
    fn update_meta_missing_and_deleted() {
        let store = store();
        let os = bucket(&store, "b");
        assert!(matches!(
            os.update_meta("ghost", ObjectMeta::new("ghost")).unwrap_err(),
            StoreError::ObjectNotFound(_)
        ));

        os.put_bytes("obj", b"d").unwrap();
        os.delete("obj").unwrap();
        assert!(matches!(
            os.update_meta("obj", ObjectMeta::new("other")).unwrap_err(),
            StoreError::ObjectIsDeleted(_)
        ));
    }

    #[test]
    fn update_meta_rename_collision_rules() {
        let store = store();
        let os = bucket(&store, "b");
        os.put_bytes("one", b"1").unwrap();
        os.put_bytes("two", b"2").unwrap();

        // Renaming onto a live object fails.
        assert!(matches!(
            os.update_meta("one", ObjectMeta::new("two")).unwrap_err(),
            StoreError::ObjectAlreadyExists(_)
        ));

        // Renaming onto a deleted object's former name succeeds.
        os.delete("two").unwrap();
        let renamed = os.update_meta("one", ObjectMeta::new("two")).unwrap();
        assert_eq!(renamed.name(), "two");
        assert_eq!(os.get_bytes("two").unwrap(), b"1");
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_is_idempotent() {
        let store = store();
        let os = bucket(&store, "b");
        os.put_bytes("obj", b"data").unwrap();

        let first = os.delete("obj").unwrap();
        assert!(first.deleted);
        assert_eq!(first.size, 0);
        assert_eq!(first.chunks, 0);
        assert!(first.digest.is_none());

        let second = os.delete("obj").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn delete_missing_object() {
        let store = store();
        let os = bucket(&store, "b");
        assert!(matches!(
            os.delete("ghost").unwrap_err(),
            StoreError::ObjectNotFound(_)
        ));
    }

    #[test]
    fn delete_then_recreate_name() {
        let store = store();
        let os = bucket(&store, "b");
        let first = os.put_bytes("obj", b"old").unwrap();
        os.delete("obj").unwrap();

        let second = os.put_bytes("obj", b"new").unwrap();
        assert_ne!(first.nuid, second.nuid);
        assert_eq!(os.get_bytes("obj").unwrap(), b"new");
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    #[test]
    fn object_link_serves_target_bytes() {
        let store = store();
        let os = bucket(&store, "b");
        let target = os.put_bytes("obj", b"the payload").unwrap();

        let link = os.add_link("ln", &target).unwrap();
        assert!(link.is_link());
        assert_eq!(link.size, 0);
        assert!(link.digest.is_none());

        let mut out = Vec::new();
        let resolved = os.get("ln", &mut out).unwrap();
        assert_eq!(out, b"the payload");
        // A get through a link reports the target, not the link.
        assert_eq!(resolved, target);
    }

    #[test]
    fn cross_bucket_link_serves_target_bytes() {
        let store = store();
        let src = bucket(&store, "src");
        let dst = bucket(&store, "dst");
        let target = src.put_bytes("obj", b"over there").unwrap();

        dst.add_link("ln", &target).unwrap();
        assert_eq!(dst.get_bytes("ln").unwrap(), b"over there");
    }

    #[test]
    fn bucket_link_info_works_get_fails() {
        let store = store();
        let os = bucket(&store, "b");
        os.add_bucket_link("bl", "elsewhere").unwrap();

        let info = os.info("bl", false).unwrap().unwrap();
        assert!(info.link().unwrap().is_bucket_link());
        assert_eq!(info.link().unwrap().bucket_name(), "elsewhere");

        assert!(matches!(
            os.get_bytes("bl").unwrap_err(),
            StoreError::CantGetBucketLink(_)
        ));
    }

    #[test]
    fn link_target_must_be_live_non_link() {
        let store = store();
        let os = bucket(&store, "b");
        let target = os.put_bytes("obj", b"data").unwrap();
        let link = os.add_link("ln", &target).unwrap();

        assert!(matches!(
            os.add_link("ln2", &link).unwrap_err(),
            StoreError::CantLinkToLink(_)
        ));

        let tombstone = os.delete("obj").unwrap();
        assert!(matches!(
            os.add_link("ln3", &tombstone).unwrap_err(),
            StoreError::ObjectIsDeleted(_)
        ));
    }

    #[test]
    fn link_name_reuse_rules() {
        let store = store();
        let os = bucket(&store, "b");
        let target = os.put_bytes("obj", b"data").unwrap();
        os.put_bytes("live", b"x").unwrap();

        // A live non-link name cannot be taken over by a link.
        assert!(matches!(
            os.add_link("live", &target).unwrap_err(),
            StoreError::ObjectAlreadyExists(_)
        ));
        assert!(matches!(
            os.add_bucket_link("live", "other").unwrap_err(),
            StoreError::ObjectAlreadyExists(_)
        ));

        // Over a tombstone or an existing link, linking succeeds.
        os.delete("live").unwrap();
        os.add_link("live", &target).unwrap();
        os.add_bucket_link("live", "other").unwrap();
        assert!(os.info("live", false).unwrap().unwrap().link().unwrap().is_bucket_link());
    }

    #[test]
    fn get_link_with_deleted_target() {
        let store = store();
        let os = bucket(&store, "b");
        let target = os.put_bytes("obj", b"data").unwrap();
        os.add_link("ln", &target).unwrap();
        os.delete("obj").unwrap();

        assert!(matches!(
            os.get_bytes("ln").unwrap_err(),
            StoreError::ObjectIsDeleted(_)
        ));
        // Inspection never requires the target to be alive.
        assert!(os.info("ln", false).unwrap().unwrap().is_link());
    }

    #[test]
    fn deleted_link_reads_as_absent() {
        let store = store();
        let os = bucket(&store, "b");
        let target = os.put_bytes("obj", b"data").unwrap();
        os.add_link("ln", &target).unwrap();
        os.delete("ln").unwrap();

        assert!(matches!(
            os.get_bytes("ln").unwrap_err(),
            StoreError::ObjectNotFound(_)
        ));
        // The target is untouched.
        assert_eq!(os.get_bytes("obj").unwrap(), b"data");
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    #[test]
    fn list_reports_latest_state_without_tombstones() {
        let store = store();
        let os = bucket(&store, "b");
        os.put_bytes("k1", b"11").unwrap();
        os.put_bytes("k2", b"21").unwrap();
        os.put_bytes("k3", b"31").unwrap();
        let info = os.put_bytes("k2", b"22").unwrap();
        os.add_link("k4", &info).unwrap();
        os.put_bytes("k9", b"91").unwrap();
        os.delete("k9").unwrap();

        let list = os.list().unwrap();
        assert_eq!(list.len(), 4);
        let names: Vec<&str> = list.iter().map(|i| i.name()).collect();
        for expected in ["k1", "k2", "k3", "k4"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        let k2 = list.iter().find(|i| i.name() == "k2").unwrap();
        assert_eq!(k2.nuid, info.nuid);
    }

    #[test]
    fn list_empty_bucket() {
        let store = store();
        let os = bucket(&store, "b");
        assert!(os.list().unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Seal / status
    // -----------------------------------------------------------------------

    #[test]
    fn seal_rejects_mutations_allows_reads() {
        let store = store();
        let os = bucket(&store, "b");
        os.put_bytes("obj", b"data").unwrap();

        let status = os.seal().unwrap();
        assert!(status.sealed);

        assert!(matches!(
            os.put_bytes("other", b"d").unwrap_err(),
            StoreError::BucketSealed(_)
        ));
        assert!(matches!(
            os.delete("obj").unwrap_err(),
            StoreError::BucketSealed(_)
        ));
        assert!(matches!(
            os.update_meta("obj", ObjectMeta::new("renamed")).unwrap_err(),
            StoreError::BucketSealed(_)
        ));
        let target = os.info("obj", false).unwrap().unwrap();
        assert!(matches!(
            os.add_link("ln", &target).unwrap_err(),
            StoreError::BucketSealed(_)
        ));

        // Reads still work.
        assert_eq!(os.get_bytes("obj").unwrap(), b"data");
        assert_eq!(os.list().unwrap().len(), 1);
    }

    #[test]
    fn status_reports_config_and_size() {
        let store = store();
        let config = BucketConfig::new("b")
            .description("plain")
            .ttl(Duration::from_secs(24 * 3600))
            .storage(StorageClass::Memory);
        let os = store.create_bucket(config).unwrap();

        let status = os.status().unwrap();
        assert_eq!(status.bucket, "b");
        assert_eq!(status.description.as_deref(), Some("plain"));
        assert!(!status.sealed);
        assert_eq!(status.size, 0);
        assert_eq!(status.ttl, Some(Duration::from_secs(24 * 3600)));
        assert_eq!(status.storage, StorageClass::Memory);
        assert_eq!(status.replicas, 1);
        assert!(status.placement.is_none());

        os.put_bytes("obj", b"12345").unwrap();
        assert!(os.status().unwrap().size >= 5);
    }
}
