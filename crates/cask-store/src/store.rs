//! Bucket lifecycle over the stream substrate.

use std::sync::Arc;

use tracing::info;

use cask_stream::{StreamConfig, StreamSubstrate};
use cask_types::BucketConfig;

use crate::bucket::{Bucket, BucketStatus};
use crate::error::StoreResult;
use crate::keys;

/// Entry point: creates, opens, and destroys buckets on one substrate.
pub struct ObjectStore {
    substrate: Arc<dyn StreamSubstrate>,
}

impl ObjectStore {
    pub fn new(substrate: Arc<dyn StreamSubstrate>) -> Self {
        Self { substrate }
    }

    /// Create a bucket and its backing stream.
    pub fn create_bucket(&self, config: BucketConfig) -> StoreResult<Bucket> {
        config.validate()?;
        let stream = StreamConfig {
            name: keys::stream_name(&config.name),
            description: config.description.clone(),
            max_age: config.ttl,
            storage: config.storage,
            replicas: config.replicas,
            placement: config.placement.clone(),
        };
        self.substrate.create_stream(stream)?;
        info!(bucket = %config.name, storage = %config.storage, "bucket created");
        Ok(Bucket::bind(config.name, self.substrate.clone()))
    }

    /// Open an existing bucket. Fails if its backing stream is absent.
    pub fn bucket(&self, name: &str) -> StoreResult<Bucket> {
        let bucket = Bucket::bind(name, self.substrate.clone());
        bucket.status()?;
        Ok(bucket)
    }

    /// Status of a bucket without keeping a handle.
    pub fn bucket_status(&self, name: &str) -> StoreResult<BucketStatus> {
        Bucket::bind(name, self.substrate.clone()).status()
    }

    /// Destroy a bucket, its catalog, and all its data. Returns `false`
    /// if no such bucket existed.
    pub fn delete_bucket(&self, name: &str) -> StoreResult<bool> {
        let existed = self.substrate.delete_stream(&keys::stream_name(name))?;
        if existed {
            info!(bucket = name, "bucket deleted");
        }
        Ok(existed)
    }

    /// Names of all buckets on the substrate, sorted.
    ///
    /// Streams without the store's naming prefix are not buckets and are
    /// never reported.
    pub fn bucket_names(&self) -> StoreResult<Vec<String>> {
        let streams = self.substrate.list_streams(keys::STREAM_PREFIX)?;
        Ok(streams
            .iter()
            .filter_map(|s| keys::bucket_of(s))
            .map(str::to_string)
            .collect())
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use cask_stream::{EntryKind, MemoryStreams};

    fn store() -> (Arc<MemoryStreams>, ObjectStore) {
        let substrate = Arc::new(MemoryStreams::new());
        (substrate.clone(), ObjectStore::new(substrate))
    }

    #[test]
    fn create_then_open() {
        let (_, store) = store();
        store.create_bucket(BucketConfig::new("b")).unwrap();

        let bucket = store.bucket("b").unwrap();
        assert_eq!(bucket.name(), "b");
    }

    #[test]
    fn create_duplicate_bucket() {
        let (_, store) = store();
        store.create_bucket(BucketConfig::new("b")).unwrap();
        assert!(matches!(
            store.create_bucket(BucketConfig::new("b")).unwrap_err(),
            StoreError::BucketAlreadyExists(ref name) if name == "b"
        ));
    }

    #[test]
    fn open_missing_bucket() {
        let (_, store) = store();
        assert!(matches!(
            store.bucket("ghost").unwrap_err(),
            StoreError::BucketNotFound(ref name) if name == "ghost"
        ));
    }

    #[test]
    fn invalid_bucket_name() {
        let (_, store) = store();
        assert!(matches!(
            store.create_bucket(BucketConfig::new("  ")).unwrap_err(),
            StoreError::InvalidMeta(_)
        ));
    }

    #[test]
    fn delete_bucket_removes_everything() {
        let (_, store) = store();
        let bucket = store.create_bucket(BucketConfig::new("b")).unwrap();
        bucket.put_bytes("obj", b"data").unwrap();

        assert!(store.delete_bucket("b").unwrap());
        assert!(store.bucket("b").is_err());
        assert!(!store.delete_bucket("b").unwrap());
    }

    #[test]
    fn bucket_names_are_sorted_and_filtered() {
        let (substrate, store) = store();
        store.create_bucket(BucketConfig::new("zebra")).unwrap();
        store.create_bucket(BucketConfig::new("alpha")).unwrap();

        // A foreign stream on the same substrate is not a bucket.
        substrate
            .create_stream(cask_stream::StreamConfig::new("EVENTS_audit"))
            .unwrap();
        substrate
            .append("EVENTS_audit", "k", EntryKind::Record, vec![])
            .unwrap();

        assert_eq!(store.bucket_names().unwrap(), ["alpha", "zebra"]);
    }

    #[test]
    fn status_via_store() {
        let (_, store) = store();
        store
            .create_bucket(BucketConfig::new("b").description("about b"))
            .unwrap();
        let status = store.bucket_status("b").unwrap();
        assert_eq!(status.bucket, "b");
        assert_eq!(status.description.as_deref(), Some("about b"));
    }
}
