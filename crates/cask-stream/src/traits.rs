use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::{StreamConfig, StreamInfo};
use crate::entry::{EntryKind, StreamEntry};
use crate::error::StreamResult;

/// Starting point for an ordered subscription's snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscribeStart {
    /// Snapshot holds the latest entry per distinct key, in sequence order.
    LatestPerKey,
    /// Snapshot holds every retained entry from the beginning.
    Beginning,
    /// No snapshot; deliver new appends only.
    New,
}

/// An ordered subscription: a deterministic snapshot plus a live feed.
///
/// The snapshot and the live registration are captured atomically by the
/// substrate, so every entry appended after the snapshot's last sequence is
/// delivered on `live` exactly once. The live channel is unbounded; the
/// substrate never drops an event for a registered subscriber.
pub struct Subscription {
    /// Identifier for [`StreamSubstrate::unsubscribe`].
    pub id: u64,
    /// Entries captured at subscription time, ascending by sequence.
    pub snapshot: Vec<StreamEntry>,
    /// Push delivery of entries appended after the snapshot.
    pub live: UnboundedReceiver<StreamEntry>,
}

/// Contract over the message-stream substrate consumed by the object store.
///
/// One stream backs one bucket. Entries carry a key and a kind tag; the
/// substrate itself never interprets payloads. All operations are
/// synchronous from the caller's point of view; transient failures of a
/// networked implementation propagate unchanged.
pub trait StreamSubstrate: Send + Sync {
    /// Create a new stream. Fails if a stream with this name exists.
    fn create_stream(&self, config: StreamConfig) -> StreamResult<StreamInfo>;

    /// Report metadata for a stream.
    fn stream_info(&self, stream: &str) -> StreamResult<StreamInfo>;

    /// Destroy a stream and all its entries. Returns `true` if it existed.
    fn delete_stream(&self, stream: &str) -> StreamResult<bool>;

    /// Seal a stream: all further appends fail, reads keep working.
    fn seal_stream(&self, stream: &str) -> StreamResult<StreamInfo>;

    /// Names of all streams starting with `prefix`, sorted.
    fn list_streams(&self, prefix: &str) -> StreamResult<Vec<String>>;

    /// Append an entry, returning its assigned sequence number.
    fn append(
        &self,
        stream: &str,
        key: &str,
        kind: EntryKind,
        payload: Vec<u8>,
    ) -> StreamResult<u64>;

    /// The most recent entry for an exact key, if any.
    fn last_for_key(&self, stream: &str, key: &str) -> StreamResult<Option<StreamEntry>>;

    /// All retained entries for an exact key, ascending by sequence.
    fn entries_for_key(&self, stream: &str, key: &str) -> StreamResult<Vec<StreamEntry>>;

    /// The latest entry per distinct key matching `key_prefix`, ascending by
    /// the sequence of each key's latest entry.
    fn latest_per_key(&self, stream: &str, key_prefix: &str) -> StreamResult<Vec<StreamEntry>>;

    /// Remove all retained entries for an exact key. Sequence numbering is
    /// unaffected and no subscription sees the removal. Returns the number
    /// of entries removed.
    fn purge_key(&self, stream: &str, key: &str) -> StreamResult<u64>;

    /// Open an ordered subscription filtered to keys matching `key_prefix`.
    fn subscribe(
        &self,
        stream: &str,
        start: SubscribeStart,
        key_prefix: &str,
    ) -> StreamResult<Subscription>;

    /// Release a subscription synchronously. Unknown ids are a no-op.
    fn unsubscribe(&self, stream: &str, id: u64) -> StreamResult<()>;
}
