//! In-memory stream substrate for tests and embedding.
//!
//! [`MemoryStreams`] keeps every stream as an ordered `Vec` of entries
//! behind one `RwLock`, with per-subscriber unbounded channels for push
//! delivery. Snapshot capture and live registration happen under the same
//! write lock, which makes the replay-then-live handoff deterministic.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use crate::config::{StreamConfig, StreamInfo};
use crate::entry::{EntryKind, StreamEntry};
use crate::error::{StreamError, StreamResult};
use crate::traits::{StreamSubstrate, SubscribeStart, Subscription};

/// A registered live subscriber: a key-prefix filter paired with a sender.
struct Subscriber {
    id: u64,
    key_prefix: String,
    sender: UnboundedSender<StreamEntry>,
}

/// State of one stream.
struct StreamState {
    config: StreamConfig,
    created: DateTime<Utc>,
    sealed: bool,
    entries: Vec<StreamEntry>,
    next_seq: u64,
    subscribers: Vec<Subscriber>,
    next_sub_id: u64,
}

impl StreamState {
    fn new(config: StreamConfig) -> Self {
        Self {
            config,
            created: Utc::now(),
            sealed: false,
            entries: Vec::new(),
            next_seq: 1,
            subscribers: Vec::new(),
            next_sub_id: 1,
        }
    }

    fn info(&self) -> StreamInfo {
        StreamInfo {
            config: self.config.clone(),
            created: self.created,
            sealed: self.sealed,
            entries: self.entries.len() as u64,
            bytes: self.entries.iter().map(|e| e.payload.len() as u64).sum(),
            first_seq: self.entries.first().map_or(0, |e| e.seq),
            last_seq: self.entries.last().map_or(0, |e| e.seq),
        }
    }

    /// Latest entry per distinct key matching `key_prefix`, ascending by the
    /// sequence of each key's latest entry.
    fn latest_per_key(&self, key_prefix: &str) -> Vec<StreamEntry> {
        let mut latest: HashMap<&str, &StreamEntry> = HashMap::new();
        for entry in &self.entries {
            if entry.key.starts_with(key_prefix) {
                latest.insert(&entry.key, entry);
            }
        }
        let mut snapshot: Vec<StreamEntry> = latest.into_values().cloned().collect();
        snapshot.sort_by_key(|e| e.seq);
        snapshot
    }

    /// Route a freshly appended entry to matching subscribers.
    /// Subscribers whose channels are closed are pruned.
    fn route(&mut self, entry: &StreamEntry) {
        self.subscribers.retain(|sub| {
            if entry.key.starts_with(&sub.key_prefix) {
                sub.sender.send(entry.clone()).is_ok()
            } else {
                !sub.sender.is_closed()
            }
        });
    }
}

/// In-memory, `HashMap`-based stream substrate.
///
/// Stands in for an external backing cluster at the [`StreamSubstrate`]
/// boundary. Data is lost when the value is dropped.
pub struct MemoryStreams {
    streams: RwLock<HashMap<String, StreamState>>,
}

impl MemoryStreams {
    /// Create an empty substrate.
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStreams {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.streams.read().expect("lock poisoned").len();
        f.debug_struct("MemoryStreams")
            .field("stream_count", &count)
            .finish()
    }
}

impl StreamSubstrate for MemoryStreams {
    fn create_stream(&self, config: StreamConfig) -> StreamResult<StreamInfo> {
        let mut streams = self.streams.write().expect("lock poisoned");
        if streams.contains_key(&config.name) {
            return Err(StreamError::AlreadyExists(config.name));
        }
        let name = config.name.clone();
        let state = StreamState::new(config);
        let stream_info = state.info();
        streams.insert(name.clone(), state);
        info!(stream = %name, "stream created");
        Ok(stream_info)
    }

    fn stream_info(&self, stream: &str) -> StreamResult<StreamInfo> {
        let streams = self.streams.read().expect("lock poisoned");
        streams
            .get(stream)
            .map(StreamState::info)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))
    }

    fn delete_stream(&self, stream: &str) -> StreamResult<bool> {
        let mut streams = self.streams.write().expect("lock poisoned");
        let existed = streams.remove(stream).is_some();
        if existed {
            info!(stream, "stream deleted");
        }
        Ok(existed)
    }

    fn seal_stream(&self, stream: &str) -> StreamResult<StreamInfo> {
        let mut streams = self.streams.write().expect("lock poisoned");
        let state = streams
            .get_mut(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;
        state.sealed = true;
        info!(stream, "stream sealed");
        Ok(state.info())
    }

    fn list_streams(&self, prefix: &str) -> StreamResult<Vec<String>> {
        let streams = self.streams.read().expect("lock poisoned");
        let mut names: Vec<String> = streams
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    fn append(
        &self,
        stream: &str,
        key: &str,
        kind: EntryKind,
        payload: Vec<u8>,
    ) -> StreamResult<u64> {
        let mut streams = self.streams.write().expect("lock poisoned");
        let state = streams
            .get_mut(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;
        if state.sealed {
            return Err(StreamError::Sealed(stream.to_string()));
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        let entry = StreamEntry {
            seq,
            key: key.to_string(),
            kind,
            payload,
        };
        state.route(&entry);
        state.entries.push(entry);
        debug!(stream, key, seq, %kind, "entry appended");
        Ok(seq)
    }

    fn last_for_key(&self, stream: &str, key: &str) -> StreamResult<Option<StreamEntry>> {
        let streams = self.streams.read().expect("lock poisoned");
        let state = streams
            .get(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;
        Ok(state.entries.iter().rev().find(|e| e.key == key).cloned())
    }

    fn entries_for_key(&self, stream: &str, key: &str) -> StreamResult<Vec<StreamEntry>> {
        let streams = self.streams.read().expect("lock poisoned");
        let state = streams
            .get(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.key == key)
            .cloned()
            .collect())
    }

    fn latest_per_key(&self, stream: &str, key_prefix: &str) -> StreamResult<Vec<StreamEntry>> {
        let streams = self.streams.read().expect("lock poisoned");
        let state = streams
            .get(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;
        Ok(state.latest_per_key(key_prefix))
    }

    fn purge_key(&self, stream: &str, key: &str) -> StreamResult<u64> {
        let mut streams = self.streams.write().expect("lock poisoned");
        let state = streams
            .get_mut(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;
        let before = state.entries.len();
        state.entries.retain(|e| e.key != key);
        let purged = (before - state.entries.len()) as u64;
        debug!(stream, key, purged, "key purged");
        Ok(purged)
    }

    fn subscribe(
        &self,
        stream: &str,
        start: SubscribeStart,
        key_prefix: &str,
    ) -> StreamResult<Subscription> {
        let mut streams = self.streams.write().expect("lock poisoned");
        let state = streams
            .get_mut(stream)
            .ok_or_else(|| StreamError::NotFound(stream.to_string()))?;

        // Snapshot and live registration happen under the same write lock:
        // entries appended after this point are only ever seen live.
        let snapshot = match start {
            SubscribeStart::LatestPerKey => state.latest_per_key(key_prefix),
            SubscribeStart::Beginning => state
                .entries
                .iter()
                .filter(|e| e.key.starts_with(key_prefix))
                .cloned()
                .collect(),
            SubscribeStart::New => Vec::new(),
        };

        let id = state.next_sub_id;
        state.next_sub_id += 1;
        let (tx, rx) = mpsc::unbounded_channel();
        state.subscribers.push(Subscriber {
            id,
            key_prefix: key_prefix.to_string(),
            sender: tx,
        });
        debug!(stream, id, ?start, snapshot_len = snapshot.len(), "subscribed");

        Ok(Subscription {
            id,
            snapshot,
            live: rx,
        })
    }

    fn unsubscribe(&self, stream: &str, id: u64) -> StreamResult<()> {
        let mut streams = self.streams.write().expect("lock poisoned");
        if let Some(state) = streams.get_mut(stream) {
            state.subscribers.retain(|sub| sub.id != id);
        }
        Ok(())
    }
}
