//! Replay-then-live observation of a bucket's catalog.
//!
//! A watcher first replays the relevant existing metadata records, then
//! emits exactly one end-of-data marker, then delivers every subsequent
//! mutation in commit order. The substrate captures the replay snapshot
//! and the live registration atomically, so no mutation is ever missed or
//! delivered twice across the transition.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::warn;

use cask_stream::{EntryKind, StreamSubstrate, SubscribeStart};
use cask_types::ObjectInfo;

use crate::bucket::Bucket;
use crate::error::StoreResult;
use crate::keys;
use crate::links;

/// Options controlling what a watcher replays and delivers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchOptions {
    /// Suppress tombstone records in both replay and live delivery.
    pub ignore_deletes: bool,
    /// Replay every retained record instead of the latest per object.
    pub include_history: bool,
}

impl WatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_deletes(mut self) -> Self {
        self.ignore_deletes = true;
        self
    }

    pub fn include_history(mut self) -> Self {
        self.include_history = true;
        self
    }
}

/// One delivery from a [`Watcher`].
#[derive(Clone, Debug, PartialEq)]
pub enum WatchEvent {
    /// A metadata record: a commit, an update, a link, or a tombstone.
    Info(ObjectInfo),
    /// Replay is complete; everything after this was appended live.
    EndOfData,
}

impl WatchEvent {
    /// The carried record, if this is not the end-of-data marker.
    pub fn info(&self) -> Option<&ObjectInfo> {
        match self {
            Self::Info(info) => Some(info),
            Self::EndOfData => None,
        }
    }
}

/// Pull-style consumer of a bucket's metadata feed.
///
/// Dropping the watcher releases its subscription.
pub struct Watcher {
    substrate: Arc<dyn StreamSubstrate>,
    stream: String,
    sub_id: u64,
    replay: VecDeque<WatchEvent>,
    live: tokio::sync::mpsc::UnboundedReceiver<cask_stream::StreamEntry>,
    ignore_deletes: bool,
    stopped: bool,
}

impl Watcher {
    pub(crate) fn open(
        substrate: Arc<dyn StreamSubstrate>,
        stream: &str,
        options: WatchOptions,
    ) -> StoreResult<Self> {
        let start = if options.include_history {
            SubscribeStart::Beginning
        } else {
            SubscribeStart::LatestPerKey
        };
        let sub = substrate.subscribe(stream, start, keys::META_PREFIX)?;

        let mut replay = VecDeque::with_capacity(sub.snapshot.len() + 1);
        for entry in &sub.snapshot {
            if entry.kind != EntryKind::Record {
                continue;
            }
            let info = links::decode_info(entry)?;
            if info.deleted && options.ignore_deletes {
                continue;
            }
            replay.push_back(WatchEvent::Info(info));
        }
        replay.push_back(WatchEvent::EndOfData);

        Ok(Self {
            substrate,
            stream: stream.to_string(),
            sub_id: sub.id,
            replay,
            live: sub.live,
            ignore_deletes: options.ignore_deletes,
            stopped: false,
        })
    }

    fn admit(&self, entry: &cask_stream::StreamEntry) -> Option<WatchEvent> {
        if entry.kind != EntryKind::Record {
            return None;
        }
        match links::decode_info(entry) {
            Ok(info) if info.deleted && self.ignore_deletes => None,
            Ok(info) => Some(WatchEvent::Info(info)),
            Err(err) => {
                warn!(stream = %self.stream, seq = entry.seq, %err, "skipping undecodable record");
                None
            }
        }
    }

    /// Next event, blocking until one arrives. Returns `None` once the
    /// watcher is stopped or its bucket's stream is gone.
    pub fn next(&mut self) -> Option<WatchEvent> {
        if let Some(event) = self.replay.pop_front() {
            return Some(event);
        }
        if self.stopped {
            return None;
        }
        loop {
            let entry = self.live.blocking_recv()?;
            if let Some(event) = self.admit(&entry) {
                return Some(event);
            }
        }
    }

    /// Next event if one is already available, without blocking.
    pub fn try_next(&mut self) -> Option<WatchEvent> {
        if let Some(event) = self.replay.pop_front() {
            return Some(event);
        }
        if self.stopped {
            return None;
        }
        loop {
            match self.live.try_recv() {
                Ok(entry) => {
                    if let Some(event) = self.admit(&entry) {
                        return Some(event);
                    }
                }
                Err(_) => return None,
            }
        }
    }

    /// Release the subscription. Replayed events still queued remain
    /// consumable; nothing new is delivered.
    pub fn stop(&mut self) -> StoreResult<()> {
        if !self.stopped {
            self.stopped = true;
            self.live.close();
            self.substrate.unsubscribe(&self.stream, self.sub_id)?;
        }
        Ok(())
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

impl std::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watcher")
            .field("stream", &self.stream)
            .field("sub_id", &self.sub_id)
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl Bucket {
    /// Observe this bucket's catalog: replay per [`WatchOptions`], one
    /// [`WatchEvent::EndOfData`], then live mutations in commit order.
    pub fn watch(&self, options: WatchOptions) -> StoreResult<Watcher> {
        Watcher::open(self.substrate.clone(), &self.stream, options)
    }
}
