use serde::{Deserialize, Serialize};

/// Discriminator for the two kinds of entry stored on a bucket's stream.
///
/// Chunk payloads and metadata records share one log; consumers switch on
/// this tag rather than inspecting payload shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// One size-bounded slice of an object generation's payload.
    Chunk,
    /// A serialized metadata record (commit, tombstone, or link).
    Record,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chunk => write!(f, "chunk"),
            Self::Record => write!(f, "record"),
        }
    }
}

/// One sequenced entry on a stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamEntry {
    /// Sequence number assigned at append time; strictly increasing.
    pub seq: u64,
    /// Associated key, used for latest-per-key queries and subscriptions.
    pub key: String,
    /// Kind discriminator.
    pub kind: EntryKind,
    /// Raw chunk bytes or serialized metadata.
    pub payload: Vec<u8>,
}
