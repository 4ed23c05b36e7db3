//! Ordered message-stream substrate contract for the Cask object store.
//!
//! The object-store core is built on top of a much simpler primitive: a
//! named, ordered, persisted log of keyed entries. This crate defines that
//! contract ([`StreamSubstrate`]) and ships an in-memory implementation
//! ([`MemoryStreams`]) for tests and embedding.
//!
//! # Contract
//!
//! - One stream per bucket; entries are appended in a total order and carry
//!   a key plus a kind tag (chunk payload vs. metadata record).
//! - "Latest per key" queries give the catalog its current-state view.
//! - Filtered ordered subscriptions capture a deterministic snapshot and a
//!   live feed atomically, so a consumer can replay history and then follow
//!   new appends without a gap or a duplicate in between.
//!
//! Transient substrate failures propagate unchanged to callers; retry policy
//! belongs to the substrate or the caller, never to the object-store core.

pub mod config;
pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::{StreamConfig, StreamInfo};
pub use entry::{EntryKind, StreamEntry};
pub use error::{StreamError, StreamResult};
pub use memory::MemoryStreams;
pub use traits::{StreamSubstrate, SubscribeStart, Subscription};
