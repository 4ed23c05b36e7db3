//! Object (blob) storage layer built on an ordered message-stream substrate.
//!
//! Cask stores named, arbitrarily large byte payloads in durable buckets,
//! with metadata, soft-delete semantics, cross-object and cross-bucket
//! links, and a deterministic replay-then-live change feed. Each bucket is
//! backed by one ordered stream ([`cask_stream::StreamSubstrate`]); the
//! store layers object identity, integrity, and change-feed semantics on
//! top of that log primitive.
//!
//! # Layout
//!
//! - [`store`] — bucket management: create, bind, status, enumerate, delete
//! - [`bucket`] — the catalog and mutation engine: put, get, update, delete,
//!   list, seal
//! - [`chunks`] — chunked payload transfer with BLAKE3 integrity checking
//! - [`links`] — single-hop link creation rules and resolution
//! - [`watch`] — per-bucket replay-then-live change subscriptions
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cask_store::{ObjectStore, StoreResult};
//! use cask_stream::MemoryStreams;
//! use cask_types::BucketConfig;
//!
//! fn main() -> StoreResult<()> {
//!     let store = ObjectStore::new(Arc::new(MemoryStreams::new()));
//!     let bucket = store.create_bucket(BucketConfig::new("docs"))?;
//!
//!     bucket.put_bytes("readme", b"hello cask")?;
//!     assert_eq!(bucket.get_bytes("readme")?, b"hello cask");
//!     Ok(())
//! }
//! ```

pub mod bucket;
pub mod chunks;
pub mod error;
pub mod keys;
pub mod links;
pub mod store;
pub mod watch;

pub use bucket::{Bucket, BucketStatus};
pub use chunks::DEFAULT_CHUNK_SIZE;
pub use error::{StoreError, StoreResult};
pub use store::ObjectStore;
pub use watch::{WatchEvent, WatchOptions, Watcher};
