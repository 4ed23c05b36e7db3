//! Foundation types for the Cask object store.
//!
//! This crate provides the metadata model shared by every other Cask crate:
//! object identity, bucket configuration, and content digests.
//!
//! # Key Types
//!
//! - [`ObjectMeta`] — caller-supplied identity and attributes of an object
//! - [`ObjectInfo`] — the persisted record of an object's current state
//! - [`Link`] — single-hop indirection to another object or bucket
//! - [`Headers`] — multi-valued header map (ordered values per key)
//! - [`BucketConfig`] — attributes of a bucket and its backing stream
//! - [`Digest`] / [`DigestWriter`] — BLAKE3 content digest and accumulator
//! - [`Nuid`] — unique identifier for one put generation of an object

pub mod bucket;
pub mod digest;
pub mod error;
pub mod info;
pub mod link;
pub mod meta;
pub mod nuid;

pub use bucket::{BucketConfig, StorageClass};
pub use digest::{Digest, DigestWriter};
pub use error::TypeError;
pub use info::ObjectInfo;
pub use link::Link;
pub use meta::{Headers, ObjectMeta};
pub use nuid::Nuid;
