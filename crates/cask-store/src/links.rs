//! Link creation rules and single-hop resolution.
//!
//! Links are validated at write time: a link may only point at a live,
//! non-link record, so no pointer chain longer than one hop can ever be
//! constructed and resolution never needs cycle detection. Dereferencing a
//! link performs exactly one redirect; inspecting a link record never
//! requires its target to be alive.

use cask_stream::{EntryKind, StreamEntry, StreamSubstrate};
use cask_types::{Link, ObjectInfo};

use crate::error::{StoreError, StoreResult};
use crate::keys;

/// Decode a metadata record entry into an [`ObjectInfo`].
pub(crate) fn decode_info(entry: &StreamEntry) -> StoreResult<ObjectInfo> {
    if entry.kind != EntryKind::Record {
        return Err(StoreError::Record(format!(
            "expected record entry at key {:?}, got {}",
            entry.key, entry.kind
        )));
    }
    serde_json::from_slice(&entry.payload).map_err(|e| StoreError::Record(e.to_string()))
}

/// Current record for `name` in `bucket`, tombstones included.
pub(crate) fn lookup(
    substrate: &dyn StreamSubstrate,
    bucket: &str,
    name: &str,
) -> StoreResult<Option<ObjectInfo>> {
    let stream = keys::stream_name(bucket);
    match substrate.last_for_key(&stream, &keys::meta_key(name))? {
        Some(entry) => Ok(Some(decode_info(&entry)?)),
        None => Ok(None),
    }
}

/// A link target must be a live, non-link record.
///
/// The link check comes first: a tombstoned link placeholder is still a
/// link, never a deletable target.
pub(crate) fn ensure_link_target(target: &ObjectInfo) -> StoreResult<()> {
    if target.is_link() {
        return Err(StoreError::CantLinkToLink(target.name().to_string()));
    }
    if target.deleted {
        return Err(StoreError::ObjectIsDeleted(target.name().to_string()));
    }
    Ok(())
}

/// A name may be (re)used only while it is absent, deleted, or a link.
pub(crate) fn ensure_name_reusable(
    existing: Option<&ObjectInfo>,
    name: &str,
) -> StoreResult<()> {
    if let Some(current) = existing {
        if !current.deleted && !current.is_link() {
            return Err(StoreError::ObjectAlreadyExists(name.to_string()));
        }
    }
    Ok(())
}

/// Resolve `name` in `bucket` to the record whose bytes a get should read,
/// following at most one link hop.
pub(crate) fn resolve_for_get(
    substrate: &dyn StreamSubstrate,
    bucket: &str,
    name: &str,
) -> StoreResult<ObjectInfo> {
    let info = lookup(substrate, bucket, name)?
        .ok_or_else(|| StoreError::ObjectNotFound(name.to_string()))?;

    if info.deleted {
        return Err(StoreError::ObjectNotFound(name.to_string()));
    }

    match info.link() {
        None => Ok(info),
        Some(Link::Bucket { .. }) => Err(StoreError::CantGetBucketLink(name.to_string())),
        Some(Link::Object {
            bucket: target_bucket,
            name: target_name,
        }) => {
            let target = lookup(substrate, target_bucket, target_name)?
                .ok_or_else(|| StoreError::ObjectNotFound(target_name.clone()))?;
            if target.deleted {
                return Err(StoreError::ObjectIsDeleted(target_name.clone()));
            }
            // Single indirection only: a target that has since been
            // overwritten by a link is not followed further.
            if target.is_link() {
                return Err(StoreError::CantLinkToLink(target_name.clone()));
            }
            Ok(target)
        }
    }
}
