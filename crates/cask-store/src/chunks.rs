//! Chunked payload transfer with integrity verification.
//!
//! A put splits its source into chunk-size windows and appends each as a
//! distinct entry keyed by the generation's nuid, accumulating a digest as
//! it goes. The commit record written afterwards is the only thing that
//! makes the generation visible; chunks from a failed put are unreachable
//! garbage. A get reads the chunks back in append order and fails with an
//! integrity error when the recomputed digest or byte count disagrees with
//! the committed record.

use std::io::{Read, Write};

use tracing::debug;

use cask_stream::{EntryKind, StreamSubstrate};
use cask_types::{Digest, DigestWriter, Nuid, ObjectInfo};

use crate::error::{StoreError, StoreResult};
use crate::keys;

/// Default bytes per chunk when the meta does not configure one.
pub const DEFAULT_CHUNK_SIZE: usize = 128 * 1024;

/// Fill `buf` from `reader`, tolerating short reads. Returns bytes filled;
/// less than `buf.len()` only at end of input.
fn read_window(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Stream `reader` onto `stream` as chunk entries under a fresh generation.
///
/// Returns the total size, chunk count, and final digest for the commit
/// record. A zero-byte source produces zero chunks.
pub(crate) fn write_chunks<R: Read>(
    substrate: &dyn StreamSubstrate,
    stream: &str,
    nuid: &Nuid,
    chunk_size: usize,
    mut reader: R,
) -> StoreResult<(u64, u32, Digest)> {
    let key = keys::chunk_key(nuid);
    let mut digest = DigestWriter::new();
    let mut size = 0u64;
    let mut chunks = 0u32;
    let mut buf = vec![0u8; chunk_size];

    loop {
        let n = read_window(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        digest.update(&buf[..n]);
        size += n as u64;
        chunks += 1;
        substrate.append(stream, &key, EntryKind::Chunk, buf[..n].to_vec())?;
        if n < chunk_size {
            break;
        }
    }

    debug!(stream, %nuid, size, chunks, "chunks written");
    Ok((size, chunks, digest.finish()))
}

/// Read the chunks of `info`'s generation into `writer`, verifying the
/// digest and byte count against the committed record.
pub(crate) fn read_chunks<W: Write>(
    substrate: &dyn StreamSubstrate,
    stream: &str,
    info: &ObjectInfo,
    writer: &mut W,
) -> StoreResult<()> {
    let entries = substrate.entries_for_key(stream, &keys::chunk_key(&info.nuid))?;

    let mut digest = DigestWriter::new();
    let mut size = 0u64;
    for entry in &entries {
        writer.write_all(&entry.payload)?;
        digest.update(&entry.payload);
        size += entry.payload.len() as u64;
    }
    writer.flush()?;

    let computed = digest.finish();
    let verified = size == info.size && info.digest == Some(computed);
    if !verified {
        return Err(StoreError::IntegrityMismatch {
            name: info.name().to_string(),
            expected: info
                .digest
                .map(|d| d.to_hex())
                .unwrap_or_else(|| "none".to_string()),
            computed: computed.to_hex(),
        });
    }
    Ok(())
}
