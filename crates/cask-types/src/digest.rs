use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// BLAKE3 content digest of an object's payload.
///
/// The digest is computed incrementally while chunks are written and verified
/// the same way on retrieval. It is fixed store-wide; there is no per-bucket
/// algorithm negotiation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Compute the digest of a complete byte slice in one shot.
    pub fn of(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create a digest from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..8])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Incremental digest accumulator for chunked payload I/O.
///
/// Feed chunks in order with [`update`](Self::update) and obtain the final
/// digest with [`finish`](Self::finish). Chunk boundaries do not affect the
/// result; only the concatenated byte sequence matters.
#[derive(Default)]
pub struct DigestWriter {
    hasher: blake3::Hasher,
}

impl DigestWriter {
    /// Create a fresh accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next slice of payload bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finalize and return the digest of everything fed so far.
    pub fn finish(self) -> Digest {
        Digest(*self.hasher.finalize().as_bytes())
    }
}
