use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Alphabet for nuid generation: digits, upper, lower (base 62).
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a generated nuid.
const NUID_LEN: usize = 22;

/// Unique identifier for one put generation of an object.
///
/// Every successful put produces a fresh `Nuid`, even when the object name is
/// reused, so a nuid identifies a specific generation rather than the logical
/// name. Chunks are keyed by the owning generation's nuid and are never
/// shared across generations.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nuid(String);

impl Nuid {
    /// Generate a fresh random nuid.
    pub fn fresh() -> Self {
        let mut rng = rand::thread_rng();
        let s: String = (0..NUID_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(s)
    }

    /// The nuid as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Nuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nuid({})", self.0)
    }
}

impl fmt::Display for Nuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Nuid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
